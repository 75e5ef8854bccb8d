//! Construction of the evidence a prover submits to the TaikoL1 settlement
//! contract, either to prove a L2 block transition or to contest one.
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod builder;
pub use builder::EvidenceBuilder;

pub mod circuits;
pub use circuits::{CircuitIndexLookup, ZkevmCircuits};

pub mod config;
pub use config::{graffiti_from_str, EvidenceConfig};

pub mod errors;
pub use errors::{BindingsConversionError, EvidenceError, ProofDecodingError};

pub mod evidence;
pub use evidence::{
    BlockEvidence, L1BlockInfo, ProofRequestOptions, ProofWithHeader, TransitionProvedEvent,
};

pub mod layout;
pub use layout::{DecodedProof, ProofLayout, TierProofLayouts, CIRCUIT_INDEX_PREFIX_LEN};

pub mod tier;
pub use tier::{ParseTierError, Tier};

pub mod traits;
pub use traits::{AnchorTxValidator, L1RollupProvider, L2ChainProvider};

#[cfg(test)]
mod test_utils;
