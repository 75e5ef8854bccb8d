//! Tier specific layout of the proof bytes inside the evidence.
//!
//! The settlement contract dispatches the proof to the verifier of its tier.
//! The SGX + PSE zkEVM verifier reads the first two bytes as the big endian
//! index of the circuit the zk proof was produced with:
//!
//!  | 2 bytes       | n bytes   |
//!  | circuit index | raw proof |
//!
//! Every other tier receives the raw proof untouched.

use crate::{CircuitIndexLookup, ProofDecodingError, Tier};
use alloy_primitives::Bytes;
use std::collections::BTreeMap;

/// Length of the circuit index prefix.
pub const CIRCUIT_INDEX_PREFIX_LEN: usize = 2;

/// How a raw proof is laid out in the evidence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProofLayout {
    /// The proof is submitted as produced.
    #[default]
    Raw,
    /// The proof is prefixed with the big endian circuit index of its degree.
    CircuitIndexPrefixed,
}

/// A proof read back from its evidence layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedProof {
    /// Circuit index, only present for [ProofLayout::CircuitIndexPrefixed].
    pub circuit_index: Option<u16>,
    /// The raw proof.
    pub proof: Bytes,
}

impl ProofLayout {
    /// Lays out `proof` for submission. Returns `None` if the layout requires a
    /// circuit index and `circuits` has none registered for `degree`.
    pub fn encode(
        self,
        proof: &Bytes,
        degree: u64,
        circuits: &impl CircuitIndexLookup,
    ) -> Option<Bytes> {
        match self {
            Self::Raw => Some(proof.clone()),
            Self::CircuitIndexPrefixed => {
                let index = circuits.circuit_index(degree)?;
                let mut encoded = Vec::with_capacity(CIRCUIT_INDEX_PREFIX_LEN + proof.len());
                encoded.extend_from_slice(&index.to_be_bytes());
                encoded.extend_from_slice(proof);
                Some(encoded.into())
            }
        }
    }

    /// Splits an encoded proof back into its circuit index and raw proof.
    pub fn decode(self, encoded: &Bytes) -> Result<DecodedProof, ProofDecodingError> {
        match self {
            Self::Raw => Ok(DecodedProof {
                circuit_index: None,
                proof: encoded.clone(),
            }),
            Self::CircuitIndexPrefixed => {
                if encoded.len() < CIRCUIT_INDEX_PREFIX_LEN {
                    return Err(ProofDecodingError::MissingCircuitIndex {
                        expected: CIRCUIT_INDEX_PREFIX_LEN,
                        actual: encoded.len(),
                    });
                }
                let index = u16::from_be_bytes([encoded[0], encoded[1]]);
                Ok(DecodedProof {
                    circuit_index: Some(index),
                    proof: encoded.slice(CIRCUIT_INDEX_PREFIX_LEN..),
                })
            }
        }
    }
}

/// Proof layout of every tier. Tiers without a registration use
/// [ProofLayout::Raw]; a new tier that needs a different layout must be
/// registered with [TierProofLayouts::with_layout].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierProofLayouts {
    layouts: BTreeMap<Tier, ProofLayout>,
}

impl TierProofLayouts {
    /// Registers `layout` for `tier`.
    pub fn with_layout(mut self, tier: Tier, layout: ProofLayout) -> Self {
        self.layouts.insert(tier, layout);
        self
    }

    /// Returns the layout of `tier`.
    pub fn layout(&self, tier: Tier) -> ProofLayout {
        self.layouts.get(&tier).copied().unwrap_or_default()
    }
}

impl Default for TierProofLayouts {
    fn default() -> Self {
        let layouts = Tier::KNOWN
            .into_iter()
            .map(|tier| match tier {
                Tier::SGX_AND_PSE_ZKEVM => (tier, ProofLayout::CircuitIndexPrefixed),
                _ => (tier, ProofLayout::Raw),
            })
            .collect();
        Self { layouts }
    }
}
