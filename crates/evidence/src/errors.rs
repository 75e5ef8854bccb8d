//! Errors raised while assembling evidence.
//!
//! Every [EvidenceError] aborts the whole construction. Callers may retry the
//! construction later but never receive partially filled evidence.

use crate::Tier;
use alloy_primitives::{Address, B256, U256};

/// Failure of a single evidence construction, tagged by the failing step.
/// Collaborator errors are kept as their rendered message so that the builder
/// stays independent of the concrete providers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvidenceError {
    /// The L2 block referenced by the proof could not be retrieved.
    #[error("failed to get L2 block {block_id} with hash {hash}: {reason}")]
    NotFound {
        /// L2 block id
        block_id: u64,
        /// Hash of the header the proof was produced for
        hash: B256,
        /// Provider error or missing data
        reason: String,
    },
    /// The L2 block carries no transaction, hence no anchor transaction.
    #[error("invalid block {block_id} without anchor transaction")]
    MalformedBlock {
        /// L2 block id
        block_id: u64,
    },
    /// The first transaction of the block is not a valid anchor transaction.
    #[error("invalid anchor transaction {tx_hash} in block {block_id}: {reason}")]
    InvalidAnchor {
        /// L2 block id
        block_id: u64,
        /// Hash of the first transaction of the block
        tx_hash: B256,
        /// Validator error
        reason: String,
    },
    /// The anchor transaction receipt is missing or reports a failed execution.
    #[error("failed to validate anchor transaction {tx_hash} receipt in block {block_id}: {reason}")]
    InvalidAnchorReceipt {
        /// L2 block id
        block_id: u64,
        /// Hash of the anchor transaction
        tx_hash: B256,
        /// Validator error
        reason: String,
    },
    /// The storage root of the L2 signal service could not be fetched.
    #[error("failed to get L2 signal service {account} storage root at block {block_id}: {reason}")]
    StorageRootUnavailable {
        /// L2 block id
        block_id: u64,
        /// Signal service address
        account: Address,
        /// Provider error
        reason: String,
    },
    /// The block record kept by the settlement contract could not be fetched.
    #[error("failed to get L1 metadata of block {block_id}: {reason}")]
    MetadataUnavailable {
        /// L2 block id
        block_id: u64,
        /// Provider error
        reason: String,
    },
    /// No circuit is registered for the degree the proof was produced with.
    #[error("unsupported degree {degree} for tier {tier} in block {block_id}")]
    UnsupportedDegree {
        /// L2 block id
        block_id: u64,
        /// Tier requesting a circuit index
        tier: Tier,
        /// Degree of the proof
        degree: u64,
    },
}

impl EvidenceError {
    /// Returns the id of the block the construction failed for.
    pub const fn block_id(&self) -> u64 {
        match self {
            Self::NotFound { block_id, .. }
            | Self::MalformedBlock { block_id }
            | Self::InvalidAnchor { block_id, .. }
            | Self::InvalidAnchorReceipt { block_id, .. }
            | Self::StorageRootUnavailable { block_id, .. }
            | Self::MetadataUnavailable { block_id, .. }
            | Self::UnsupportedDegree { block_id, .. } => *block_id,
        }
    }
}

/// Errors when reading back an encoded proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ProofDecodingError {
    /// The proof is too short to carry the circuit index prefix.
    #[error("proof of {actual} bytes cannot hold a {expected} bytes circuit index")]
    MissingCircuitIndex {
        /// Prefix length
        expected: usize,
        /// Proof length
        actual: usize,
    },
}

/// Errors converting contract bindings into evidence inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BindingsConversionError {
    /// The event block id does not fit a u64.
    #[error("block id {0} overflows u64")]
    BlockIdOverflow(U256),
}
