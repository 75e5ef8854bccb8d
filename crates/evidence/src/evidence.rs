//! Evidence and the inputs it is built from.

use crate::{BindingsConversionError, Tier};
use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, B256};
use alloy_sol_types::SolValue;
use evidence_bindings::{TaikoData, TaikoL1};
use serde::{Deserialize, Serialize};

/// The evidence submitted to TaikoL1 to prove or contest a block transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockEvidence {
    /// Hash of the block proposal metadata recorded on L1
    pub meta_hash: B256,
    /// Hash of the parent L2 block
    pub parent_hash: B256,
    /// Hash of the L2 block
    pub block_hash: B256,
    /// Storage root of the L2 signal service at this block
    pub signal_root: B256,
    /// Prover tag, zero for contests
    pub graffiti: B256,
    /// Tier of the proof
    pub tier: Tier,
    /// Proof laid out for the tier verifier, empty for contests
    pub proof: Bytes,
}

impl BlockEvidence {
    /// ABI encodes the evidence as the `TaikoData.BlockEvidence` struct.
    pub fn abi_encode(&self) -> Vec<u8> {
        TaikoData::BlockEvidence::from(self).abi_encode()
    }
}

impl From<&BlockEvidence> for TaikoData::BlockEvidence {
    fn from(evidence: &BlockEvidence) -> Self {
        Self {
            metaHash: evidence.meta_hash,
            parentHash: evidence.parent_hash,
            blockHash: evidence.block_hash,
            signalRoot: evidence.signal_root,
            graffiti: evidence.graffiti,
            tier: evidence.tier.id(),
            proof: evidence.proof.clone(),
        }
    }
}

impl From<TaikoData::BlockEvidence> for BlockEvidence {
    fn from(evidence: TaikoData::BlockEvidence) -> Self {
        Self {
            meta_hash: evidence.metaHash,
            parent_hash: evidence.parentHash,
            block_hash: evidence.blockHash,
            signal_root: evidence.signalRoot,
            graffiti: evidence.graffiti,
            tier: Tier(evidence.tier),
            proof: evidence.proof,
        }
    }
}

/// Hashes a proof request commits to. They are embedded into the evidence as
/// is and never re-derived from the block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRequestOptions {
    /// Hash of the block proposal metadata
    pub meta_hash: B256,
    /// Hash of the parent L2 block
    pub parent_hash: B256,
    /// Hash of the L2 block
    pub block_hash: B256,
    /// Storage root of the L2 signal service
    pub signal_root: B256,
}

/// A proof returned by a proof producer, along with the header it proves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProofWithHeader {
    /// L2 block id
    pub block_id: u64,
    /// Header of the proven L2 block
    pub header: Header,
    /// Options the proof was requested with
    pub opts: ProofRequestOptions,
    /// Raw proof bytes
    pub proof: Bytes,
    /// Circuit degree, only meaningful for circuit based tiers
    pub degree: u64,
    /// Tier of the proof producer
    pub tier: Tier,
}

/// A `TransitionProved` event emitted by TaikoL1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionProvedEvent {
    /// L2 block id
    pub block_id: u64,
    /// Parent hash of the proven transition
    pub parent_hash: B256,
    /// Block hash claimed by the transition
    pub block_hash: B256,
    /// Signal root claimed by the transition
    pub signal_root: B256,
    /// Prover of the transition
    pub prover: Address,
    /// Tier the transition was proven with
    pub tier: Tier,
}

impl TryFrom<TaikoL1::TransitionProved> for TransitionProvedEvent {
    type Error = BindingsConversionError;

    fn try_from(event: TaikoL1::TransitionProved) -> Result<Self, Self::Error> {
        let block_id = u64::try_from(event.blockId)
            .map_err(|_| BindingsConversionError::BlockIdOverflow(event.blockId))?;
        Ok(Self {
            block_id,
            parent_hash: event.parentHash,
            block_hash: event.blockHash,
            signal_root: event.signalRoot,
            prover: event.prover,
            tier: Tier(event.tier),
        })
    }
}

/// The record TaikoL1 keeps for a proposed block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct L1BlockInfo {
    /// Hash of the block proposal metadata
    pub meta_hash: B256,
    /// Prover assigned at proposal
    pub assigned_prover: Address,
    /// L2 block id
    pub block_id: u64,
    /// L1 timestamp of the proposal
    pub proposed_at: u64,
    /// L1 block number of the proposal
    pub proposed_in: u64,
    /// Id of the next transition to be recorded
    pub next_transition_id: u32,
    /// Id of the verified transition, zero if none
    pub verified_transition_id: u32,
}

impl From<TaikoData::Block> for L1BlockInfo {
    fn from(block: TaikoData::Block) -> Self {
        Self {
            meta_hash: block.metaHash,
            assigned_prover: block.assignedProver,
            block_id: block.blockId,
            proposed_at: block.proposedAt,
            proposed_in: block.proposedIn,
            next_transition_id: block.nextTransitionId,
            verified_transition_id: block.verifiedTransitionId,
        }
    }
}
