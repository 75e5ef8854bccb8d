//! Collaborators the [crate::EvidenceBuilder] reads chain state through.
//!
//! None of them is expected to retry: a failed call aborts the construction
//! and retrying belongs to whoever drives the builder. Dropping the future of a
//! construction cancels the call in flight.

use crate::L1BlockInfo;
use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::{Block, Transaction};
use async_trait::async_trait;
use core::fmt::Display;

/// Read access to the L2 chain.
#[async_trait]
pub trait L2ChainProvider: Send + Sync {
    /// The error type for the [L2ChainProvider].
    type Error: Display + Send;

    /// Fetches the block with full transactions, `None` if the node does not know it.
    async fn block_by_hash(&self, hash: B256) -> Result<Option<Block>, Self::Error>;

    /// Fetches the storage root of `account` at L2 block `block_number`.
    async fn storage_root(&self, account: Address, block_number: u64)
        -> Result<B256, Self::Error>;
}

/// Read access to the TaikoL1 settlement contract.
#[async_trait]
pub trait L1RollupProvider: Send + Sync {
    /// The error type for the [L1RollupProvider].
    type Error: Display + Send;

    /// Fetches the record TaikoL1 keeps for L2 block `block_id`.
    async fn block_info(&self, block_id: u64) -> Result<L1BlockInfo, Self::Error>;
}

/// Protocol checks on the anchor transaction, the first transaction of every L2 block.
#[async_trait]
pub trait AnchorTxValidator: Send + Sync {
    /// The error type for the [AnchorTxValidator].
    type Error: Display + Send;

    /// Checks the transaction is a well formed anchor transaction.
    fn validate_anchor_tx(&self, tx: &Transaction) -> Result<(), Self::Error>;

    /// Checks the anchor transaction was executed successfully on L2.
    async fn validate_anchor_receipt(&self, tx: &Transaction) -> Result<(), Self::Error>;
}
