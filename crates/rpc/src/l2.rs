//! L2 execution node access.

use crate::{request, OnlineProviderError, DEFAULT_RPC_TIMEOUT};
use alloy_consensus::Header;
use alloy_primitives::{Address, B256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types_eth::{Block, BlockNumberOrTag, TransactionReceipt};
use async_trait::async_trait;
use core::time::Duration;
use evidence_builder::L2ChainProvider;
use url::Url;

/// [L2ChainProvider] backed by an L2 execution node.
#[derive(Debug, Clone)]
pub struct OnlineL2ChainProvider<P> {
    provider: P,
    timeout: Duration,
}

impl OnlineL2ChainProvider<RootProvider> {
    /// Connects to the node serving JSON-RPC over HTTP at `url`.
    pub fn new_http(url: Url, timeout: Duration) -> Self {
        Self::new(RootProvider::new_http(url), timeout)
    }
}

impl<P: Provider> OnlineL2ChainProvider<P> {
    /// Creates a new [OnlineL2ChainProvider] bounding every request by `timeout`.
    pub const fn new(provider: P, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    /// Same as [Self::new] with [DEFAULT_RPC_TIMEOUT].
    pub const fn with_default_timeout(provider: P) -> Self {
        Self::new(provider, DEFAULT_RPC_TIMEOUT)
    }

    /// Returns the underlying provider.
    pub const fn inner(&self) -> &P {
        &self.provider
    }

    /// Fetches the header of the canonical block at height `number`.
    pub async fn header_by_number(&self, number: u64) -> Result<Header, OnlineProviderError> {
        let block = request(
            "eth_getBlockByNumber",
            self.timeout,
            self.provider
                .get_block_by_number(BlockNumberOrTag::Number(number)),
        )
        .await?
        .ok_or_else(|| OnlineProviderError::BlockNotFound(number.to_string()))?;
        Ok(block.header.inner)
    }

    /// Fetches the receipt of transaction `hash`.
    pub async fn transaction_receipt(
        &self,
        hash: B256,
    ) -> Result<TransactionReceipt, OnlineProviderError> {
        request(
            "eth_getTransactionReceipt",
            self.timeout,
            self.provider.get_transaction_receipt(hash),
        )
        .await?
        .ok_or(OnlineProviderError::ReceiptNotFound(hash))
    }
}

#[async_trait]
impl<P: Provider> L2ChainProvider for OnlineL2ChainProvider<P> {
    type Error = OnlineProviderError;

    async fn block_by_hash(&self, hash: B256) -> Result<Option<Block>, Self::Error> {
        request(
            "eth_getBlockByHash",
            self.timeout,
            self.provider.get_block_by_hash(hash).full(),
        )
        .await
    }

    async fn storage_root(
        &self,
        account: Address,
        block_number: u64,
    ) -> Result<B256, Self::Error> {
        let proof = request(
            "eth_getProof",
            self.timeout,
            self.provider
                .get_proof(account, vec![])
                .block_id(block_number.into()),
        )
        .await?;
        debug!(
            target: "evidence_rpc",
            %account,
            block_number,
            storage_hash = %proof.storage_hash,
            "fetched account proof"
        );
        Ok(proof.storage_hash)
    }
}
