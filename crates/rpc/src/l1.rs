//! TaikoL1 contract reads.

use crate::{request, OnlineProviderError};
use alloy_primitives::{Address, B256, U256};
use alloy_provider::{Provider, RootProvider};
use alloy_rpc_types_eth::{Filter, TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, SolEvent, SolType};
use async_trait::async_trait;
use core::time::Duration;
use evidence_bindings::{TaikoData, TaikoL1};
use evidence_builder::{L1BlockInfo, L1RollupProvider, TransitionProvedEvent};
use url::Url;

/// [L1RollupProvider] reading the TaikoL1 contract through an L1 execution node.
#[derive(Debug, Clone)]
pub struct OnlineL1RollupProvider<P> {
    provider: P,
    taiko_l1: Address,
    timeout: Duration,
}

impl OnlineL1RollupProvider<RootProvider> {
    /// Connects to the node serving JSON-RPC over HTTP at `url`.
    pub fn new_http(url: Url, taiko_l1: Address, timeout: Duration) -> Self {
        Self::new(RootProvider::new_http(url), taiko_l1, timeout)
    }
}

impl<P: Provider> OnlineL1RollupProvider<P> {
    /// Creates a new [OnlineL1RollupProvider] for the TaikoL1 deployment at `taiko_l1`.
    pub const fn new(provider: P, taiko_l1: Address, timeout: Duration) -> Self {
        Self {
            provider,
            taiko_l1,
            timeout,
        }
    }

    /// Address of the TaikoL1 contract.
    pub const fn taiko_l1(&self) -> Address {
        self.taiko_l1
    }

    /// Fetches the `TransitionProved` events TaikoL1 emitted for L2 block
    /// `block_id` since L1 block `from_block`, oldest first.
    pub async fn transitions_proved(
        &self,
        block_id: u64,
        from_block: u64,
    ) -> Result<Vec<TransitionProvedEvent>, OnlineProviderError> {
        let filter = Filter::new()
            .address(self.taiko_l1)
            .event_signature(TaikoL1::TransitionProved::SIGNATURE_HASH)
            .topic1(B256::from(U256::from(block_id)))
            .from_block(from_block);

        let logs = request("eth_getLogs", self.timeout, self.provider.get_logs(&filter)).await?;
        debug!(
            target: "evidence_rpc",
            block_id,
            from_block,
            count = logs.len(),
            "fetched TransitionProved logs"
        );

        logs.iter()
            .map(|log| {
                let decoded = log.log_decode::<TaikoL1::TransitionProved>().map_err(|e| {
                    OnlineProviderError::Decode {
                        method: "TaikoL1.TransitionProved",
                        reason: e.to_string(),
                    }
                })?;
                TransitionProvedEvent::try_from(decoded.inner.data).map_err(|e| {
                    OnlineProviderError::Decode {
                        method: "TaikoL1.TransitionProved",
                        reason: e.to_string(),
                    }
                })
            })
            .collect()
    }
}

#[async_trait]
impl<P: Provider> L1RollupProvider for OnlineL1RollupProvider<P> {
    type Error = OnlineProviderError;

    async fn block_info(&self, block_id: u64) -> Result<L1BlockInfo, Self::Error> {
        let call = TaikoL1::getBlockCall { blockId: block_id };
        let tx = TransactionRequest::default()
            .to(self.taiko_l1)
            .input(TransactionInput::new(call.abi_encode().into()));

        let output = request("eth_call", self.timeout, self.provider.call(tx)).await?;
        let block = <TaikoData::Block as SolType>::abi_decode(&output).map_err(|e| {
            OnlineProviderError::Decode {
                method: "TaikoL1.getBlock",
                reason: e.to_string(),
            }
        })?;

        Ok(block.into())
    }
}
