//! Mock collaborators of the [crate::EvidenceBuilder] for tests.

use crate::{AnchorTxValidator, L1BlockInfo, L1RollupProvider, L2ChainProvider};
use alloy_consensus::{transaction::Recovered, Header, Signed, TxEip1559, TxEnvelope};
use alloy_primitives::{address, map::HashMap, Address, Signature, TxKind, B256, U256};
use alloy_rpc_types_eth::{Block, BlockTransactions, Transaction};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Sender of every anchor transaction.
pub(crate) const GOLDEN_TOUCH: Address = address!("0x0000777735367b36bC9B61C50022d9D0700dB4Ec");

/// Custom mock error
#[derive(Debug, Clone, thiserror::Error)]
pub(crate) enum TestProviderError {
    /// The backend failed to answer
    #[error("backend unavailable")]
    Backend,
    /// The anchor transaction was rejected
    #[error("anchor check failed: {0}")]
    Anchor(&'static str),
}

pub(crate) fn anchor_transaction() -> Transaction {
    let tx = TxEnvelope::Eip1559(Signed::new_unchecked(
        TxEip1559 {
            chain_id: 167,
            to: TxKind::Call(address!("0x1670000000000000000000000000000000010001")),
            ..Default::default()
        },
        Signature::new(U256::from(1), U256::from(1), false),
        B256::repeat_byte(0xac),
    ));
    Transaction {
        inner: Recovered::new_unchecked(tx, GOLDEN_TOUCH),
        block_hash: None,
        block_number: None,
        transaction_index: None,
        effective_gas_price: None,
    }
}

pub(crate) fn l2_block(header: &Header, transactions: Vec<Transaction>) -> Block {
    Block {
        header: alloy_rpc_types_eth::Header {
            hash: header.hash_slow(),
            inner: header.clone(),
            total_difficulty: None,
            size: None,
        },
        uncles: vec![],
        transactions: BlockTransactions::Full(transactions),
        withdrawals: None,
    }
}

// a mock object implements the L2ChainProvider trait
#[derive(Debug, Default)]
pub(crate) struct TestL2ChainProvider {
    pub blocks: HashMap<B256, Block>,
    pub storage_roots: HashMap<(Address, u64), B256>,
    pub should_block_err: bool,
    pub should_root_err: bool,
    // never answers, the caller has to give up
    pub should_hang: bool,
}

impl TestL2ChainProvider {
    pub(crate) fn insert_block(&mut self, block: Block) {
        self.blocks.insert(block.header.hash, block);
    }

    pub(crate) fn insert_storage_root(&mut self, account: Address, number: u64, root: B256) {
        self.storage_roots.insert((account, number), root);
    }
}

#[async_trait]
impl L2ChainProvider for TestL2ChainProvider {
    type Error = TestProviderError;

    async fn block_by_hash(&self, hash: B256) -> Result<Option<Block>, Self::Error> {
        if self.should_hang {
            std::future::pending::<()>().await;
        }
        if self.should_block_err {
            return Err(TestProviderError::Backend);
        }
        Ok(self.blocks.get(&hash).cloned())
    }

    async fn storage_root(
        &self,
        account: Address,
        block_number: u64,
    ) -> Result<B256, Self::Error> {
        if self.should_root_err {
            return Err(TestProviderError::Backend);
        }
        self.storage_roots
            .get(&(account, block_number))
            .copied()
            .ok_or(TestProviderError::Backend)
    }
}

// a mock object implements the L1RollupProvider trait
#[derive(Debug, Default)]
pub(crate) struct TestL1RollupProvider {
    pub infos: HashMap<u64, L1BlockInfo>,
    pub should_err: bool,
}

impl TestL1RollupProvider {
    pub(crate) fn insert_block_info(&mut self, info: L1BlockInfo) {
        self.infos.insert(info.block_id, info);
    }
}

#[async_trait]
impl L1RollupProvider for TestL1RollupProvider {
    type Error = TestProviderError;

    async fn block_info(&self, block_id: u64) -> Result<L1BlockInfo, Self::Error> {
        if self.should_err {
            return Err(TestProviderError::Backend);
        }
        self.infos
            .get(&block_id)
            .copied()
            .ok_or(TestProviderError::Backend)
    }
}

// a mock object implements the AnchorTxValidator trait, counting its calls
#[derive(Debug, Default)]
pub(crate) struct TestAnchorTxValidator {
    pub should_tx_err: bool,
    pub should_receipt_err: bool,
    pub tx_checks: AtomicUsize,
    pub receipt_checks: AtomicUsize,
}

#[async_trait]
impl AnchorTxValidator for TestAnchorTxValidator {
    type Error = TestProviderError;

    fn validate_anchor_tx(&self, tx: &Transaction) -> Result<(), Self::Error> {
        self.tx_checks.fetch_add(1, Ordering::SeqCst);
        if self.should_tx_err || tx.inner.signer() != GOLDEN_TOUCH {
            return Err(TestProviderError::Anchor("invalid sender"));
        }
        Ok(())
    }

    async fn validate_anchor_receipt(&self, _tx: &Transaction) -> Result<(), Self::Error> {
        self.receipt_checks.fetch_add(1, Ordering::SeqCst);
        if self.should_receipt_err {
            return Err(TestProviderError::Anchor("receipt reverted"));
        }
        Ok(())
    }
}
