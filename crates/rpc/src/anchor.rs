//! Protocol checks on the TaikoL2 anchor transaction.
//!
//! Every L2 block opens with a `TaikoL2.anchor` call signed by the golden touch
//! account. A block whose anchor transaction is malformed, or was included but
//! reverted, can never be proven.

use crate::{OnlineL2ChainProvider, OnlineProviderError};
use alloy_consensus::{Transaction as _, TxType};
use alloy_primitives::{address, Address, B256};
use alloy_provider::Provider;
use alloy_rpc_types_eth::{Transaction, TransactionReceipt};
use alloy_sol_types::SolCall;
use async_trait::async_trait;
use evidence_bindings::TaikoL2;
use evidence_builder::AnchorTxValidator;

/// The account that signs every anchor transaction.
pub const GOLDEN_TOUCH_ADDRESS: Address = address!("0x0000777735367b36bC9B61C50022d9D0700dB4Ec");

/// Reasons an anchor transaction is rejected.
#[derive(Debug, thiserror::Error)]
pub enum AnchorTxError {
    /// Anchor transactions are always EIP-1559 transactions
    #[error("invalid TaikoL2.anchor transaction type: {0}")]
    InvalidType(u8),
    /// The transaction does not call TaikoL2
    #[error("invalid TaikoL2.anchor transaction to: {actual:?}, want: {expected}")]
    InvalidRecipient {
        /// Recipient of the transaction
        actual: Option<Address>,
        /// TaikoL2 address
        expected: Address,
    },
    /// The transaction was not signed by the golden touch account
    #[error("invalid TaikoL2.anchor transaction sender: {actual}, want: {expected}")]
    InvalidSender {
        /// Recovered signer
        actual: Address,
        /// Golden touch address
        expected: Address,
    },
    /// The calldata is not a `TaikoL2.anchor` call
    #[error("invalid TaikoL2.anchor transaction selector")]
    InvalidSelector,
    /// The transaction reverted
    #[error("invalid TaikoL2.anchor transaction receipt status of {0}")]
    ReceiptFailed(B256),
    /// The anchor call emits events, a receipt without logs did not run it
    #[error("no event found in TaikoL2.anchor transaction receipt of {0}")]
    MissingEvents(B256),
    /// The receipt could not be fetched
    #[error(transparent)]
    Provider(#[from] OnlineProviderError),
}

/// Checks `tx` is an EIP-1559 `TaikoL2.anchor` call to `taiko_l2` signed by `golden_touch`.
pub fn check_anchor_tx(
    tx: &Transaction,
    taiko_l2: Address,
    golden_touch: Address,
) -> Result<(), AnchorTxError> {
    let ty = tx.inner.tx_type();
    if ty != TxType::Eip1559 {
        return Err(AnchorTxError::InvalidType(ty as u8));
    }

    if tx.to() != Some(taiko_l2) {
        return Err(AnchorTxError::InvalidRecipient {
            actual: tx.to(),
            expected: taiko_l2,
        });
    }

    let sender = tx.inner.signer();
    if sender != golden_touch {
        return Err(AnchorTxError::InvalidSender {
            actual: sender,
            expected: golden_touch,
        });
    }

    if !tx.input().starts_with(&TaikoL2::anchorCall::SELECTOR) {
        return Err(AnchorTxError::InvalidSelector);
    }

    Ok(())
}

/// Checks the anchor transaction succeeded and emitted at least one log.
pub fn check_anchor_receipt(receipt: &TransactionReceipt) -> Result<(), AnchorTxError> {
    if !receipt.status() {
        return Err(AnchorTxError::ReceiptFailed(receipt.transaction_hash));
    }
    if receipt.inner.logs().is_empty() {
        return Err(AnchorTxError::MissingEvents(receipt.transaction_hash));
    }
    Ok(())
}

/// [AnchorTxValidator] fetching anchor receipts from an L2 execution node.
#[derive(Debug, Clone)]
pub struct OnlineAnchorTxValidator<P> {
    l2: OnlineL2ChainProvider<P>,
    taiko_l2: Address,
    golden_touch: Address,
}

impl<P: Provider> OnlineAnchorTxValidator<P> {
    /// Creates a new [OnlineAnchorTxValidator] for the TaikoL2 deployment at `taiko_l2`,
    /// reading receipts through `l2`.
    pub const fn new(l2: OnlineL2ChainProvider<P>, taiko_l2: Address) -> Self {
        Self {
            l2,
            taiko_l2,
            golden_touch: GOLDEN_TOUCH_ADDRESS,
        }
    }

    /// Overrides the expected anchor signer.
    pub const fn with_golden_touch(mut self, golden_touch: Address) -> Self {
        self.golden_touch = golden_touch;
        self
    }
}

#[async_trait]
impl<P: Provider> AnchorTxValidator for OnlineAnchorTxValidator<P> {
    type Error = AnchorTxError;

    fn validate_anchor_tx(&self, tx: &Transaction) -> Result<(), Self::Error> {
        check_anchor_tx(tx, self.taiko_l2, self.golden_touch)
    }

    async fn validate_anchor_receipt(&self, tx: &Transaction) -> Result<(), Self::Error> {
        let hash = *tx.inner.tx_hash();
        let receipt = self.l2.transaction_receipt(hash).await?;

        check_anchor_receipt(&receipt).inspect_err(|err| {
            warn!(target: "evidence_rpc", tx_hash = %hash, %err, "rejected anchor receipt");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_consensus::{transaction::Recovered, Signed, TxEip1559, TxEnvelope, TxLegacy};
    use alloy_primitives::{Bytes, Signature, TxKind, U256};
    use alloy_provider::ProviderBuilder;
    use alloy_transport::mock::Asserter;
    use serde_json::json;

    const TAIKO_L2: Address = address!("0x1670000000000000000000000000000000010001");

    fn signature() -> Signature {
        Signature::new(U256::from(1), U256::from(1), false)
    }

    fn anchor_input() -> Bytes {
        TaikoL2::anchorCall {
            l1BlockHash: B256::repeat_byte(0x01),
            l1SignalRoot: B256::repeat_byte(0x02),
            l1Height: 18_000_000,
            parentGasUsed: 21_000,
        }
        .abi_encode()
        .into()
    }

    fn transaction(envelope: TxEnvelope, sender: Address) -> Transaction {
        Transaction {
            inner: Recovered::new_unchecked(envelope, sender),
            block_hash: None,
            block_number: None,
            transaction_index: None,
            effective_gas_price: None,
        }
    }

    fn eip1559(to: Address, input: Bytes, sender: Address) -> Transaction {
        let tx = TxEip1559 {
            chain_id: 167,
            to: TxKind::Call(to),
            input,
            ..Default::default()
        };
        transaction(
            TxEnvelope::Eip1559(Signed::new_unchecked(tx, signature(), B256::repeat_byte(0xac))),
            sender,
        )
    }

    fn receipt(status: bool, logs: serde_json::Value) -> TransactionReceipt {
        serde_json::from_value(receipt_json(status, logs)).unwrap()
    }

    fn receipt_json(status: bool, logs: serde_json::Value) -> serde_json::Value {
        json!({
            "type": "0x2",
            "status": if status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": "0x5208",
            "logs": logs,
            "logsBloom": format!("0x{}", "00".repeat(256)),
            "transactionHash": B256::repeat_byte(0xac),
            "transactionIndex": "0x0",
            "blockHash": B256::repeat_byte(0xbb),
            "blockNumber": "0x2a",
            "gasUsed": "0x5208",
            "effectiveGasPrice": "0x1",
            "from": GOLDEN_TOUCH_ADDRESS,
            "to": TAIKO_L2,
            "contractAddress": null
        })
    }

    fn online_validator(asserter: Asserter) -> OnlineAnchorTxValidator<impl Provider> {
        let provider = ProviderBuilder::new().connect_mocked_client(asserter);
        OnlineAnchorTxValidator::new(OnlineL2ChainProvider::with_default_timeout(provider), TAIKO_L2)
    }

    fn log() -> serde_json::Value {
        json!({
            "address": TAIKO_L2,
            "topics": [B256::repeat_byte(0x0e)],
            "data": "0x",
            "blockHash": B256::repeat_byte(0xbb),
            "blockNumber": "0x2a",
            "transactionHash": B256::repeat_byte(0xac),
            "transactionIndex": "0x0",
            "logIndex": "0x0",
            "removed": false
        })
    }

    #[test]
    fn test_valid_anchor_tx() {
        let tx = eip1559(TAIKO_L2, anchor_input(), GOLDEN_TOUCH_ADDRESS);
        check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap();
    }

    #[test]
    fn test_anchor_tx_wrong_type() {
        let legacy = TxLegacy {
            to: TxKind::Call(TAIKO_L2),
            input: anchor_input(),
            ..Default::default()
        };
        let tx = transaction(
            TxEnvelope::Legacy(Signed::new_unchecked(legacy, signature(), B256::ZERO)),
            GOLDEN_TOUCH_ADDRESS,
        );

        let err = check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap_err();
        assert!(matches!(err, AnchorTxError::InvalidType(0)));
    }

    #[test]
    fn test_anchor_tx_wrong_recipient() {
        let other = Address::repeat_byte(0x99);
        let tx = eip1559(other, anchor_input(), GOLDEN_TOUCH_ADDRESS);

        let err = check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap_err();
        assert!(matches!(
            err,
            AnchorTxError::InvalidRecipient { actual: Some(a), expected } if a == other && expected == TAIKO_L2
        ));
    }

    #[test]
    fn test_anchor_tx_wrong_sender() {
        let tx = eip1559(TAIKO_L2, anchor_input(), Address::repeat_byte(0x55));

        let err = check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap_err();
        assert!(matches!(err, AnchorTxError::InvalidSender { .. }));
    }

    #[test]
    fn test_anchor_tx_wrong_selector() {
        let tx = eip1559(
            TAIKO_L2,
            Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            GOLDEN_TOUCH_ADDRESS,
        );

        let err = check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap_err();
        assert!(matches!(err, AnchorTxError::InvalidSelector));
    }

    #[test]
    fn test_anchor_tx_empty_input() {
        let tx = eip1559(TAIKO_L2, Bytes::new(), GOLDEN_TOUCH_ADDRESS);

        let err = check_anchor_tx(&tx, TAIKO_L2, GOLDEN_TOUCH_ADDRESS).unwrap_err();
        assert!(matches!(err, AnchorTxError::InvalidSelector));
    }

    #[test]
    fn test_successful_receipt() {
        check_anchor_receipt(&receipt(true, json!([log()]))).unwrap();
    }

    #[test]
    fn test_reverted_receipt() {
        let err = check_anchor_receipt(&receipt(false, json!([log()]))).unwrap_err();
        assert!(matches!(err, AnchorTxError::ReceiptFailed(h) if h == B256::repeat_byte(0xac)));
    }

    #[test]
    fn test_receipt_without_logs() {
        let err = check_anchor_receipt(&receipt(true, json!([]))).unwrap_err();
        assert!(matches!(err, AnchorTxError::MissingEvents(_)));
    }

    #[tokio::test]
    async fn test_validate_anchor_receipt() {
        let asserter = Asserter::new();
        asserter.push_success(&receipt_json(true, json!([log()])));
        let validator = online_validator(asserter);
        let tx = eip1559(TAIKO_L2, anchor_input(), GOLDEN_TOUCH_ADDRESS);

        validator.validate_anchor_receipt(&tx).await.unwrap();
    }

    #[tokio::test]
    async fn test_validate_anchor_receipt_reverted() {
        let asserter = Asserter::new();
        asserter.push_success(&receipt_json(false, json!([log()])));
        let validator = online_validator(asserter);
        let tx = eip1559(TAIKO_L2, anchor_input(), GOLDEN_TOUCH_ADDRESS);

        let err = validator.validate_anchor_receipt(&tx).await.unwrap_err();
        assert!(matches!(err, AnchorTxError::ReceiptFailed(h) if h == B256::repeat_byte(0xac)));
    }

    #[tokio::test]
    async fn test_validate_anchor_receipt_missing() {
        let asserter = Asserter::new();
        asserter.push_success(&serde_json::Value::Null);
        let validator = online_validator(asserter);
        let tx = eip1559(TAIKO_L2, anchor_input(), GOLDEN_TOUCH_ADDRESS);

        let err = validator.validate_anchor_receipt(&tx).await.unwrap_err();
        assert!(matches!(
            err,
            AnchorTxError::Provider(OnlineProviderError::ReceiptNotFound(h)) if h == B256::repeat_byte(0xac)
        ));
    }
}
