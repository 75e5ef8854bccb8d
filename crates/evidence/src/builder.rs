//! Contains the [EvidenceBuilder], which turns a produced proof into evidence
//! ready for submission, or a proven transition into evidence to contest it.

use crate::{
    AnchorTxValidator, BlockEvidence, CircuitIndexLookup, EvidenceConfig, EvidenceError,
    L1RollupProvider, L2ChainProvider, ProofWithHeader, TransitionProvedEvent,
};
use alloy_consensus::Header;
use alloy_primitives::{Address, Bytes, B256};

/// Builds [BlockEvidence] for the TaikoL1 settlement contract.
///
/// The builder keeps no state between calls besides its immutable
/// configuration, so one instance can serve concurrent constructions.
#[derive(Debug, Clone)]
pub struct EvidenceBuilder<L2, L1, V, C> {
    l2: L2,
    l1: L1,
    anchor_validator: V,
    circuits: C,
    config: EvidenceConfig,
}

impl<L2, L1, V, C> EvidenceBuilder<L2, L1, V, C>
where
    L2: L2ChainProvider,
    L1: L1RollupProvider,
    V: AnchorTxValidator,
    C: CircuitIndexLookup,
{
    /// Instantiates a new [EvidenceBuilder].
    pub const fn new(
        l2: L2,
        l1: L1,
        anchor_validator: V,
        circuits: C,
        config: EvidenceConfig,
    ) -> Self {
        Self {
            l2,
            l1,
            anchor_validator,
            circuits,
            config,
        }
    }

    /// Returns the builder configuration.
    pub const fn config(&self) -> &EvidenceConfig {
        &self.config
    }

    /// Creates the evidence for the given L2 block proof.
    ///
    /// The L2 block must start with a valid anchor transaction that executed
    /// successfully. The hashes are taken from the proof request options, the
    /// proof is laid out according to its tier.
    pub async fn for_submission(
        &self,
        proof: &ProofWithHeader,
    ) -> Result<BlockEvidence, EvidenceError> {
        let block_id = proof.block_id;
        let hash = proof.header.hash_slow();

        info!(
            target: "evidence_builder",
            block_id,
            parent_hash = %proof.header.parent_hash,
            %hash,
            signal_root = %proof.opts.signal_root,
            tier = %proof.tier,
            "Create new evidence"
        );

        let block = self
            .l2
            .block_by_hash(hash)
            .await
            .map_err(|e| EvidenceError::NotFound {
                block_id,
                hash,
                reason: e.to_string(),
            })?
            .ok_or_else(|| EvidenceError::NotFound {
                block_id,
                hash,
                reason: "block not found".to_string(),
            })?;

        if block.transactions.is_empty() {
            return Err(EvidenceError::MalformedBlock { block_id });
        }
        let anchor_tx = block
            .transactions
            .as_transactions()
            .and_then(|txs| txs.first())
            .ok_or_else(|| EvidenceError::NotFound {
                block_id,
                hash,
                reason: "block returned without transaction bodies".to_string(),
            })?;
        let tx_hash = *anchor_tx.inner.tx_hash();

        self.anchor_validator
            .validate_anchor_tx(anchor_tx)
            .map_err(|e| EvidenceError::InvalidAnchor {
                block_id,
                tx_hash,
                reason: e.to_string(),
            })?;

        self.anchor_validator
            .validate_anchor_receipt(anchor_tx)
            .await
            .map_err(|e| EvidenceError::InvalidAnchorReceipt {
                block_id,
                tx_hash,
                reason: e.to_string(),
            })?;

        let layout = self.config.layouts.layout(proof.tier);
        let encoded_proof = layout
            .encode(&proof.proof, proof.degree, &self.circuits)
            .ok_or(EvidenceError::UnsupportedDegree {
                block_id,
                tier: proof.tier,
                degree: proof.degree,
            })?;
        debug!(
            target: "evidence_builder",
            block_id,
            ?layout,
            raw_len = proof.proof.len(),
            encoded_len = encoded_proof.len(),
            "Laid out proof"
        );

        Ok(BlockEvidence {
            meta_hash: proof.opts.meta_hash,
            parent_hash: proof.opts.parent_hash,
            block_hash: proof.opts.block_hash,
            signal_root: proof.opts.signal_root,
            graffiti: self.config.graffiti,
            tier: proof.tier,
            proof: encoded_proof,
        })
    }

    /// Creates the evidence for contesting a L2 transition.
    ///
    /// Contest evidence carries no proof and no graffiti, it only points the
    /// settlement contract at the transition to re-verify.
    pub async fn for_contest(
        &self,
        header: &Header,
        l2_signal_service: Address,
        event: &TransitionProvedEvent,
    ) -> Result<BlockEvidence, EvidenceError> {
        let block_id = event.block_id;

        let signal_root = self
            .l2
            .storage_root(l2_signal_service, block_id)
            .await
            .map_err(|e| EvidenceError::StorageRootUnavailable {
                block_id,
                account: l2_signal_service,
                reason: e.to_string(),
            })?;

        let block_info =
            self.l1
                .block_info(block_id)
                .await
                .map_err(|e| EvidenceError::MetadataUnavailable {
                    block_id,
                    reason: e.to_string(),
                })?;

        let evidence = BlockEvidence {
            meta_hash: block_info.meta_hash,
            parent_hash: event.parent_hash,
            block_hash: header.hash_slow(),
            signal_root,
            graffiti: B256::ZERO,
            tier: event.tier,
            proof: Bytes::new(),
        };

        info!(
            target: "evidence_builder",
            block_id,
            meta_hash = %evidence.meta_hash,
            block_hash = %evidence.block_hash,
            tier = %evidence.tier,
            "Create contest evidence"
        );

        Ok(evidence)
    }
}
