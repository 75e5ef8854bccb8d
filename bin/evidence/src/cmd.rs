//! Runs the [Command]s.

use crate::args::{
    ChainArgs, Command, ContestArgs, DecodeProofArgs, EncodeProofArgs, SubmissionArgs,
};
use alloy_primitives::{hex, Bytes, B256};
use alloy_provider::RootProvider;
use anyhow::{anyhow, Context, Result};
use evidence_builder::{
    BlockEvidence, CircuitIndexLookup, EvidenceBuilder, EvidenceConfig, L1RollupProvider,
    L2ChainProvider, ProofRequestOptions, ProofWithHeader, Tier, TierProofLayouts,
    TransitionProvedEvent, ZkevmCircuits,
};
use evidence_rpc::{OnlineAnchorTxValidator, OnlineL1RollupProvider, OnlineL2ChainProvider};
use tracing::info;

type OnlineEvidenceBuilder = EvidenceBuilder<
    OnlineL2ChainProvider<RootProvider>,
    OnlineL1RollupProvider<RootProvider>,
    OnlineAnchorTxValidator<RootProvider>,
    ZkevmCircuits,
>;

impl Command {
    /// Runs the command, printing its result to stdout.
    pub async fn run(self) -> Result<()> {
        match self {
            Self::Submission(args) => {
                let evidence = submission(args).await?;
                print_evidence(&evidence)
            }
            Self::Contest(args) => {
                let evidence = contest(args).await?;
                print_evidence(&evidence)
            }
            Self::EncodeProof(args) => {
                println!("{}", encode_proof(&args)?);
                Ok(())
            }
            Self::DecodeProof(args) => {
                let (circuit_index, proof) = decode_proof(&args)?;
                if let Some(index) = circuit_index {
                    println!("circuit index: {index}");
                }
                println!("proof: {proof}");
                Ok(())
            }
        }
    }
}

/// Providers of the online commands, sharing one connection per node.
#[derive(Debug, Clone)]
struct OnlineProviders {
    l1: OnlineL1RollupProvider<RootProvider>,
    l2: OnlineL2ChainProvider<RootProvider>,
}

impl OnlineProviders {
    fn new(chain: &ChainArgs) -> Self {
        let timeout = chain.timeout();
        Self {
            l1: OnlineL1RollupProvider::new_http(
                chain.l1_node_address.clone(),
                chain.taiko_l1_address,
                timeout,
            ),
            l2: OnlineL2ChainProvider::new_http(chain.l2_node_address.clone(), timeout),
        }
    }

    fn builder(&self, chain: &ChainArgs, circuits: ZkevmCircuits) -> OnlineEvidenceBuilder {
        let anchor_validator =
            OnlineAnchorTxValidator::new(self.l2.clone(), chain.taiko_l2_address)
                .with_golden_touch(chain.golden_touch_address);

        EvidenceBuilder::new(
            self.l2.clone(),
            self.l1.clone(),
            anchor_validator,
            circuits,
            EvidenceConfig::new(&chain.graffiti),
        )
    }
}

/// Collects the proof request options of `block_id` from L1 and L2 and builds its evidence.
pub async fn submission(args: SubmissionArgs) -> Result<BlockEvidence> {
    let chain = &args.chain;
    let providers = OnlineProviders::new(chain);

    let header = providers
        .l2
        .header_by_number(args.block_id)
        .await
        .with_context(|| format!("fetching L2 header {}", args.block_id))?;
    let signal_root = providers
        .l2
        .storage_root(chain.l2_signal_service_address, args.block_id)
        .await
        .with_context(|| format!("fetching L2 signal root of block {}", args.block_id))?;
    let info = providers
        .l1
        .block_info(args.block_id)
        .await
        .with_context(|| format!("fetching TaikoL1 block {}", args.block_id))?;

    let opts = ProofRequestOptions {
        meta_hash: info.meta_hash,
        parent_hash: header.parent_hash,
        block_hash: header.hash_slow(),
        signal_root,
    };
    info!(target: "evidence_cli", block_id = args.block_id, ?opts, "Collected proof request options");

    let proof = ProofWithHeader {
        block_id: args.block_id,
        header,
        opts,
        proof: args.proof,
        degree: args.degree,
        tier: args.tier,
    };

    Ok(providers
        .builder(chain, args.circuits.registry())
        .for_submission(&proof)
        .await?)
}

/// Builds the evidence contesting the latest transition TaikoL1 recorded as
/// proven for `block_id`, optionally narrowed down by parent hash and tier.
pub async fn contest(args: ContestArgs) -> Result<BlockEvidence> {
    let chain = &args.chain;
    let providers = OnlineProviders::new(chain);

    let events = providers
        .l1
        .transitions_proved(args.block_id, args.from_l1_block)
        .await
        .with_context(|| format!("fetching TransitionProved events of block {}", args.block_id))?;
    let event = select_transition(events, args.parent_hash, args.tier).ok_or_else(|| {
        anyhow!(
            "no matching TransitionProved event for block {} since L1 block {}",
            args.block_id,
            args.from_l1_block
        )
    })?;
    info!(
        target: "evidence_cli",
        block_id = event.block_id,
        parent_hash = %event.parent_hash,
        prover = %event.prover,
        tier = %event.tier,
        "Contesting transition"
    );

    let header = providers
        .l2
        .header_by_number(args.block_id)
        .await
        .with_context(|| format!("fetching L2 header {}", args.block_id))?;

    Ok(providers
        .builder(chain, ZkevmCircuits::default())
        .for_contest(&header, chain.l2_signal_service_address, &event)
        .await?)
}

/// Picks the most recent event matching the filters.
fn select_transition(
    events: Vec<TransitionProvedEvent>,
    parent_hash: Option<B256>,
    tier: Option<Tier>,
) -> Option<TransitionProvedEvent> {
    events.into_iter().rev().find(|event| {
        parent_hash.is_none_or(|hash| event.parent_hash == hash)
            && tier.is_none_or(|tier| event.tier == tier)
    })
}

/// Lays out the raw proof for its tier.
pub fn encode_proof(args: &EncodeProofArgs) -> Result<Bytes> {
    encode_with(args, &TierProofLayouts::default(), &args.circuits.registry())
}

fn encode_with(
    args: &EncodeProofArgs,
    layouts: &TierProofLayouts,
    circuits: &impl CircuitIndexLookup,
) -> Result<Bytes> {
    layouts
        .layout(args.tier)
        .encode(&args.proof, args.degree, circuits)
        .ok_or_else(|| anyhow!("unsupported degree {} for tier {}", args.degree, args.tier))
}

/// Splits a submitted proof according to its tier.
pub fn decode_proof(args: &DecodeProofArgs) -> Result<(Option<u16>, Bytes)> {
    let decoded = TierProofLayouts::default()
        .layout(args.tier)
        .decode(&args.proof)?;
    Ok((decoded.circuit_index, decoded.proof))
}

fn print_evidence(evidence: &BlockEvidence) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(evidence)?);
    println!("abi: {}", hex::encode_prefixed(evidence.abi_encode()));
    Ok(())
}
