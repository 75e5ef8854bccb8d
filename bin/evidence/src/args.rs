use alloy_primitives::{Address, Bytes, B256};
use clap::{ArgAction, Args, Parser, Subcommand};
use core::time::Duration;
use evidence_builder::{Tier, ZkevmCircuits};
use evidence_rpc::GOLDEN_TOUCH_ADDRESS;
use url::Url;

/// The evidence binary CLI application arguments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct EvidenceCli {
    /// Verbosity level (0-2)
    #[arg(long, short, action = ArgAction::Count)]
    pub v: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// What to build.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Build the evidence submitting a proof of an L2 block.
    Submission(SubmissionArgs),
    /// Build the evidence contesting a proven transition.
    Contest(ContestArgs),
    /// Lay out a raw proof the way its tier is submitted.
    EncodeProof(EncodeProofArgs),
    /// Split a submitted proof back into circuit index and raw proof.
    DecodeProof(DecodeProofArgs),
}

/// Nodes and contracts the online commands read from.
#[derive(Args, Debug, Clone)]
pub struct ChainArgs {
    /// URL of the L1 execution node.
    #[arg(long, visible_alias = "l1", env)]
    pub l1_node_address: Url,

    /// URL of the L2 execution node.
    #[arg(long, visible_alias = "l2", env)]
    pub l2_node_address: Url,

    /// Address of the TaikoL1 contract.
    #[arg(long, env)]
    pub taiko_l1_address: Address,

    /// Address of the TaikoL2 contract.
    #[arg(long, env)]
    pub taiko_l2_address: Address,

    /// Address of the L2 signal service.
    #[arg(long, env)]
    pub l2_signal_service_address: Address,

    /// Expected signer of anchor transactions.
    #[arg(long, env, default_value_t = GOLDEN_TOUCH_ADDRESS)]
    pub golden_touch_address: Address,

    /// Prover tag put into submitted evidence, at most 32 bytes are kept.
    #[arg(long, env, default_value = "")]
    pub graffiti: String,

    /// Seconds to wait for a single RPC answer.
    #[arg(long, env, default_value_t = 30)]
    pub rpc_timeout: u64,
}

impl ChainArgs {
    /// Returns the RPC timeout.
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout)
    }
}

/// Parses a `degree=index` circuit registration.
pub fn parse_circuit(s: &str) -> Result<(u64, u16), String> {
    let (degree, index) = s
        .split_once('=')
        .ok_or_else(|| format!("expected <degree>=<index>, got {s:?}"))?;
    let degree = degree
        .trim()
        .parse()
        .map_err(|e| format!("invalid degree {degree:?}: {e}"))?;
    let index = index
        .trim()
        .parse()
        .map_err(|e| format!("invalid circuit index {index:?}: {e}"))?;
    Ok((degree, index))
}

/// Circuit registrations on top of the default ones.
#[derive(Args, Debug, Clone, Default)]
pub struct CircuitArgs {
    /// Registers the circuit index of a degree, as `<degree>=<index>`. Repeatable.
    #[arg(long = "circuit", value_parser = parse_circuit)]
    pub circuits: Vec<(u64, u16)>,
}

impl CircuitArgs {
    /// Returns the default circuits extended, or overridden, by the registrations.
    pub fn registry(&self) -> ZkevmCircuits {
        self.circuits
            .iter()
            .fold(ZkevmCircuits::default(), |circuits, &(degree, index)| {
                circuits.with_circuit(degree, index)
            })
    }
}

/// Arguments of the `submission` command.
#[derive(Args, Debug, Clone)]
pub struct SubmissionArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// L2 block the proof is for.
    #[arg(long)]
    pub block_id: u64,

    /// Tier of the proof, by id or name.
    #[arg(long)]
    pub tier: Tier,

    /// Hex encoded raw proof.
    #[arg(long)]
    pub proof: Bytes,

    /// Degree of the circuit that produced the proof.
    #[arg(long, default_value_t = 0)]
    pub degree: u64,

    #[command(flatten)]
    pub circuits: CircuitArgs,
}

/// Arguments of the `contest` command.
#[derive(Args, Debug, Clone)]
pub struct ContestArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// L2 block of the proven transition.
    #[arg(long)]
    pub block_id: u64,

    /// Only contest a transition proven on top of this parent hash.
    #[arg(long)]
    pub parent_hash: Option<B256>,

    /// Only contest a transition proven with this tier, by id or name.
    #[arg(long)]
    pub tier: Option<Tier>,

    /// First L1 block searched for `TransitionProved` events.
    #[arg(long, env, default_value_t = 0)]
    pub from_l1_block: u64,
}

/// Arguments of the `encode-proof` command.
#[derive(Args, Debug, Clone)]
pub struct EncodeProofArgs {
    /// Tier of the proof, by id or name.
    #[arg(long)]
    pub tier: Tier,

    /// Hex encoded raw proof.
    #[arg(long)]
    pub proof: Bytes,

    /// Degree of the circuit that produced the proof.
    #[arg(long, default_value_t = 0)]
    pub degree: u64,

    #[command(flatten)]
    pub circuits: CircuitArgs,
}

/// Arguments of the `decode-proof` command.
#[derive(Args, Debug, Clone)]
pub struct DecodeProofArgs {
    /// Tier of the proof, by id or name.
    #[arg(long)]
    pub tier: Tier,

    /// Hex encoded submitted proof.
    #[arg(long)]
    pub proof: Bytes,
}
