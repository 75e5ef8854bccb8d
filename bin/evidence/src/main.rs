//! Main entrypoint for the evidence binary.

use anyhow::Result;
use clap::Parser;
use evidence_cli::{args::EvidenceCli, init_tracing_subscriber};
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let cli = EvidenceCli::parse();
    init_tracing_subscriber(cli.v)?;

    if let Err(e) = cli.command.run().await {
        error!(target: "evidence_cli", "Exited with an error: {:?}", e);
        return Err(e);
    }
    Ok(())
}
