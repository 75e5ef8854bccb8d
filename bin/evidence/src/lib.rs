//! Builds TaikoL1 block evidence from the command line.

pub mod args;

pub mod cmd;

use tracing_subscriber::{filter::LevelFilter, prelude::*, EnvFilter};

/// Targets of the JSON-RPC stack the online commands run on. Every header,
/// proof, log and receipt request is traced by several of them.
const RPC_STACK_TARGETS: [&str; 6] = [
    "hyper",
    "hyper_util",
    "reqwest",
    "alloy_provider",
    "alloy_rpc_client",
    "alloy_transport_http",
];

/// Returns the filter for `verbosity_level`: 0 logs at info, 1 at debug, more at
/// trace. The RPC stack stays at info unless `RUST_LOG` says otherwise.
pub fn env_filter(verbosity_level: u8) -> anyhow::Result<EnvFilter> {
    let level = match verbosity_level {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse("")?;
    for target in RPC_STACK_TARGETS {
        filter = filter.add_directive(format!("{target}=info").parse()?);
    }
    if let Ok(directives) = std::env::var(EnvFilter::DEFAULT_ENV) {
        for directive in directives.split(',').filter(|d| !d.trim().is_empty()) {
            filter = filter.add_directive(directive.trim().parse()?);
        }
    }
    Ok(filter)
}

/// Installs the global subscriber with [env_filter].
pub fn init_tracing_subscriber(verbosity_level: u8) -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(env_filter(verbosity_level)?)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, LevelFilter::INFO)]
    #[case(1, LevelFilter::DEBUG)]
    #[case(2, LevelFilter::TRACE)]
    #[case(7, LevelFilter::TRACE)]
    fn test_env_filter_level(#[case] verbosity: u8, #[case] expected: LevelFilter) {
        let filter = env_filter(verbosity).unwrap();
        let rendered = filter.to_string();

        assert!(rendered.contains(&expected.to_string().to_lowercase()));
        for target in RPC_STACK_TARGETS {
            assert!(rendered.contains(&format!("{target}=info")), "{rendered}");
        }
    }
}
