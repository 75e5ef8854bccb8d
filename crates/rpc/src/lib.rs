//! Online implementations of the [evidence_builder] collaborators, talking to
//! L1 and L2 execution nodes over JSON-RPC.
#![warn(missing_debug_implementations, missing_docs, unreachable_pub, rustdoc::all)]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

#[macro_use]
extern crate tracing;

pub mod anchor;
pub use anchor::{
    check_anchor_receipt, check_anchor_tx, AnchorTxError, OnlineAnchorTxValidator,
    GOLDEN_TOUCH_ADDRESS,
};

pub mod errors;
pub use errors::OnlineProviderError;

pub mod l1;
pub use l1::OnlineL1RollupProvider;

pub mod l2;
pub use l2::OnlineL2ChainProvider;

use core::{fmt::Display, future::IntoFuture, time::Duration};

/// Upper bound of a single RPC request unless configured otherwise.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Awaits a RPC request, giving up once `timeout` elapsed.
pub(crate) async fn request<F, T, E>(
    method: &'static str,
    timeout: Duration,
    request: F,
) -> Result<T, OnlineProviderError>
where
    F: IntoFuture<Output = Result<T, E>>,
    E: Display,
{
    tokio::time::timeout(timeout, request)
        .await
        .map_err(|_| OnlineProviderError::Timeout { method, timeout })?
        .map_err(|e| OnlineProviderError::Transport {
            method,
            reason: e.to_string(),
        })
}
