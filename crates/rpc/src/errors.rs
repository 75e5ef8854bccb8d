//! Errors of the online collaborators.

use alloy_primitives::B256;
use core::time::Duration;

/// Errors of the online providers.
#[derive(Debug, thiserror::Error)]
pub enum OnlineProviderError {
    /// The node did not answer in time
    #[error("{method} timed out after {timeout:?}")]
    Timeout {
        /// RPC method
        method: &'static str,
        /// Configured timeout
        timeout: Duration,
    },
    /// The request failed at the transport or the node returned an error
    #[error("{method} failed: {reason}")]
    Transport {
        /// RPC method
        method: &'static str,
        /// Rendered transport error
        reason: String,
    },
    /// The node answered with data that cannot be decoded
    #[error("failed to decode {method} response: {reason}")]
    Decode {
        /// RPC method
        method: &'static str,
        /// Rendered decoding error
        reason: String,
    },
    /// The node does not know the requested block
    #[error("block {0} not found")]
    BlockNotFound(String),
    /// The node does not know the requested receipt
    #[error("receipt of transaction {0} not found")]
    ReceiptNotFound(B256),
}
