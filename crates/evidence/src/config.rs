//! Configuration held by the [crate::EvidenceBuilder] for its whole lifetime.

use crate::TierProofLayouts;
use alloy_primitives::B256;

/// Immutable builder configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvidenceConfig {
    /// Tag embedded in every submitted evidence.
    pub graffiti: B256,
    /// Proof layout of each tier.
    pub layouts: TierProofLayouts,
}

impl EvidenceConfig {
    /// Creates a configuration with the default tier layouts.
    pub fn new(graffiti: &str) -> Self {
        Self {
            graffiti: graffiti_from_str(graffiti),
            layouts: TierProofLayouts::default(),
        }
    }

    /// Replaces the tier layouts.
    pub fn with_layouts(mut self, layouts: TierProofLayouts) -> Self {
        self.layouts = layouts;
        self
    }
}

/// Copies the utf-8 bytes of `graffiti` into a zeroed 32 bytes buffer.
/// Anything beyond 32 bytes is dropped.
pub fn graffiti_from_str(graffiti: &str) -> B256 {
    let mut out = B256::ZERO;
    let bytes = graffiti.as_bytes();
    let len = bytes.len().min(B256::len_bytes());
    out[..len].copy_from_slice(&bytes[..len]);
    out
}
