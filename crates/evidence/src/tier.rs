//! Proof tiers known by the settlement contract.

use core::{fmt, str::FromStr};
use serde::{Deserialize, Serialize};

/// Identifies the proof system that produced, and verifies, a piece of evidence.
/// A higher tier can contest and overwrite a transition proven with a lower one.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Tier(pub u16);

impl Tier {
    /// Optimistic tier, the proof is empty.
    pub const OPTIMISTIC: Self = Self(100);
    /// Proof is a SGX enclave signature.
    pub const SGX: Self = Self(200);
    /// Proof is a PSE zkEVM circuit proof.
    pub const PSE_ZKEVM: Self = Self(300);
    /// Proof combines a SGX signature with a PSE zkEVM circuit proof.
    pub const SGX_AND_PSE_ZKEVM: Self = Self(400);
    /// Proof is signed by the guardian multisig.
    pub const GUARDIAN: Self = Self(1000);

    /// Every tier the settlement contract is deployed with.
    pub const KNOWN: [Self; 5] = [
        Self::OPTIMISTIC,
        Self::SGX,
        Self::PSE_ZKEVM,
        Self::SGX_AND_PSE_ZKEVM,
        Self::GUARDIAN,
    ];

    /// Returns the on-chain tier id.
    pub const fn id(self) -> u16 {
        self.0
    }

    /// Returns the canonical name of a known tier.
    pub const fn name(self) -> Option<&'static str> {
        match self {
            Self::OPTIMISTIC => Some("optimistic"),
            Self::SGX => Some("sgx"),
            Self::PSE_ZKEVM => Some("pse_zkevm"),
            Self::SGX_AND_PSE_ZKEVM => Some("sgx_and_pse_zkevm"),
            Self::GUARDIAN => Some("guardian"),
            _ => None,
        }
    }
}

impl From<u16> for Tier {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl From<Tier> for u16 {
    fn from(tier: Tier) -> Self {
        tier.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}({})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

/// Error returned when a tier is neither a known name nor a numeric id.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier {0:?}")]
pub struct ParseTierError(pub String);

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = s.parse::<u16>() {
            return Ok(Self(id));
        }
        let name = s.to_ascii_lowercase().replace(['-', '+'], "_");
        Self::KNOWN
            .into_iter()
            .find(|tier| tier.name() == Some(name.as_str()))
            .ok_or_else(|| ParseTierError(s.to_string()))
    }
}
