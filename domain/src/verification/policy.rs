//! What to do when a verifier model gives no usable answer.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Which of the two verifier models an opinion came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerifierRole {
    Primary,
    Secondary,
}

impl VerifierRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerifierRole::Primary => "primary",
            VerifierRole::Secondary => "secondary",
        }
    }
}

impl std::fmt::Display for VerifierRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Policy applied when a verifier call fails or returns malformed output.
///
/// | Policy | Failed model's opinion | Effect |
/// |--------|------------------------|--------|
/// | `TrustClaim` | copy of the generator's claim | acts as agreement |
/// | `Abstain` | no opinions | other model decides alone |
/// | `Reject` | n/a | whole language batch rejected |
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifierFailurePolicy {
    #[default]
    TrustClaim,
    Abstain,
    Reject,
}

impl VerifierFailurePolicy {
    pub const ALL: [VerifierFailurePolicy; 3] = [
        VerifierFailurePolicy::TrustClaim,
        VerifierFailurePolicy::Abstain,
        VerifierFailurePolicy::Reject,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerifierFailurePolicy::TrustClaim => "trust_claim",
            VerifierFailurePolicy::Abstain => "abstain",
            VerifierFailurePolicy::Reject => "reject",
        }
    }
}

impl std::fmt::Display for VerifierFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for VerifierFailurePolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "trust_claim" | "trust" => Ok(VerifierFailurePolicy::TrustClaim),
            "abstain" => Ok(VerifierFailurePolicy::Abstain),
            "reject" => Ok(VerifierFailurePolicy::Reject),
            _ => Err(DomainError::InvalidPolicy(s.to_string())),
        }
    }
}
