//! Engine error types.
//!
//! Allow/Deny outcomes are ordinary return values, never errors. Errors are
//! reserved for infrastructure faults that must surface to the relay route
//! rather than collapse into a decision.

use solana_pubkey::Pubkey;

/// Faults raised while authorizing a batch.
#[derive(Debug, thiserror::Error)]
pub enum RelayAuthError {
    /// Deriving the claimable-token authority for a mint failed. The batch
    /// must not be approved on this path; the fault surfaces to the caller.
    #[error("Authority derivation failed for mint {mint}: {reason}")]
    AuthorityDerivation {
        /// Mint whose authority could not be derived.
        mint: Pubkey,
        /// Underlying failure description.
        reason: String,
    },
}

/// Error from a feature flag provider lookup.
///
/// Always recovered locally: a failed lookup evaluates as the flag being
/// disabled.
#[derive(Debug, thiserror::Error)]
#[error("Feature flag lookup failed: {0}")]
pub struct FlagError(pub String);

/// Error from a social proof lookup.
#[derive(Debug, thiserror::Error)]
#[error("Social proof lookup failed: {0}")]
pub struct SocialProofError(pub String);
