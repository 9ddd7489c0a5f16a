//! Feature flag seam.
//!
//! The engine asks the flag provider one question: is the stable-asset
//! withdrawal special case enabled for this caller? A provider outage must
//! disable the special case, never enable it, so lookups are fail-closed.

use std::collections::HashSet;

use crate::error::FlagError;

/// Flag gating the withdrawal swap special case in batch authorization.
pub const WITHDRAWAL_SWAP_FLAG: &str = "stable_withdrawal_swap";

/// Boolean flag lookup keyed by flag name and optional user id.
#[async_trait::async_trait]
pub trait FeatureFlagSource: Send + Sync {
    /// Returns whether `flag` is enabled, optionally per `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`FlagError`] when the provider is unavailable. Callers treat
    /// that as the flag being disabled.
    async fn is_enabled(&self, flag: &str, user_id: Option<&str>) -> Result<bool, FlagError>;
}

/// Evaluates a flag with the documented safe default: provider failure
/// reads as disabled.
pub async fn is_enabled_or_default<F: FeatureFlagSource>(
    source: &F,
    flag: &str,
    user_id: Option<&str>,
) -> bool {
    match source.is_enabled(flag, user_id).await {
        Ok(enabled) => enabled,
        Err(error) => {
            tracing::warn!(flag, %error, "Feature flag lookup failed, treating as disabled");
            false
        }
    }
}

/// Fixed in-memory flag source for tests and static deployments.
#[derive(Debug, Default, Clone)]
pub struct StaticFlagSource {
    enabled: HashSet<String>,
}

impl StaticFlagSource {
    /// Creates a source with the given flags enabled for every user.
    #[must_use]
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait::async_trait]
impl FeatureFlagSource for StaticFlagSource {
    async fn is_enabled(&self, flag: &str, _user_id: Option<&str>) -> Result<bool, FlagError> {
        Ok(self.enabled.contains(flag))
    }
}

#[cfg(test)]
pub(crate) struct FailingFlagSource;

#[cfg(test)]
#[async_trait::async_trait]
impl FeatureFlagSource for FailingFlagSource {
    async fn is_enabled(&self, _flag: &str, _user_id: Option<&str>) -> Result<bool, FlagError> {
        Err(FlagError("provider unreachable".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticFlagSource::new([WITHDRAWAL_SWAP_FLAG]);
        assert!(source.is_enabled(WITHDRAWAL_SWAP_FLAG, None).await.unwrap());
        assert!(!source.is_enabled("other_flag", Some("user")).await.unwrap());
    }

    #[tokio::test]
    async fn test_provider_failure_reads_disabled() {
        assert!(!is_enabled_or_default(&FailingFlagSource, WITHDRAWAL_SWAP_FLAG, None).await);
    }
}
