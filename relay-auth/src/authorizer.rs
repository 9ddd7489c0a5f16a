//! Batch authorization.
//!
//! The final gate between a relay request and the fee payer's signature.
//! Every instruction is evaluated concurrently; a batch is relayable when
//! nothing denies, or when the one recognized withdrawal swap shape
//! overrides a denial under its feature flag.

use futures_util::future::try_join_all;

use crate::authority::AuthorityResolver;
use crate::config::RelayAuthConfig;
use crate::error::RelayAuthError;
use crate::flags::{FeatureFlagSource, WITHDRAWAL_SWAP_FLAG, is_enabled_or_default};
use crate::instruction::RelayInstruction;
use crate::rules::{Verdict, evaluate_instruction};
use crate::withdrawal::is_withdrawal_swap;

/// Decides whether a candidate instruction batch is safe to sponsor.
#[derive(Debug)]
pub struct BatchAuthorizer<R, F> {
    config: RelayAuthConfig,
    resolver: R,
    flags: F,
}

impl<R, F> BatchAuthorizer<R, F>
where
    R: AuthorityResolver,
    F: FeatureFlagSource,
{
    /// Creates an authorizer over the given configuration and seams.
    pub const fn new(config: RelayAuthConfig, resolver: R, flags: F) -> Self {
        Self {
            config,
            resolver,
            flags,
        }
    }

    /// Returns the injected configuration.
    pub const fn config(&self) -> &RelayAuthConfig {
        &self.config
    }

    /// Authorizes a batch. `user_id` feeds feature flag evaluation only.
    ///
    /// Evaluation is dispatched concurrently so one slow authority
    /// derivation does not serialize the batch, and every instruction is
    /// evaluated; there is no early exit on the first denial.
    ///
    /// # Errors
    ///
    /// Returns [`RelayAuthError`] when authority derivation fails. The
    /// caller must treat that as a fault, not a decision.
    pub async fn authorize(
        &self,
        instructions: &[RelayInstruction],
        user_id: Option<&str>,
    ) -> Result<bool, RelayAuthError> {
        let verdicts = try_join_all(
            instructions
                .iter()
                .map(|instruction| evaluate_instruction(&self.config, &self.resolver, instruction)),
        )
        .await?;

        let denied = verdicts.iter().filter(|v| **v == Verdict::Deny).count();
        if denied == 0 {
            return Ok(true);
        }

        // One legitimate flow cannot pass the per-instruction rules: the
        // swap-aggregator leg of a stable-asset withdrawal. Rather than
        // allowlist the aggregator outright, only its fixed envelope is
        // accepted, and only behind the flag.
        if is_enabled_or_default(&self.flags, WITHDRAWAL_SWAP_FLAG, user_id).await
            && is_withdrawal_swap(&self.config, instructions)
        {
            tracing::debug!(denied, "Batch approved as withdrawal swap envelope");
            return Ok(true);
        }

        tracing::debug!(
            denied,
            total = instructions.len(),
            "Batch rejected by instruction rules"
        );
        Ok(false)
    }
}
