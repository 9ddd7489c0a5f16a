//! Social proof gate for token transfers.
//!
//! Independent of batch authorization, the relay route additionally
//! requires a verified social identity before sponsoring a user bank
//! transfer, to raise the cost of sybil abuse. The engine exposes the two
//! predicates; combining them with the route's session handling is the
//! caller's concern.

use crate::config::RelayAuthConfig;
use crate::error::SocialProofError;
use crate::instruction::RelayInstruction;
use crate::rules::claimable_tokens;

/// Backing store for verified social account links.
#[async_trait::async_trait]
pub trait SocialProofSource: Send + Sync {
    /// Returns whether the user has at least one verified social account.
    ///
    /// # Errors
    ///
    /// Returns [`SocialProofError`] when the store is unavailable.
    async fn has_linked_social_account(&self, user_id: &str) -> Result<bool, SocialProofError>;
}

/// Checks whether a batch is a user bank transfer.
///
/// A send batch leads with a signature verification instruction, so the
/// transfer itself sits at index 1.
#[must_use]
pub fn is_send_instruction(config: &RelayAuthConfig, instructions: &[RelayInstruction]) -> bool {
    instructions.get(1).is_some_and(|instruction| {
        instruction.program_id == config.claimable_tokens_program_id
            && instruction.discriminant() == Some(claimable_tokens::TRANSFER)
    })
}

/// Gate combining a social proof source with fail-closed evaluation.
#[derive(Debug)]
pub struct SocialProofGate<S> {
    source: S,
}

impl<S: SocialProofSource> SocialProofGate<S> {
    /// Creates a gate over the given source.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// Returns whether a send may be relayed for this user. Store failures
    /// read as no proof on record.
    pub async fn allows_send(&self, user_id: &str) -> bool {
        match self.source.has_linked_social_account(user_id).await {
            Ok(linked) => linked,
            Err(error) => {
                tracing::warn!(user_id, %error, "Social proof lookup failed, treating as unproven");
                false
            }
        }
    }
}
