//! Per-mint authority resolution for the claimable tokens program.
//!
//! The claimable tokens program controls user banks through a program
//! derived address seeded by the mint. The derivation is deterministic, so
//! results are memoized for the life of the resolver. Concurrent callers
//! racing on an uncached mint each derive the same value; the last write
//! wins with identical bytes, so the cache needs no exclusion lock.

use dashmap::DashMap;
use solana_pubkey::Pubkey;

use crate::error::RelayAuthError;

/// Source of derived claimable-token authorities.
///
/// The seam exists so the engine can be tested with canned or failing
/// resolvers; production uses [`PdaAuthorityResolver`].
#[async_trait::async_trait]
pub trait AuthorityResolver: Send + Sync {
    /// Returns the authority address controlling user banks for `mint`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayAuthError::AuthorityDerivation`] when the derivation
    /// cannot be performed. A failed derivation must never resolve to an
    /// approval.
    async fn authority_for_mint(&self, mint: &Pubkey) -> Result<Pubkey, RelayAuthError>;
}

/// Resolver deriving authorities as program derived addresses, with a
/// process-lifetime cache keyed by mint.
#[derive(Debug)]
pub struct PdaAuthorityResolver {
    program_id: Pubkey,
    cache: DashMap<Pubkey, Pubkey>,
}

impl PdaAuthorityResolver {
    /// Creates a resolver for the given claimable tokens program.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            cache: DashMap::new(),
        }
    }
}

#[async_trait::async_trait]
impl AuthorityResolver for PdaAuthorityResolver {
    async fn authority_for_mint(&self, mint: &Pubkey) -> Result<Pubkey, RelayAuthError> {
        if let Some(cached) = self.cache.get(mint) {
            return Ok(*cached);
        }
        let (authority, _) = Pubkey::find_program_address(&[mint.as_ref()], &self.program_id);
        tracing::debug!(%mint, %authority, "Derived claimable token authority");
        self.cache.insert(*mint, authority);
        Ok(authority)
    }
}
