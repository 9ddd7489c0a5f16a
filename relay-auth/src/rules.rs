//! Per-instruction authority rules.
//!
//! Each governed program maps instruction discriminants to an
//! [`AccountIndexRule`]: the index of the account that must equal an
//! expected authority, an explicit "nothing to check", or an explicit
//! "never relayable". The three meanings are separate variants rather than
//! an overloaded nullable integer so that "no check needed" can never be
//! confused with "check failed".

use solana_pubkey::Pubkey;

use crate::authority::AuthorityResolver;
use crate::config::RelayAuthConfig;
use crate::error::RelayAuthError;
use crate::instruction::RelayInstruction;
use crate::programs::{KnownProgram, known_program};

/// Relayable discriminants of the rewards manager program.
pub mod reward_manager {
    /// Adds an attestation sender, signed by existing senders.
    pub const CREATE_SENDER_PUBLIC: u8 = 4;
    /// Removes an attestation sender, signed by existing senders.
    pub const DELETE_SENDER_PUBLIC: u8 = 5;
    /// Submits a reward attestation.
    pub const SUBMIT_ATTESTATION: u8 = 6;
    /// Evaluates collected attestations and disburses a reward.
    pub const EVALUATE_ATTESTATIONS: u8 = 7;
}

/// Discriminants of the claimable tokens program.
pub mod claimable_tokens {
    /// Creates a user bank token account.
    pub const CREATE: u8 = 0;
    /// Transfers from a user bank, authorized by a signed message.
    pub const TRANSFER: u8 = 1;
}

/// What an instruction must satisfy at a given account position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountIndexRule {
    /// The account at this index must equal the expected authority.
    Index(usize),
    /// No authority check applies; the instruction passes this rule.
    NotApplicable,
    /// The discriminant is recognized but never relayable.
    AlwaysDeny,
}

/// Outcome of evaluating a single instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The instruction satisfied its program's authority rule.
    Allow,
    /// The instruction failed its rule or targets an unknown program.
    Deny,
    /// The program carries no authority semantics; membership in the
    /// allowlist is sufficient.
    NotApplicable,
}

/// Rewards manager rule table: discriminant to base-account index.
#[must_use]
pub const fn reward_manager_rule(discriminant: u8) -> AccountIndexRule {
    match discriminant {
        reward_manager::CREATE_SENDER_PUBLIC | reward_manager::DELETE_SENDER_PUBLIC => {
            AccountIndexRule::Index(0)
        }
        reward_manager::SUBMIT_ATTESTATION | reward_manager::EVALUATE_ATTESTATIONS => {
            AccountIndexRule::Index(1)
        }
        // Init, change-manager and the owner-gated create/delete sender
        // variants require owner-level trust, as does anything unrecognized.
        _ => AccountIndexRule::AlwaysDeny,
    }
}

/// Claimable tokens rule table: discriminant to authority index.
#[must_use]
pub const fn claimable_tokens_rule(discriminant: u8) -> AccountIndexRule {
    match discriminant {
        claimable_tokens::CREATE => AccountIndexRule::Index(2),
        claimable_tokens::TRANSFER => AccountIndexRule::Index(4),
        _ => AccountIndexRule::AlwaysDeny,
    }
}

/// Checks an instruction's account at the rule's index against an expected
/// authority.
///
/// `NotApplicable` passes unconditionally; `AlwaysDeny` and out-of-bounds
/// indices fail unconditionally.
#[must_use]
pub fn account_matches(
    instruction: &RelayInstruction,
    rule: AccountIndexRule,
    expected: &Pubkey,
) -> bool {
    match rule {
        AccountIndexRule::NotApplicable => true,
        AccountIndexRule::AlwaysDeny => false,
        AccountIndexRule::Index(index) => instruction
            .account(index)
            .is_some_and(|account| account == *expected),
    }
}

/// Evaluates one instruction against the program rules.
///
/// # Errors
///
/// Returns [`RelayAuthError`] when authority derivation fails; the
/// instruction is never allowed on that path.
pub async fn evaluate_instruction<R: AuthorityResolver>(
    config: &RelayAuthConfig,
    resolver: &R,
    instruction: &RelayInstruction,
) -> Result<Verdict, RelayAuthError> {
    match known_program(config, &instruction.program_id) {
        KnownProgram::RewardManager => {
            let Some(discriminant) = instruction.discriminant() else {
                return Ok(Verdict::Deny);
            };
            let rule = reward_manager_rule(discriminant);
            if account_matches(instruction, rule, &config.reward_manager_state) {
                Ok(Verdict::Allow)
            } else {
                tracing::debug!(
                    program = %instruction.program_id,
                    discriminant,
                    "Rewards manager instruction failed base account check"
                );
                Ok(Verdict::Deny)
            }
        }
        KnownProgram::ClaimableTokens => {
            let Some(discriminant) = instruction.discriminant() else {
                return Ok(Verdict::Deny);
            };
            let rule = claimable_tokens_rule(discriminant);
            // The one program services two token types; an instruction
            // referencing either derived authority is acceptable.
            let token_authority = resolver.authority_for_mint(&config.token_mint).await?;
            let stable_authority = resolver.authority_for_mint(&config.stable_mint).await?;
            if account_matches(instruction, rule, &token_authority)
                || account_matches(instruction, rule, &stable_authority)
            {
                Ok(Verdict::Allow)
            } else {
                tracing::debug!(
                    program = %instruction.program_id,
                    discriminant,
                    "Claimable tokens instruction failed authority check"
                );
                Ok(Verdict::Deny)
            }
        }
        KnownProgram::Unknown => Ok(Verdict::Deny),
        KnownProgram::Token
        | KnownProgram::AssociatedTokenAccount
        | KnownProgram::Secp256k1
        | KnownProgram::Memo
        | KnownProgram::AnchorData => Ok(Verdict::NotApplicable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authority::PdaAuthorityResolver;
    use crate::config::test_config;
    use crate::instruction::RelayAccountMeta;
    use crate::programs::SECP256K1_PROGRAM_PUBKEY;

    fn instruction(program_id: Pubkey, data: Vec<u8>, keys: Vec<Pubkey>) -> RelayInstruction {
        RelayInstruction {
            program_id,
            data,
            keys: keys
                .into_iter()
                .map(|pubkey| RelayAccountMeta {
                    pubkey,
                    is_signer: false,
                    is_writable: false,
                })
                .collect(),
        }
    }

    #[test]
    fn test_account_matches_not_applicable_ignores_instruction() {
        let empty = instruction(Pubkey::new_unique(), vec![], vec![]);
        assert!(account_matches(
            &empty,
            AccountIndexRule::NotApplicable,
            &Pubkey::new_unique()
        ));
    }

    #[test]
    fn test_account_matches_always_deny() {
        let expected = Pubkey::new_unique();
        let ix = instruction(Pubkey::new_unique(), vec![], vec![expected]);
        assert!(!account_matches(&ix, AccountIndexRule::AlwaysDeny, &expected));
    }

    #[test]
    fn test_account_matches_out_of_bounds() {
        let expected = Pubkey::new_unique();
        let ix = instruction(Pubkey::new_unique(), vec![], vec![expected]);
        assert!(!account_matches(&ix, AccountIndexRule::Index(5), &expected));
    }

    #[test]
    fn test_account_matches_equality() {
        let expected = Pubkey::new_unique();
        let ix = instruction(
            Pubkey::new_unique(),
            vec![],
            vec![Pubkey::new_unique(), expected],
        );
        assert!(account_matches(&ix, AccountIndexRule::Index(1), &expected));
        assert!(!account_matches(&ix, AccountIndexRule::Index(0), &expected));
    }

    #[test]
    fn test_reward_manager_table() {
        assert_eq!(reward_manager_rule(4), AccountIndexRule::Index(0));
        assert_eq!(reward_manager_rule(5), AccountIndexRule::Index(0));
        assert_eq!(reward_manager_rule(6), AccountIndexRule::Index(1));
        assert_eq!(reward_manager_rule(7), AccountIndexRule::Index(1));
        for admin in [0, 1, 2, 3, 8, 200] {
            assert_eq!(reward_manager_rule(admin), AccountIndexRule::AlwaysDeny);
        }
    }

    #[test]
    fn test_claimable_tokens_table() {
        assert_eq!(claimable_tokens_rule(0), AccountIndexRule::Index(2));
        assert_eq!(claimable_tokens_rule(1), AccountIndexRule::Index(4));
        assert_eq!(claimable_tokens_rule(2), AccountIndexRule::AlwaysDeny);
    }

    #[tokio::test]
    async fn test_reward_manager_base_account_mismatch_denies() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let ix = instruction(
            config.reward_manager_program_id,
            vec![reward_manager::CREATE_SENDER_PUBLIC],
            vec![Pubkey::new_unique()],
        );
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::Deny);
    }

    #[tokio::test]
    async fn test_reward_manager_valid_state_allows() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let ix = instruction(
            config.reward_manager_program_id,
            vec![reward_manager::SUBMIT_ATTESTATION],
            vec![Pubkey::new_unique(), config.reward_manager_state],
        );
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::Allow);
    }

    #[tokio::test]
    async fn test_reward_manager_admin_op_denied_even_with_state() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        // Init carries the state account but is owner-gated.
        let ix = instruction(
            config.reward_manager_program_id,
            vec![0],
            vec![config.reward_manager_state, config.reward_manager_state],
        );
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::Deny);
    }

    #[tokio::test]
    async fn test_claimable_tokens_accepts_either_authority() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let token_authority = Pubkey::find_program_address(
            &[config.token_mint.as_ref()],
            &config.claimable_tokens_program_id,
        )
        .0;
        let stable_authority = Pubkey::find_program_address(
            &[config.stable_mint.as_ref()],
            &config.claimable_tokens_program_id,
        )
        .0;
        for authority in [token_authority, stable_authority] {
            let ix = instruction(
                config.claimable_tokens_program_id,
                vec![claimable_tokens::CREATE],
                vec![Pubkey::new_unique(), Pubkey::new_unique(), authority],
            );
            let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
            assert_eq!(verdict, Verdict::Allow);
        }
    }

    #[tokio::test]
    async fn test_claimable_tokens_foreign_authority_denies() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let ix = instruction(
            config.claimable_tokens_program_id,
            vec![claimable_tokens::TRANSFER],
            vec![
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
                Pubkey::new_unique(),
            ],
        );
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::Deny);
    }

    #[tokio::test]
    async fn test_missing_discriminant_on_governed_program_denies() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        for program in [
            config.reward_manager_program_id,
            config.claimable_tokens_program_id,
        ] {
            let ix = instruction(program, vec![], vec![config.reward_manager_state]);
            let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
            assert_eq!(verdict, Verdict::Deny);
        }
    }

    #[tokio::test]
    async fn test_allowlisted_program_not_applicable() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let ix = instruction(SECP256K1_PROGRAM_PUBKEY, vec![1, 2, 3], vec![]);
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::NotApplicable);
    }

    #[tokio::test]
    async fn test_unknown_program_denies() {
        let config = test_config();
        let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
        let ix = instruction(Pubkey::new_unique(), vec![], vec![]);
        let verdict = evaluate_instruction(&config, &resolver, &ix).await.unwrap();
        assert_eq!(verdict, Verdict::Deny);
    }
}
