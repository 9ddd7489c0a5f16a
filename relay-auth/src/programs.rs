//! Program identities the relay understands.
//!
//! Classification is a closed enumeration so that adding an authorized
//! program is an exhaustive-match change rather than a string-keyed branch.

use solana_pubkey::{Pubkey, pubkey};

use crate::config::RelayAuthConfig;
use crate::instruction::RelayInstruction;

/// Associated Token Account program public key.
pub const ATA_PROGRAM_PUBKEY: Pubkey = pubkey!("ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// secp256k1 signature verification precompile.
pub const SECP256K1_PROGRAM_PUBKEY: Pubkey =
    pubkey!("KeccakSecp256k11111111111111111111111111111");

/// Memo program (v1).
pub const MEMO_PROGRAM_PUBKEY: Pubkey = pubkey!("Memo1UhkJRfHyvLMcVucJwxXeuD728EqVDDwQDxFMNo");

/// Memo program (v2).
pub const MEMO_V2_PROGRAM_PUBKEY: Pubkey = pubkey!("MemoSq4gqABAXKb96qnH8TysNcWxMyWCqXgDLGmfcHr");

/// Program families the authorization engine distinguishes.
///
/// The first two carry per-discriminant authority rules; the remainder are
/// allowlisted without further inspection. Anything else is `Unknown` and
/// never relayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownProgram {
    /// The rewards manager program, governed by the base-account rules.
    RewardManager,
    /// The claimable tokens (user bank) program, governed by the
    /// derived-authority rules.
    ClaimableTokens,
    /// The SPL Token program.
    Token,
    /// The associated token account creation program.
    AssociatedTokenAccount,
    /// The secp256k1 signature verification precompile.
    Secp256k1,
    /// Either memo program.
    Memo,
    /// The configured anchor data program, when present.
    AnchorData,
    /// Any program the relay does not recognize.
    Unknown,
}

/// Classifies a program id against the configured program set.
#[must_use]
pub fn known_program(config: &RelayAuthConfig, program_id: &Pubkey) -> KnownProgram {
    if *program_id == config.reward_manager_program_id {
        KnownProgram::RewardManager
    } else if *program_id == config.claimable_tokens_program_id {
        KnownProgram::ClaimableTokens
    } else if *program_id == spl_token::ID {
        KnownProgram::Token
    } else if *program_id == ATA_PROGRAM_PUBKEY {
        KnownProgram::AssociatedTokenAccount
    } else if *program_id == SECP256K1_PROGRAM_PUBKEY {
        KnownProgram::Secp256k1
    } else if *program_id == MEMO_PROGRAM_PUBKEY || *program_id == MEMO_V2_PROGRAM_PUBKEY {
        KnownProgram::Memo
    } else if config.anchor_data_program_id.as_ref() == Some(program_id) {
        KnownProgram::AnchorData
    } else {
        KnownProgram::Unknown
    }
}

/// Checks whether a program id may appear in a relayed batch at all.
#[must_use]
pub fn is_allowed_program(config: &RelayAuthConfig, program_id: &Pubkey) -> bool {
    known_program(config, program_id) != KnownProgram::Unknown
}

/// Checks that every instruction in the batch targets an allowed program.
#[must_use]
pub fn all_allowed_programs(config: &RelayAuthConfig, instructions: &[RelayInstruction]) -> bool {
    instructions
        .iter()
        .all(|instruction| is_allowed_program(config, &instruction.program_id))
}
