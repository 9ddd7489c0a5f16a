//! Recognizer for the stable-asset withdrawal swap envelope.
//!
//! Withdrawing the stable asset requires swapping some of it for the native
//! gas token through a third-party aggregator. The aggregator instruction
//! cannot be authorized by the per-program rules, so the batch is approved
//! only when it matches one fixed shape: open a wrapped-native associated
//! token account first, close it last, and refund the reclaimed rent to a
//! fee payer the service controls. Everything in between is ignored.

use spl_token::instruction::TokenInstruction;

use crate::config::RelayAuthConfig;
use crate::instruction::RelayInstruction;
use crate::programs::ATA_PROGRAM_PUBKEY;

/// Rent destination position in a token close-account instruction.
const CLOSE_ACCOUNT_DESTINATION_INDEX: usize = 1;

/// Checks whether a batch matches the withdrawal swap envelope.
///
/// The first instruction must create an associated token account and the
/// last must close one through the SPL Token program, refunding rent to a
/// controlled fee payer. A refund to any other address would let the
/// submitter drain the sponsor one rent deposit at a time.
#[must_use]
pub fn is_withdrawal_swap(config: &RelayAuthConfig, instructions: &[RelayInstruction]) -> bool {
    let (Some(first), Some(last)) = (instructions.first(), instructions.last()) else {
        return false;
    };
    if instructions.len() < 2 {
        return false;
    }
    is_create_ata_instruction(first) && is_close_to_fee_payer(config, last)
}

/// An associated token account creation, with either no payload or one of
/// the benign create discriminants (0 = create, 1 = create idempotent).
fn is_create_ata_instruction(instruction: &RelayInstruction) -> bool {
    instruction.program_id == ATA_PROGRAM_PUBKEY
        && matches!(instruction.discriminant(), None | Some(0) | Some(1))
}

/// A token close-account instruction whose rent destination is a controlled
/// fee payer.
fn is_close_to_fee_payer(config: &RelayAuthConfig, instruction: &RelayInstruction) -> bool {
    if instruction.program_id != spl_token::ID {
        return false;
    }
    if !matches!(
        TokenInstruction::unpack(&instruction.data),
        Ok(TokenInstruction::CloseAccount)
    ) {
        return false;
    }
    instruction
        .account(CLOSE_ACCOUNT_DESTINATION_INDEX)
        .is_some_and(|destination| config.is_fee_payer(&destination))
}
