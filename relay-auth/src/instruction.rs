//! Candidate instruction data model.
//!
//! A relay request carries a list of instructions the client wants the
//! service to co-sign and pay for. Instructions arrive fully resolved
//! (program id plus ordered account metas) rather than in compiled message
//! form, and are immutable for the lifetime of the request.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use solana_pubkey::Pubkey;

/// Account reference carried by a candidate instruction.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayAccountMeta {
    /// Referenced account address.
    #[serde_as(as = "DisplayFromStr")]
    pub pubkey: Pubkey,
    /// Whether the account must sign the transaction.
    pub is_signer: bool,
    /// Whether the account may be written to.
    pub is_writable: bool,
}

/// A single instruction submitted for sponsored relay.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayInstruction {
    /// Program the instruction invokes.
    #[serde_as(as = "DisplayFromStr")]
    pub program_id: Pubkey,
    /// Opaque instruction payload. The first byte, when present, is the
    /// discriminant selecting the sub-operation within the program.
    #[serde(default)]
    pub data: Vec<u8>,
    /// Ordered account references.
    #[serde(default)]
    pub keys: Vec<RelayAccountMeta>,
}

impl RelayInstruction {
    /// Returns the instruction discriminant, the first byte of the payload.
    ///
    /// An empty or absent payload yields `None`, which callers must treat
    /// as distinct from discriminant `0`.
    #[must_use]
    pub fn discriminant(&self) -> Option<u8> {
        self.data.first().copied()
    }

    /// Returns the account address at the given index, if in bounds.
    #[must_use]
    pub fn account(&self, index: usize) -> Option<Pubkey> {
        self.keys.get(index).map(|meta| meta.pubkey)
    }
}
