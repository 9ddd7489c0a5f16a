//! Engine configuration.
//!
//! All addresses the engine compares against are loaded once at process
//! start and injected as an immutable value. Nothing here is request-scoped,
//! and there is no global singleton; tests construct isolated instances.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use solana_pubkey::Pubkey;

/// Static configuration for the relay authorization engine.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayAuthConfig {
    /// Claimable tokens (user bank) program id.
    #[serde_as(as = "DisplayFromStr")]
    pub claimable_tokens_program_id: Pubkey,

    /// Rewards manager program id.
    #[serde_as(as = "DisplayFromStr")]
    pub reward_manager_program_id: Pubkey,

    /// The single rewards manager state account instructions must reference.
    #[serde_as(as = "DisplayFromStr")]
    pub reward_manager_state: Pubkey,

    /// Addresses the service controls as fee payer. Rent reclaimed by a
    /// close-account instruction must return to one of these.
    #[serde_as(as = "Vec<DisplayFromStr>")]
    pub fee_payer_addresses: Vec<Pubkey>,

    /// Mint of the primary asset serviced by the claimable tokens program.
    #[serde_as(as = "DisplayFromStr")]
    pub token_mint: Pubkey,

    /// Mint of the stable asset serviced by the claimable tokens program.
    #[serde_as(as = "DisplayFromStr")]
    pub stable_mint: Pubkey,

    /// Optional anchor data program allowed in relayed batches.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub anchor_data_program_id: Option<Pubkey>,
}

impl RelayAuthConfig {
    /// Checks whether an address is one of the controlled fee payers.
    #[must_use]
    pub fn is_fee_payer(&self, address: &Pubkey) -> bool {
        self.fee_payer_addresses.contains(address)
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> RelayAuthConfig {
    RelayAuthConfig {
        claimable_tokens_program_id: Pubkey::new_unique(),
        reward_manager_program_id: Pubkey::new_unique(),
        reward_manager_state: Pubkey::new_unique(),
        fee_payer_addresses: vec![Pubkey::new_unique(), Pubkey::new_unique()],
        token_mint: Pubkey::new_unique(),
        stable_mint: Pubkey::new_unique(),
        anchor_data_program_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_fee_payer() {
        let config = test_config();
        assert!(config.is_fee_payer(&config.fee_payer_addresses[0]));
        assert!(config.is_fee_payer(&config.fee_payer_addresses[1]));
        assert!(!config.is_fee_payer(&Pubkey::new_unique()));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = test_config();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("claimableTokensProgramId"));
        let parsed: RelayAuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.reward_manager_state, config.reward_manager_state);
        assert_eq!(parsed.fee_payer_addresses, config.fee_payer_addresses);
    }

    #[test]
    fn test_anchor_data_program_defaults_to_none() {
        let reference = test_config();
        let json = format!(
            r#"{{"claimableTokensProgramId":"{}","rewardManagerProgramId":"{}","rewardManagerState":"{}","feePayerAddresses":[],"tokenMint":"{}","stableMint":"{}"}}"#,
            reference.claimable_tokens_program_id,
            reference.reward_manager_program_id,
            reference.reward_manager_state,
            reference.token_mint,
            reference.stable_mint,
        );
        let parsed: RelayAuthConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.anchor_data_program_id, None);
    }
}
