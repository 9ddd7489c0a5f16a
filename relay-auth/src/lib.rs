#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Sponsored-relay instruction authorization for Solana.
//!
//! Before a fee-payer service co-signs a batch of instructions submitted by
//! a client, it must decide whether every instruction is safe to sponsor.
//! This crate is that decision: a pure authorization engine with no opinion
//! about transaction construction, signing, submission, or the HTTP surface
//! around it.
//!
//! # Architecture
//!
//! - [`instruction`] - Candidate instruction data model and discriminant
//!   decoding
//! - [`programs`] - Closed enumeration of the program families the relay
//!   understands
//! - [`config`] - Immutable injected configuration
//! - [`authority`] - Derived-authority resolution with a process-lifetime
//!   cache
//! - [`rules`] - Per-program discriminant rule tables and instruction
//!   evaluation
//! - [`withdrawal`] - The one recognized multi-instruction special case
//! - [`flags`] - Fail-closed feature flag seam
//! - [`authorizer`] - Batch orchestration producing the final boolean
//! - [`social`] - Independent social proof gate for token transfers
//!
//! # Decision Model
//!
//! Every instruction evaluates to Allow, Deny, or NotApplicable. A batch
//! with no denial is relayable. A batch with denials is rejected unless it
//! matches the stable-asset withdrawal swap envelope and that special case
//! is enabled for the caller. Infrastructure faults (a failed authority
//! derivation) surface as errors rather than collapsing into either
//! decision.
//!
//! # Usage
//!
//! ```ignore
//! use relay_auth::{BatchAuthorizer, PdaAuthorityResolver, RelayAuthConfig, StaticFlagSource};
//!
//! let config: RelayAuthConfig = serde_json::from_str(&config_json)?;
//! let resolver = PdaAuthorityResolver::new(config.claimable_tokens_program_id);
//! let authorizer = BatchAuthorizer::new(config, resolver, StaticFlagSource::default());
//!
//! if !authorizer.authorize(&instructions, user_id).await? {
//!     // reject the relay request with a 400-class response
//! }
//! ```

pub mod authority;
pub mod authorizer;
pub mod config;
pub mod error;
pub mod flags;
pub mod instruction;
pub mod programs;
pub mod rules;
pub mod social;
pub mod withdrawal;

pub use authority::{AuthorityResolver, PdaAuthorityResolver};
pub use authorizer::BatchAuthorizer;
pub use config::RelayAuthConfig;
pub use error::{FlagError, RelayAuthError, SocialProofError};
pub use flags::{FeatureFlagSource, StaticFlagSource, WITHDRAWAL_SWAP_FLAG};
pub use instruction::{RelayAccountMeta, RelayInstruction};
pub use programs::KnownProgram;
pub use rules::{AccountIndexRule, Verdict};
pub use social::{SocialProofGate, SocialProofSource};
