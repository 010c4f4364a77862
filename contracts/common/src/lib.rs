//! Shared cross-contract interfaces for the Verdant contract suite.
//!
//! Each module declares a `#[contractclient]` trait for one collaborator so
//! that contracts can call each other through typed clients instead of raw
//! `invoke_contract` dispatch:
//! - [`gov_token::GovTokenClient`] — the mintable reward/vote asset.
//! - [`referral::ReferralClient`] — the referral registry hooks.
//! - [`timelock::TimelockClient`] — the delay-gated command queue.
//!
//! The traits mirror the exported entry points of the implementing contracts;
//! a signature change there must be reflected here.

#![no_std]

pub mod gov_token;
pub mod referral;
pub mod timelock;

pub use gov_token::GovTokenClient;
pub use referral::ReferralClient;
pub use timelock::TimelockClient;
