//! Client interface for the referral registry contract.

use soroban_sdk::{contractclient, Address, Env};

/// Registry hooks invoked by the farm during deposit and reward settlement.
#[contractclient(name = "ReferralClient")]
pub trait ReferralInterface {
    /// Record `referrer` as `user`'s referrer. First write wins; later calls
    /// with a different referrer are ignored. Operator-only.
    fn record_referral(env: Env, operator: Address, user: Address, referrer: Address);

    /// The sticky referrer of `user`, if one was ever recorded.
    fn referrer_of(env: Env, user: Address) -> Option<Address>;

    /// Record a commission payment routed to `user`'s referrer. No-op when
    /// `user` has no referrer. Operator-only.
    fn pay_commission(env: Env, operator: Address, user: Address, amount: i128);
}
