//! Client interface for the governance/reward token contract.

use soroban_sdk::{contractclient, Address, Env};

/// Entry points of the `gov_token` contract that other contracts rely on.
///
/// `caller` arguments are authorization subjects: the implementation calls
/// `caller.require_auth()` and checks the address against its stored owner.
#[contractclient(name = "GovTokenClient")]
pub trait GovTokenInterface {
    /// Mint `amount` to `to`. Owner-only.
    fn mint(env: Env, caller: Address, to: Address, amount: i128);

    /// Current balance of `id`.
    fn balance(env: Env, id: Address) -> i128;

    /// Current total supply.
    fn total_supply(env: Env) -> i128;

    /// Current minting authority.
    fn owner(env: Env) -> Address;

    /// Hand the minting authority to `new_owner`. Owner-only.
    fn set_owner(env: Env, caller: Address, new_owner: Address);

    /// Delegated vote weight of `account` at `height`. Fails until the
    /// ledger has moved past `height`.
    fn prior_votes(env: Env, account: Address, height: u32) -> i128;

    /// Total supply at `height`, from the supply checkpoint history.
    fn prior_supply(env: Env, height: u32) -> i128;

    /// Current delegated vote weight of `account`.
    fn votes_of(env: Env, account: Address) -> i128;
}
