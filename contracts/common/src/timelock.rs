//! Client interface for the timelock command queue.

use soroban_sdk::{contractclient, Address, BytesN, Env, Symbol, Val, Vec};

/// Entry points of the `timelock` contract used by the governor.
#[contractclient(name = "TimelockClient")]
pub trait TimelockInterface {
    /// Mandatory queue-to-execution delay in seconds.
    fn delay(env: Env) -> u64;

    /// Whether the command identified by `hash` is currently queued.
    fn is_queued(env: Env, hash: BytesN<32>) -> bool;

    /// Deterministic identity of a (target, func, data, eta) command.
    fn hash_transaction(
        env: Env,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> BytesN<32>;

    /// Insert a command into the queued set. Admin-only.
    fn queue_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> BytesN<32>;

    /// Execute a queued command once its eta has elapsed. Admin-only.
    fn execute_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Val;

    /// Drop a command from the queued set. Absent is fine. Admin-only.
    fn cancel_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    );

    /// Complete a pending admin handover. Callable by the pending admin.
    fn accept_admin(env: Env, caller: Address);
}
