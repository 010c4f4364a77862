#![no_std]

pub mod events;


use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, xdr::ToXdr, Address, BytesN, Env, IntoVal,
    Symbol, TryFromVal, Val, Vec,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const ADMIN_HANDED: Symbol = symbol_short!("ADM_HAND");
const DELAY: Symbol = symbol_short!("DELAY");

// Queued-command set: (prefix, command hash) -> bool
const QUEUED: Symbol = symbol_short!("QUEUED");

// ── Parameters ──────────────────────────────────────────────────────────────────

/// Shortest configurable queue-to-execution delay: 6 hours.
pub const MIN_DELAY: u64 = 21_600;
/// Longest configurable delay: 30 days.
pub const MAX_DELAY: u64 = 2_592_000;
/// Window after eta during which a queued command stays executable: 14 days.
pub const GRACE_PERIOD: u64 = 1_209_600;

// ── Contract errors ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    DelayOutOfRange = 4,
    EtaTooEarly = 5,
    NotQueued = 6,
    TimelockNotSurpassed = 7,
    StaleTransaction = 8,
    NoPendingAdmin = 9,
    InvalidSelfCall = 10,
}

// ── Types ──────────────────────────────────────────────────────────────────────

/// The tuple whose XDR encoding identifies a queued command.
///
/// Two queueings of byte-identical tuples are one set member.
#[contracttype]
#[derive(Clone, Debug)]
pub struct QueuedCall {
    pub target: Address,
    pub func: Symbol,
    pub data: Vec<Val>,
    pub eta: u64,
}

// ── Helpers ────────────────────────────────────────────────────────────────────

fn load_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin = load_admin(env)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Reconfiguration must arrive as a queued self-call; a direct call from
/// anyone, the admin included, bypasses the delay and is refused.
fn require_self(env: &Env, caller: &Address) -> Result<(), ContractError> {
    if *caller != env.current_contract_address() {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn call_hash(env: &Env, target: &Address, func: &Symbol, data: &Vec<Val>, eta: u64) -> BytesN<32> {
    let call = QueuedCall {
        target: target.clone(),
        func: func.clone(),
        data: data.clone(),
        eta,
    };
    let encoded = call.to_xdr(env);
    env.crypto().sha256(&encoded).to_bytes()
}

// ── Contract ───────────────────────────────────────────────────────────────────

#[contract]
pub struct TimelockQueue;

#[contractimpl]
impl TimelockQueue {
    /// Bootstrap the queue with its admin (the deployer at first, the
    /// governor once the handover completes) and the execution delay.
    pub fn initialize(env: Env, admin: Address, delay: u64) -> Result<(), ContractError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(ContractError::AlreadyInitialized);
        }
        if !(MIN_DELAY..=MAX_DELAY).contains(&delay) {
            return Err(ContractError::DelayOutOfRange);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&DELAY, &delay);

        events::publish_initialized(&env, admin, delay);
        Ok(())
    }

    // ── Queue management ──────────────────────────────────────────────────────

    /// Deterministic identity of a command tuple.
    pub fn hash_transaction(
        env: Env,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> BytesN<32> {
        call_hash(&env, &target, &func, &data, eta)
    }

    /// Insert a command into the queued set. Admin-only.
    ///
    /// The eta must leave at least the configured delay; re-queueing an
    /// identical tuple is a no-op, not an error.
    pub fn queue_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<BytesN<32>, ContractError> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        let delay: u64 = env.storage().instance().get(&DELAY).unwrap_or(MIN_DELAY);
        let now = env.ledger().timestamp();
        if eta < now + delay {
            return Err(ContractError::EtaTooEarly);
        }

        let hash = call_hash(&env, &target, &func, &data, eta);
        env.storage().persistent().set(&(QUEUED, hash.clone()), &true);

        events::publish_queued(&env, hash.clone(), target, func, eta);
        Ok(hash)
    }

    /// Execute a queued command. Admin-only.
    ///
    /// The command is removed from the set and then dispatched with this
    /// contract's address prepended to `data`, so governed entry points see
    /// the timelock as their caller. A failing callee aborts the whole
    /// operation.
    pub fn execute_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<Val, ContractError> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        let hash = call_hash(&env, &target, &func, &data, eta);
        let key = (QUEUED, hash.clone());
        if !env.storage().persistent().get(&key).unwrap_or(false) {
            return Err(ContractError::NotQueued);
        }

        let now = env.ledger().timestamp();
        if now < eta {
            return Err(ContractError::TimelockNotSurpassed);
        }
        if now > eta + GRACE_PERIOD {
            return Err(ContractError::StaleTransaction);
        }

        env.storage().persistent().remove(&key);

        // The host refuses reentry, so commands aimed at the queue itself
        // are dispatched onto the configuration helpers directly instead of
        // through `invoke_contract`.
        let result: Val = if target == env.current_contract_address() {
            Self::dispatch_self(&env, &func, &data)?
        } else {
            let mut args = Vec::new(&env);
            args.push_back(env.current_contract_address().into_val(&env));
            for arg in data.iter() {
                args.push_back(arg);
            }
            env.invoke_contract(&target, &func, args)
        };

        events::publish_executed(&env, hash, target, func, eta);
        Ok(result)
    }

    /// Drop a command from the queued set. Admin-only; absent is fine.
    pub fn cancel_transaction(
        env: Env,
        caller: Address,
        target: Address,
        func: Symbol,
        data: Vec<Val>,
        eta: u64,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        require_admin(&env, &caller)?;

        let hash = call_hash(&env, &target, &func, &data, eta);
        env.storage().persistent().remove(&(QUEUED, hash.clone()));

        events::publish_canceled(&env, hash, target, func, eta);
        Ok(())
    }

    // ── Self-management ───────────────────────────────────────────────────────

    /// Change the delay. Only callable by the timelock itself, i.e. through
    /// a queued command targeting this contract.
    pub fn set_delay(env: Env, caller: Address, new_delay: u64) -> Result<(), ContractError> {
        caller.require_auth();
        load_admin(&env)?;
        require_self(&env, &caller)?;

        Self::apply_set_delay(&env, new_delay)
    }

    /// Nominate the next admin.
    ///
    /// Normally a queued self-call. The initial admin may call it directly
    /// exactly once, to hand the queue to the governor at deployment.
    pub fn set_pending_admin(
        env: Env,
        caller: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let admin = load_admin(&env)?;

        let handed: bool = env.storage().instance().get(&ADMIN_HANDED).unwrap_or(false);
        if caller == env.current_contract_address() {
            // queued self-call
        } else if caller == admin && !handed {
            env.storage().instance().set(&ADMIN_HANDED, &true);
        } else {
            return Err(ContractError::Unauthorized);
        }

        Self::apply_set_pending_admin(&env, new_admin)
    }

    /// The nominated admin completes the handover.
    pub fn accept_admin(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        load_admin(&env)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::NoPendingAdmin)?;
        if caller != pending {
            return Err(ContractError::Unauthorized);
        }

        env.storage().instance().set(&ADMIN, &caller);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_accepted(&env, caller);
        Ok(())
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn apply_set_delay(env: &Env, new_delay: u64) -> Result<(), ContractError> {
        if !(MIN_DELAY..=MAX_DELAY).contains(&new_delay) {
            return Err(ContractError::DelayOutOfRange);
        }
        env.storage().instance().set(&DELAY, &new_delay);

        events::publish_delay_set(env, new_delay);
        Ok(())
    }

    fn apply_set_pending_admin(env: &Env, new_admin: Address) -> Result<(), ContractError> {
        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_pending_admin_set(env, new_admin);
        Ok(())
    }

    /// Route a queued command aimed at the queue itself.
    ///
    /// The delay and grace gates were already enforced by the caller;
    /// only the named configuration entry points are reachable this way.
    fn dispatch_self(env: &Env, func: &Symbol, data: &Vec<Val>) -> Result<Val, ContractError> {
        if *func == symbol_short!("set_delay") {
            let raw = data.get(0).ok_or(ContractError::InvalidSelfCall)?;
            let new_delay =
                u64::try_from_val(env, &raw).map_err(|_| ContractError::InvalidSelfCall)?;
            Self::apply_set_delay(env, new_delay)?;
        } else if *func == Symbol::new(env, "set_pending_admin") {
            let raw = data.get(0).ok_or(ContractError::InvalidSelfCall)?;
            let new_admin =
                Address::try_from_val(env, &raw).map_err(|_| ContractError::InvalidSelfCall)?;
            Self::apply_set_pending_admin(env, new_admin)?;
        } else {
            return Err(ContractError::InvalidSelfCall);
        }
        Ok(().into_val(env))
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn admin(env: Env) -> Result<Address, ContractError> {
        load_admin(&env)
    }

    pub fn pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn delay(env: Env) -> u64 {
        env.storage().instance().get(&DELAY).unwrap_or(MIN_DELAY)
    }

    pub fn grace_period(_env: Env) -> u64 {
        GRACE_PERIOD
    }

    pub fn is_queued(env: Env, hash: BytesN<32>) -> bool {
        env.storage().persistent().get(&(QUEUED, hash)).unwrap_or(false)
    }
}
