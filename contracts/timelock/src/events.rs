use soroban_sdk::{symbol_short, Address, BytesN, Env, Symbol};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the queue is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub delay: u64,
    pub timestamp: u64,
}

/// Fired when a command enters the queued set.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueuedEvent {
    pub hash: BytesN<32>,
    pub target: Address,
    pub func: Symbol,
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when a queued command is executed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExecutedEvent {
    pub hash: BytesN<32>,
    pub target: Address,
    pub func: Symbol,
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when a queued command is dropped without executing.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CanceledEvent {
    pub hash: BytesN<32>,
    pub target: Address,
    pub func: Symbol,
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when the execution delay changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelaySetEvent {
    pub delay: u64,
    pub timestamp: u64,
}

/// Fired when a new admin is nominated.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingAdminSetEvent {
    pub pending_admin: Address,
    pub timestamp: u64,
}

/// Fired when the nominated admin completes the handover.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminAcceptedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address, delay: u64) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_queued(env: &Env, hash: BytesN<32>, target: Address, func: Symbol, eta: u64) {
    env.events().publish(
        (symbol_short!("QUEUED"), hash.clone()),
        QueuedEvent {
            hash,
            target,
            func,
            eta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_executed(env: &Env, hash: BytesN<32>, target: Address, func: Symbol, eta: u64) {
    env.events().publish(
        (symbol_short!("EXECUTED"), hash.clone()),
        ExecutedEvent {
            hash,
            target,
            func,
            eta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_canceled(env: &Env, hash: BytesN<32>, target: Address, func: Symbol, eta: u64) {
    env.events().publish(
        (symbol_short!("CANCELED"), hash.clone()),
        CanceledEvent {
            hash,
            target,
            func,
            eta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delay_set(env: &Env, delay: u64) {
    env.events().publish(
        (symbol_short!("DELAY_SET"),),
        DelaySetEvent {
            delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pending_admin_set(env: &Env, pending_admin: Address) {
    env.events().publish(
        (symbol_short!("PEND_ADM"),),
        PendingAdminSetEvent {
            pending_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_accepted(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACC"),),
        AdminAcceptedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}
