use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the token is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Fired on every mint.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MintedEvent {
    pub to: Address,
    pub amount: i128,
    pub new_supply: i128,
    pub timestamp: u64,
}

/// Fired on every transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferredEvent {
    pub from: Address,
    pub to: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an account re-points its delegation.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelegateChangedEvent {
    pub delegator: Address,
    pub previous: Option<Address>,
    pub current: Address,
    pub timestamp: u64,
}

/// Fired when the minting authority moves.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerChangedEvent {
    pub previous: Address,
    pub current: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, admin: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_minted(env: &Env, to: Address, amount: i128, new_supply: i128) {
    env.events().publish(
        (symbol_short!("MINTED"), to.clone()),
        MintedEvent {
            to,
            amount,
            new_supply,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transferred(env: &Env, from: Address, to: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("TRANSFER"), from.clone()),
        TransferredEvent {
            from,
            to,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delegate_changed(
    env: &Env,
    delegator: Address,
    previous: Option<Address>,
    current: Address,
) {
    env.events().publish(
        (symbol_short!("DELEGATE"), delegator.clone()),
        DelegateChangedEvent {
            delegator,
            previous,
            current,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_changed(env: &Env, previous: Address, current: Address) {
    env.events().publish(
        (symbol_short!("OWNER"),),
        OwnerChangedEvent {
            previous,
            current,
            timestamp: env.ledger().timestamp(),
        },
    );
}
