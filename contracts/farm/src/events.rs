use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub emission_rate: i128,
    pub start_height: u32,
    pub timestamp: u64,
}

/// Fired when a pool is registered.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool_id: u32,
    pub stake_token: Address,
    pub weight: u128,
    pub deposit_fee_bp: u32,
    pub timestamp: u64,
}

/// Fired when a pool is re-weighted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSetEvent {
    pub pool_id: u32,
    pub weight: u128,
    pub deposit_fee_bp: u32,
    pub timestamp: u64,
}

/// Fired on every deposit (including zero-amount harvests).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositedEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub reward_paid: i128,
    pub timestamp: u64,
}

/// Fired on every withdrawal (including zero-amount claims).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub reward_paid: i128,
    pub timestamp: u64,
}

/// Fired when a user abandons pending reward to recover principal.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawnEvent {
    pub pool_id: u32,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when a reward is minted to a user.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the emission rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmissionRateSetEvent {
    pub new_rate: i128,
    pub timestamp: u64,
}

/// Fired when the referral commission rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CommissionRateSetEvent {
    pub bp: u32,
    pub timestamp: u64,
}

/// Fired when the referral registry is (re)pointed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegistrySetEvent {
    pub registry: Address,
    pub timestamp: u64,
}

/// Fired when the reward token's minting authority moves to a successor.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardAuthorityMigratedEvent {
    pub new_farm: Address,
    pub timestamp: u64,
}

/// Fired when the farm's owner changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipTransferredEvent {
    pub previous: Address,
    pub current: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    owner: Address,
    reward_token: Address,
    emission_rate: i128,
    start_height: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            emission_rate,
            start_height,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool_id: u32,
    stake_token: Address,
    weight: u128,
    deposit_fee_bp: u32,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool_id),
        PoolAddedEvent {
            pool_id,
            stake_token,
            weight,
            deposit_fee_bp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_set(env: &Env, pool_id: u32, weight: u128, deposit_fee_bp: u32) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool_id),
        PoolSetEvent {
            pool_id,
            weight,
            deposit_fee_bp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, pool_id: u32, user: Address, amount: i128, reward_paid: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), user.clone()),
        DepositedEvent {
            pool_id,
            user,
            amount,
            reward_paid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(env: &Env, pool_id: u32, user: Address, amount: i128, reward_paid: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), user.clone()),
        WithdrawnEvent {
            pool_id,
            user,
            amount,
            reward_paid,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emergency_withdrawn(env: &Env, pool_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("EMERG_WD"), user.clone()),
        EmergencyWithdrawnEvent {
            pool_id,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), user.clone()),
        RewardPaidEvent {
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_emission_rate_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("EMIT_RATE"),),
        EmissionRateSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_commission_rate_set(env: &Env, bp: u32) {
    env.events().publish(
        (symbol_short!("COMM_RATE"),),
        CommissionRateSetEvent {
            bp,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_registry_set(env: &Env, registry: Address) {
    env.events().publish(
        (symbol_short!("REG_SET"),),
        RegistrySetEvent {
            registry,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_authority_migrated(env: &Env, new_farm: Address) {
    env.events().publish(
        (symbol_short!("MIGRATED"),),
        RewardAuthorityMigratedEvent {
            new_farm,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_ownership_transferred(env: &Env, previous: Address, current: Address) {
    env.events().publish(
        (symbol_short!("OWNER"),),
        OwnershipTransferredEvent {
            previous,
            current,
            timestamp: env.ledger().timestamp(),
        },
    );
}
