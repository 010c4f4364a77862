#![no_std]

pub mod events;
pub mod rewards;

use common::{GovTokenClient, ReferralClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, token, Address, Env, Symbol,
};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const DEV: Symbol = symbol_short!("DEV");
const FEE_COLLECTOR: Symbol = symbol_short!("FEE_COLL");
const EMISSION_RATE: Symbol = symbol_short!("EMIT_RATE");
const START_HEIGHT: Symbol = symbol_short!("START_H");
const OWNS_REWARD: Symbol = symbol_short!("OWNS_RWD");
const REGISTRY: Symbol = symbol_short!("REGISTRY");
const COMMISSION_BP: Symbol = symbol_short!("COMM_BP");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOTAL_WT");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

// Per-pool and per-stake persistent storage uses tuple keys.
const POOL: Symbol = symbol_short!("POOL");
const USER: Symbol = symbol_short!("USER");
const TOKEN_USED: Symbol = symbol_short!("TOK_USED");

// ── Parameters ───────────────────────────────────────────────────────────────

/// Deposit fees above 4 % are refused outright.
pub const MAX_DEPOSIT_FEE_BP: u32 = 400;
/// Referral commissions above 10 % are refused outright.
pub const MAX_COMMISSION_BP: u32 = 1_000;
/// Default referral commission: 1 % of each paid reward, minted on top.
pub const DEFAULT_COMMISSION_BP: u32 = 100;
/// The dev account receives 1/10 of every pool reward, minted on top.
const DEV_SHARE_DIVISOR: i128 = 10;

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    InsufficientBalance = 5,
    InvalidWithdrawAmount = 6,
    PoolNotFound = 7,
    DuplicateStakeToken = 8,
    RewardAuthorityMigrated = 9,
}

// ── Types ────────────────────────────────────────────────────────────────────

/// One staking pool: a stake asset paired with a share of the emission.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub stake_token: Address,
    /// Share of the global emission, relative to the sum over all pools.
    pub weight: u128,
    /// Height up to which `acc_reward_per_share` has been settled.
    pub last_height: u32,
    /// Reward per staked unit, scaled by [`rewards::ACC_SCALE`].
    /// Non-decreasing; only moves while the pool has stake.
    pub acc_reward_per_share: i128,
    pub deposit_fee_bp: u32,
    pub total_staked: i128,
}

/// A user's position in one pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserStake {
    pub amount: i128,
    /// Accumulator value already settled; newly accrued reward is
    /// `amount × acc / ACC_SCALE − reward_debt`.
    pub reward_debt: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct Farm;

#[contractimpl]
impl Farm {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `reward_token`  – gov-token contract this farm mints rewards from.
    ///   The farm must be made that token's owner before rewards can flow.
    /// * `emission_rate` – reward units emitted per ledger height, across
    ///   all pools.
    /// * `start_height`  – height before which no rewards accrue.
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        dev: Address,
        fee_collector: Address,
        emission_rate: i128,
        start_height: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if emission_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&OWNER, &owner);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&DEV, &dev);
        env.storage().instance().set(&FEE_COLLECTOR, &fee_collector);
        env.storage().instance().set(&EMISSION_RATE, &emission_rate);
        env.storage().instance().set(&START_HEIGHT, &start_height);
        env.storage().instance().set(&OWNS_REWARD, &true);
        env.storage()
            .instance()
            .set(&COMMISSION_BP, &DEFAULT_COMMISSION_BP);

        events::publish_initialized(&env, owner, reward_token, emission_rate, start_height);
        Ok(())
    }

    // ── Pool management ─────────────────────────────────────────────────────

    /// Register a new pool. Owner-only.
    ///
    /// With `refresh`, all existing pools are settled first so the added
    /// weight does not retroactively dilute reward already accrued.
    pub fn add_pool(
        env: Env,
        caller: Address,
        weight: u128,
        stake_token: Address,
        deposit_fee_bp: u32,
        refresh: bool,
    ) -> Result<u32, ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if deposit_fee_bp > MAX_DEPOSIT_FEE_BP {
            return Err(ContractError::InvalidInput);
        }
        let used_key = (TOKEN_USED, stake_token.clone());
        if env.storage().persistent().has(&used_key) {
            return Err(ContractError::DuplicateStakeToken);
        }

        if refresh {
            Self::refresh_all(&env)?;
        }

        let start_height: u32 = env.storage().instance().get(&START_HEIGHT).unwrap_or(0);
        let height = env.ledger().sequence();
        let last_height = if height > start_height {
            height
        } else {
            start_height
        };

        let pool_id: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        let pool = Pool {
            stake_token: stake_token.clone(),
            weight,
            last_height,
            acc_reward_per_share: 0,
            deposit_fee_bp,
            total_staked: 0,
        };
        env.storage().persistent().set(&(POOL, pool_id), &pool);
        env.storage().persistent().set(&used_key, &true);
        env.storage().instance().set(&POOL_COUNT, &(pool_id + 1));

        let total_weight: u128 = env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_WEIGHT, &(total_weight + weight));

        events::publish_pool_added(&env, pool_id, stake_token, weight, deposit_fee_bp);
        Ok(pool_id)
    }

    /// Re-weight an existing pool. Owner-only.
    pub fn set_pool(
        env: Env,
        caller: Address,
        pool_id: u32,
        weight: u128,
        deposit_fee_bp: u32,
        refresh: bool,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if deposit_fee_bp > MAX_DEPOSIT_FEE_BP {
            return Err(ContractError::InvalidInput);
        }

        if refresh {
            Self::refresh_all(&env)?;
        }

        let mut pool = Self::load_pool(&env, pool_id)?;
        let total_weight: u128 = env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0);
        env.storage()
            .instance()
            .set(&TOTAL_WEIGHT, &(total_weight - pool.weight + weight));

        pool.weight = weight;
        pool.deposit_fee_bp = deposit_fee_bp;
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        events::publish_pool_set(&env, pool_id, weight, deposit_fee_bp);
        Ok(())
    }

    /// Settle a pool's accumulator up to the current height. Idempotent;
    /// anyone may call.
    pub fn update_pool(env: Env, pool_id: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::update_pool_core(&env, pool_id)?;
        Ok(())
    }

    /// Settle every pool. Anyone may call.
    pub fn refresh_pools(env: Env) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        Self::refresh_all(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` of the pool's stake asset.
    ///
    /// Any reward pending from an earlier stake is settled against the
    /// pre-deposit accumulator and paid out first, with the referral
    /// commission minted on top. A zero deposit is a plain harvest.
    ///
    /// The first referrer ever supplied for a user sticks; later differing
    /// referrers are ignored by the registry.
    pub fn deposit(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
        referrer: Option<Address>,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = Self::update_pool_core(&env, pool_id)?;

        let stake_client = token::Client::new(&env, &pool.stake_token);
        if amount > 0 && stake_client.balance(&user) < amount {
            return Err(ContractError::InsufficientBalance);
        }

        if amount > 0 {
            Self::record_referral(&env, &user, referrer);
        }

        let stake_key = (USER, pool_id, user.clone());
        let mut stake: UserStake = env
            .storage()
            .persistent()
            .get(&stake_key)
            .unwrap_or(UserStake {
                amount: 0,
                reward_debt: 0,
            });

        let pending = if stake.amount > 0 {
            rewards::pending(stake.amount, pool.acc_reward_per_share, stake.reward_debt)
        } else {
            0
        };

        let fee = rewards::deposit_fee(amount, pool.deposit_fee_bp);
        let net = amount - fee;

        // All accounting is final before any token leaves or enters.
        stake.amount += net;
        stake.reward_debt = rewards::settled(stake.amount, pool.acc_reward_per_share);
        pool.total_staked += net;
        env.storage().persistent().set(&stake_key, &stake);
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        if pending > 0 {
            Self::pay_reward(&env, &user, pending);
        }
        if amount > 0 {
            let this = env.current_contract_address();
            stake_client.transfer(&user, &this, &amount);
            if fee > 0 {
                let fee_collector: Address = env
                    .storage()
                    .instance()
                    .get(&FEE_COLLECTOR)
                    .ok_or(ContractError::NotInitialized)?;
                stake_client.transfer(&this, &fee_collector, &fee);
            }
        }

        events::publish_deposited(&env, pool_id, user, amount, pending);
        Ok(())
    }

    /// Withdraw `amount` of principal, settling and paying reward first.
    ///
    /// `amount == 0` claims pending reward without touching the stake.
    /// Withdrawing more than the recorded stake fails before any state
    /// changes.
    pub fn withdraw(
        env: Env,
        pool_id: u32,
        user: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        let mut pool = Self::update_pool_core(&env, pool_id)?;

        let stake_key = (USER, pool_id, user.clone());
        let mut stake: UserStake = env
            .storage()
            .persistent()
            .get(&stake_key)
            .unwrap_or(UserStake {
                amount: 0,
                reward_debt: 0,
            });

        if amount > stake.amount {
            return Err(ContractError::InvalidWithdrawAmount);
        }

        let pending = rewards::pending(stake.amount, pool.acc_reward_per_share, stake.reward_debt);

        stake.amount -= amount;
        stake.reward_debt = rewards::settled(stake.amount, pool.acc_reward_per_share);
        pool.total_staked -= amount;
        env.storage().persistent().set(&stake_key, &stake);
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        if pending > 0 {
            Self::pay_reward(&env, &user, pending);
        }
        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }

        events::publish_withdrawn(&env, pool_id, user, amount, pending);
        Ok(())
    }

    /// Return the caller's full principal and forfeit any pending reward.
    ///
    /// Works even after the reward authority has migrated away; principal
    /// can never be trapped behind reward settlement.
    pub fn emergency_withdraw(env: Env, pool_id: u32, user: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        user.require_auth();

        let mut pool = Self::load_pool(&env, pool_id)?;
        let stake_key = (USER, pool_id, user.clone());
        let stake: UserStake = env
            .storage()
            .persistent()
            .get(&stake_key)
            .unwrap_or(UserStake {
                amount: 0,
                reward_debt: 0,
            });

        let amount = stake.amount;
        env.storage().persistent().set(
            &stake_key,
            &UserStake {
                amount: 0,
                reward_debt: 0,
            },
        );
        pool.total_staked -= amount;
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        if amount > 0 {
            token::Client::new(&env, &pool.stake_token).transfer(
                &env.current_contract_address(),
                &user,
                &amount,
            );
        }

        events::publish_emergency_withdrawn(&env, pool_id, user, amount);
        Ok(())
    }

    /// Reward the user would receive if settled at the current height.
    /// Projects the accumulator forward without mutating anything.
    pub fn pending_reward(env: Env, pool_id: u32, user: Address) -> Result<i128, ContractError> {
        let pool = Self::load_pool(&env, pool_id)?;

        let mut acc = pool.acc_reward_per_share;
        let height = env.ledger().sequence();
        let total_weight: u128 = env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0);
        if height > pool.last_height && pool.total_staked > 0 {
            let rate: i128 = env.storage().instance().get(&EMISSION_RATE).unwrap_or(0);
            let reward =
                rewards::pool_reward(height - pool.last_height, rate, pool.weight, total_weight);
            acc = rewards::advance_accumulator(acc, reward, pool.total_staked);
        }

        let stake: UserStake = env
            .storage()
            .persistent()
            .get(&(USER, pool_id, user))
            .unwrap_or(UserStake {
                amount: 0,
                reward_debt: 0,
            });
        Ok(rewards::pending(stake.amount, acc, stake.reward_debt))
    }

    // ── Privileged configuration ────────────────────────────────────────────

    /// Change the emission rate. Owner-only.
    ///
    /// Every pool is settled at the old rate first, so the new rate only
    /// applies to heights after this call.
    pub fn update_emission_rate(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        Self::refresh_all(&env)?;
        env.storage().instance().set(&EMISSION_RATE, &new_rate);

        events::publish_emission_rate_set(&env, new_rate);
        Ok(())
    }

    /// Hand the reward token's minting authority to a successor farm.
    /// Owner-only, once.
    ///
    /// Pools are settled under the old authority first. Afterwards this
    /// instance stops minting (settlement becomes a no-op) but principal
    /// withdrawal keeps working.
    pub fn migrate_reward_authority(
        env: Env,
        caller: Address,
        new_farm: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if !Self::owns_reward_token(env.clone()) {
            return Err(ContractError::RewardAuthorityMigrated);
        }

        Self::refresh_all(&env)?;
        env.storage().instance().set(&OWNS_REWARD, &false);

        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        GovTokenClient::new(&env, &reward_token)
            .set_owner(&env.current_contract_address(), &new_farm);

        events::publish_reward_authority_migrated(&env, new_farm);
        Ok(())
    }

    /// Point the farm at a referral registry. Owner-only. The farm must
    /// also be flagged as an operator on the registry side.
    pub fn set_referral_registry(
        env: Env,
        caller: Address,
        registry: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&REGISTRY, &registry);

        events::publish_registry_set(&env, registry);
        Ok(())
    }

    /// Change the referral commission rate. Owner-only, capped.
    pub fn set_commission_rate(env: Env, caller: Address, bp: u32) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if bp > MAX_COMMISSION_BP {
            return Err(ContractError::InvalidInput);
        }
        env.storage().instance().set(&COMMISSION_BP, &bp);

        events::publish_commission_rate_set(&env, bp);
        Ok(())
    }

    /// The dev account re-points itself; nobody else may.
    pub fn set_dev(env: Env, caller: Address, new_dev: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let dev: Address = env
            .storage()
            .instance()
            .get(&DEV)
            .ok_or(ContractError::NotInitialized)?;
        if caller != dev {
            return Err(ContractError::Unauthorized);
        }
        env.storage().instance().set(&DEV, &new_dev);
        Ok(())
    }

    /// Change where deposit fees land. Owner-only.
    pub fn set_fee_collector(
        env: Env,
        caller: Address,
        collector: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&FEE_COLLECTOR, &collector);
        Ok(())
    }

    /// Hand privileged control to `new_owner` (the timelock, once governance
    /// is wired up). Single current-holder invariant.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&OWNER, &new_owner);

        events::publish_ownership_transferred(&env, caller, new_owner);
        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn reward_token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn emission_rate(env: Env) -> i128 {
        env.storage().instance().get(&EMISSION_RATE).unwrap_or(0)
    }

    pub fn pool_count(env: Env) -> u32 {
        env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
    }

    pub fn pool(env: Env, pool_id: u32) -> Result<Pool, ContractError> {
        Self::load_pool(&env, pool_id)
    }

    pub fn user_stake(env: Env, pool_id: u32, user: Address) -> UserStake {
        env.storage()
            .persistent()
            .get(&(USER, pool_id, user))
            .unwrap_or(UserStake {
                amount: 0,
                reward_debt: 0,
            })
    }

    pub fn total_weight(env: Env) -> u128 {
        env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
    }

    pub fn owns_reward_token(env: Env) -> bool {
        env.storage().instance().get(&OWNS_REWARD).unwrap_or(false)
    }

    pub fn referral_registry(env: Env) -> Option<Address> {
        env.storage().instance().get(&REGISTRY)
    }

    pub fn commission_rate(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&COMMISSION_BP)
            .unwrap_or(DEFAULT_COMMISSION_BP)
    }

    pub fn dev(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DEV)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn fee_collector(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&FEE_COLLECTOR)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn require_owner(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let owner: Address = env
            .storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != owner {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn load_pool(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
        env.storage()
            .persistent()
            .get(&(POOL, pool_id))
            .ok_or(ContractError::PoolNotFound)
    }

    /// Advance one pool's accumulator to the current height and return the
    /// settled pool. Mints the dev share for the covered interval while the
    /// farm still controls the reward token.
    fn update_pool_core(env: &Env, pool_id: u32) -> Result<Pool, ContractError> {
        let mut pool = Self::load_pool(env, pool_id)?;
        let height = env.ledger().sequence();
        if height <= pool.last_height {
            return Ok(pool);
        }

        let total_weight: u128 = env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0);
        let rate: i128 = env.storage().instance().get(&EMISSION_RATE).unwrap_or(0);
        if pool.total_staked == 0 || pool.weight == 0 || total_weight == 0 || rate == 0 {
            // No stake means no emission for the interval, only the marker
            // moves. Nothing is lost; nothing was minted.
            pool.last_height = height;
            env.storage().persistent().set(&(POOL, pool_id), &pool);
            return Ok(pool);
        }

        let elapsed = height - pool.last_height;
        let reward = rewards::pool_reward(elapsed, rate, pool.weight, total_weight);
        pool.acc_reward_per_share =
            rewards::advance_accumulator(pool.acc_reward_per_share, reward, pool.total_staked);
        pool.last_height = height;
        env.storage().persistent().set(&(POOL, pool_id), &pool);

        if reward > 0 && Self::owns_reward_token(env.clone()) {
            let reward_token: Address = env
                .storage()
                .instance()
                .get(&REWARD_TOKEN)
                .ok_or(ContractError::NotInitialized)?;
            let dev: Address = env
                .storage()
                .instance()
                .get(&DEV)
                .ok_or(ContractError::NotInitialized)?;
            GovTokenClient::new(env, &reward_token).mint(
                &env.current_contract_address(),
                &dev,
                &(reward / DEV_SHARE_DIVISOR),
            );
        }

        Ok(pool)
    }

    fn refresh_all(env: &Env) -> Result<(), ContractError> {
        let count: u32 = env.storage().instance().get(&POOL_COUNT).unwrap_or(0);
        for pool_id in 0..count {
            Self::update_pool_core(env, pool_id)?;
        }
        Ok(())
    }

    /// Forward a sticky referrer to the registry, if both are present.
    fn record_referral(env: &Env, user: &Address, referrer: Option<Address>) {
        let registry: Option<Address> = env.storage().instance().get(&REGISTRY);
        if let (Some(registry), Some(referrer)) = (registry, referrer) {
            if referrer != *user {
                ReferralClient::new(env, &registry).record_referral(
                    &env.current_contract_address(),
                    user,
                    &referrer,
                );
            }
        }
    }

    /// Mint a settled reward to `user`, plus the referral commission on top.
    ///
    /// Best-effort once the reward authority has migrated away: no mint, no
    /// failure, so principal operations never block on reward payment.
    fn pay_reward(env: &Env, user: &Address, amount: i128) {
        if !Self::owns_reward_token(env.clone()) {
            return;
        }
        let reward_token: Option<Address> = env.storage().instance().get(&REWARD_TOKEN);
        let reward_token = match reward_token {
            Some(t) => t,
            None => return,
        };

        let this = env.current_contract_address();
        let token_client = GovTokenClient::new(env, &reward_token);
        token_client.mint(&this, user, &amount);

        events::publish_reward_paid(env, user.clone(), amount);

        let registry: Option<Address> = env.storage().instance().get(&REGISTRY);
        if let Some(registry) = registry {
            let registry_client = ReferralClient::new(env, &registry);
            if let Some(referrer) = registry_client.referrer_of(user) {
                let commission_bp: u32 = env
                    .storage()
                    .instance()
                    .get(&COMMISSION_BP)
                    .unwrap_or(DEFAULT_COMMISSION_BP);
                let commission = rewards::commission(amount, commission_bp);
                if commission > 0 {
                    token_client.mint(&this, &referrer, &commission);
                    registry_client.pay_commission(&this, user, &commission);
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
