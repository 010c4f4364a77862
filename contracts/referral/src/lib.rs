#![no_std]

pub mod events;


use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

// ── Storage keys ────────────────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");

// Per-address persistent storage uses tuple keys: (prefix, address)
const OPERATOR: Symbol = symbol_short!("OPERATOR");
const REFERRER: Symbol = symbol_short!("REFERRER");
const REF_COUNT: Symbol = symbol_short!("REF_CNT");
const COMMISSION: Symbol = symbol_short!("COMM");

// ── Contract errors ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    OperatorOnly = 4,
    InvalidAmount = 5,
}

// ── Helpers ─────────────────────────────────────────────────────────────────────

fn load_admin(env: &Env) -> Result<Address, ContractError> {
    env.storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)
}

fn require_operator(env: &Env, who: &Address) -> Result<(), ContractError> {
    load_admin(env)?;
    let allowed: bool = env
        .storage()
        .persistent()
        .get(&(OPERATOR, who.clone()))
        .unwrap_or(false);
    if !allowed {
        return Err(ContractError::OperatorOnly);
    }
    Ok(())
}

// ── Contract ────────────────────────────────────────────────────────────────────

#[contract]
pub struct ReferralRegistry;

#[contractimpl]
impl ReferralRegistry {
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&ADMIN) {
            return Err(ContractError::AlreadyInitialized);
        }
        env.storage().instance().set(&ADMIN, &admin);
        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, ContractError> {
        load_admin(&env)
    }

    /// Flag or unflag an address as an authorized operator. Admin-only.
    ///
    /// Operators are the contracts (the farm, in practice) allowed to write
    /// referral records and commission entries.
    pub fn set_operator(
        env: Env,
        caller: Address,
        operator: Address,
        allowed: bool,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        let admin = load_admin(&env)?;
        if caller != admin {
            return Err(ContractError::Unauthorized);
        }

        env.storage()
            .persistent()
            .set(&(OPERATOR, operator.clone()), &allowed);

        events::publish_operator_set(&env, operator, allowed);
        Ok(())
    }

    pub fn is_operator(env: Env, who: Address) -> bool {
        env.storage()
            .persistent()
            .get(&(OPERATOR, who))
            .unwrap_or(false)
    }

    /// Record `referrer` for `user`. Operator-only.
    ///
    /// The first recorded referrer sticks: later calls naming someone else
    /// are silently ignored, as are self-referrals. Insert-if-absent, never
    /// an error.
    pub fn record_referral(
        env: Env,
        operator: Address,
        user: Address,
        referrer: Address,
    ) -> Result<(), ContractError> {
        operator.require_auth();
        require_operator(&env, &operator)?;

        if user == referrer {
            return Ok(());
        }
        let key = (REFERRER, user.clone());
        if env.storage().persistent().has(&key) {
            return Ok(());
        }

        env.storage().persistent().set(&key, &referrer);

        let count_key = (REF_COUNT, referrer.clone());
        let count: u32 = env.storage().persistent().get(&count_key).unwrap_or(0);
        env.storage().persistent().set(&count_key, &(count + 1));

        events::publish_referral_recorded(&env, user, referrer);
        Ok(())
    }

    /// The sticky referrer of `user`, if one was ever recorded.
    pub fn referrer_of(env: Env, user: Address) -> Option<Address> {
        env.storage().persistent().get(&(REFERRER, user))
    }

    /// Record a commission payment routed to `user`'s referrer. Operator-only.
    ///
    /// No-op when `user` has no referrer. The reward-asset mint itself is
    /// performed by the calling operator, which holds the minting authority;
    /// this hook keeps the registry-side running total.
    pub fn pay_commission(
        env: Env,
        operator: Address,
        user: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        operator.require_auth();
        require_operator(&env, &operator)?;

        if amount < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let referrer: Option<Address> = env.storage().persistent().get(&(REFERRER, user.clone()));
        let referrer = match referrer {
            Some(r) => r,
            None => return Ok(()),
        };
        if amount == 0 {
            return Ok(());
        }

        let key = (COMMISSION, referrer.clone());
        let paid: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(paid + amount));

        events::publish_commission_paid(&env, user, referrer, amount);
        Ok(())
    }

    /// Number of users who name `referrer` as their referrer.
    pub fn referral_count(env: Env, referrer: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&(REF_COUNT, referrer))
            .unwrap_or(0)
    }

    /// Lifetime commission recorded for `referrer`.
    pub fn commission_paid(env: Env, referrer: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(COMMISSION, referrer))
            .unwrap_or(0)
    }
}
