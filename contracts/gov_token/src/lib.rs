#![no_std]

pub mod events;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, Symbol, Vec,
};

// ── Storage key constants ────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const INITIALIZED: Symbol = symbol_short!("INIT");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

// Per-account persistent storage uses tuple keys: (prefix, account)
const BALANCE: Symbol = symbol_short!("BAL");
const DELEGATE: Symbol = symbol_short!("DELEGATE");
const CHECKPOINTS: Symbol = symbol_short!("CHKPTS");

// Supply history lives under its own persistent key.
const SUPPLY_CHECKPOINTS: Symbol = symbol_short!("SUP_CHK");

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    HeightNotElapsed = 6,
}

// ── Types ────────────────────────────────────────────────────────────────────

/// One entry in an account's (or the supply's) vote-weight history.
///
/// `from_height` values within one history are strictly increasing.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub from_height: u32,
    pub votes: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct GovToken;

#[contractimpl]
impl GovToken {
    /// Bootstrap the token with its initial minting authority.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&OWNER, &admin);
        env.storage().instance().set(&SUPPLY, &0i128);

        events::publish_initialized(&env, admin);
        Ok(())
    }

    // ── Supply ──────────────────────────────────────────────────────────────

    /// Mint `amount` to `to`. Only the current owner may mint.
    ///
    /// Supply history and the recipient's delegatee (if any) are
    /// checkpointed at the current ledger height.
    pub fn mint(env: Env, caller: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &(balance + amount));

        let supply: i128 = env.storage().instance().get(&SUPPLY).unwrap_or(0);
        let new_supply = supply + amount;
        env.storage().instance().set(&SUPPLY, &new_supply);
        Self::write_supply_checkpoint(&env, new_supply);

        Self::move_votes(&env, None, Self::delegate_of(env.clone(), to.clone()), amount);

        events::publish_minted(&env, to, amount, new_supply);
        Ok(())
    }

    /// Move `amount` from `from` to `to`, shifting delegated votes with it.
    pub fn transfer(
        env: Env,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let from_balance = Self::balance(env.clone(), from.clone());
        if from_balance < amount {
            return Err(ContractError::InsufficientBalance);
        }

        env.storage()
            .persistent()
            .set(&(BALANCE, from.clone()), &(from_balance - amount));
        let to_balance = Self::balance(env.clone(), to.clone());
        env.storage()
            .persistent()
            .set(&(BALANCE, to.clone()), &(to_balance + amount));

        Self::move_votes(
            &env,
            Self::delegate_of(env.clone(), from.clone()),
            Self::delegate_of(env.clone(), to.clone()),
            amount,
        );

        events::publish_transferred(&env, from, to, amount);
        Ok(())
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        env.storage().persistent().get(&(BALANCE, id)).unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&SUPPLY).unwrap_or(0)
    }

    // ── Ownership ───────────────────────────────────────────────────────────

    pub fn owner(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&OWNER)
            .ok_or(ContractError::NotInitialized)
    }

    /// Hand the minting authority to `new_owner`. There is exactly one owner
    /// at any time; the previous owner loses the role in the same call.
    pub fn set_owner(env: Env, caller: Address, new_owner: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_owner(&env, &caller)?;

        env.storage().instance().set(&OWNER, &new_owner);

        events::publish_owner_changed(&env, caller, new_owner);
        Ok(())
    }

    // ── Delegation ──────────────────────────────────────────────────────────

    /// Point the delegator's entire balance at `delegatee`.
    ///
    /// Until an account delegates (to itself or anyone else) its balance
    /// carries no vote weight.
    pub fn delegate(env: Env, delegator: Address, delegatee: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        delegator.require_auth();

        let previous = Self::delegate_of(env.clone(), delegator.clone());
        let balance = Self::balance(env.clone(), delegator.clone());

        env.storage()
            .persistent()
            .set(&(DELEGATE, delegator.clone()), &delegatee);
        Self::move_votes(&env, previous.clone(), Some(delegatee.clone()), balance);

        events::publish_delegate_changed(&env, delegator, previous, delegatee);
        Ok(())
    }

    /// The account `account` currently delegates to, if it ever delegated.
    pub fn delegate_of(env: Env, account: Address) -> Option<Address> {
        env.storage().persistent().get(&(DELEGATE, account))
    }

    /// Current delegated vote weight of `account`.
    pub fn votes_of(env: Env, account: Address) -> i128 {
        let checkpoints: Vec<Checkpoint> = env
            .storage()
            .persistent()
            .get(&(CHECKPOINTS, account))
            .unwrap_or(Vec::new(&env));
        match checkpoints.last() {
            Some(cp) => cp.votes,
            None => 0,
        }
    }

    /// Delegated vote weight of `account` as of the end of ledger `height`.
    ///
    /// Only settled heights may be queried; asking about the current or a
    /// future height fails, so a balance acquired and delegated within the
    /// querying ledger can never count.
    pub fn prior_votes(env: Env, account: Address, height: u32) -> Result<i128, ContractError> {
        if height >= env.ledger().sequence() {
            return Err(ContractError::HeightNotElapsed);
        }
        let checkpoints: Vec<Checkpoint> = env
            .storage()
            .persistent()
            .get(&(CHECKPOINTS, account))
            .unwrap_or(Vec::new(&env));
        Ok(Self::search_checkpoints(&checkpoints, height))
    }

    /// Total supply as of the end of ledger `height`.
    pub fn prior_supply(env: Env, height: u32) -> Result<i128, ContractError> {
        if height >= env.ledger().sequence() {
            return Err(ContractError::HeightNotElapsed);
        }
        let checkpoints: Vec<Checkpoint> = env
            .storage()
            .persistent()
            .get(&SUPPLY_CHECKPOINTS)
            .unwrap_or(Vec::new(&env));
        Ok(Self::search_checkpoints(&checkpoints, height))
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

    /// Shift `amount` of vote weight between two delegatees, checkpointing
    /// both sides. Either side may be absent (undelegated balance).
    fn move_votes(env: &Env, from: Option<Address>, to: Option<Address>, amount: i128) {
        if amount == 0 || from == to {
            return;
        }
        if let Some(src) = from {
            let votes = Self::votes_of(env.clone(), src.clone());
            Self::write_checkpoint(env, &src, votes - amount);
        }
        if let Some(dst) = to {
            let votes = Self::votes_of(env.clone(), dst.clone());
            Self::write_checkpoint(env, &dst, votes + amount);
        }
    }

    /// Append (or overwrite, within one ledger) the account's latest weight.
    fn write_checkpoint(env: &Env, account: &Address, votes: i128) {
        let key = (CHECKPOINTS, account.clone());
        let mut checkpoints: Vec<Checkpoint> = env
            .storage()
            .persistent()
            .get(&key)
            .unwrap_or(Vec::new(env));
        let height = env.ledger().sequence();

        match checkpoints.last() {
            Some(last) if last.from_height == height => {
                checkpoints.set(
                    checkpoints.len() - 1,
                    Checkpoint {
                        from_height: height,
                        votes,
                    },
                );
            }
            _ => {
                checkpoints.push_back(Checkpoint {
                    from_height: height,
                    votes,
                });
            }
        }
        env.storage().persistent().set(&key, &checkpoints);
    }

    fn write_supply_checkpoint(env: &Env, supply: i128) {
        let mut checkpoints: Vec<Checkpoint> = env
            .storage()
            .persistent()
            .get(&SUPPLY_CHECKPOINTS)
            .unwrap_or(Vec::new(env));
        let height = env.ledger().sequence();

        match checkpoints.last() {
            Some(last) if last.from_height == height => {
                checkpoints.set(
                    checkpoints.len() - 1,
                    Checkpoint {
                        from_height: height,
                        votes: supply,
                    },
                );
            }
            _ => {
                checkpoints.push_back(Checkpoint {
                    from_height: height,
                    votes: supply,
                });
            }
        }
        env.storage()
            .persistent()
            .set(&SUPPLY_CHECKPOINTS, &checkpoints);
    }

    /// Latest checkpoint at or before `height`, or 0 before the first one.
    fn search_checkpoints(checkpoints: &Vec<Checkpoint>, height: u32) -> i128 {
        let len = checkpoints.len();
        if len == 0 {
            return 0;
        }

        let last = checkpoints.get_unchecked(len - 1);
        if last.from_height <= height {
            return last.votes;
        }
        if checkpoints.get_unchecked(0).from_height > height {
            return 0;
        }

        let mut lower: u32 = 0;
        let mut upper: u32 = len - 1;
        while upper > lower {
            let center = upper - (upper - lower) / 2;
            let cp = checkpoints.get_unchecked(center);
            if cp.from_height == height {
                return cp.votes;
            } else if cp.from_height < height {
                lower = center;
            } else {
                upper = center - 1;
            }
        }
        checkpoints.get_unchecked(lower).votes
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test;
