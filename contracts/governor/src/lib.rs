#![no_std]

pub mod events;

#[cfg(test)]
mod test;

use common::{GovTokenClient, TimelockClient};
use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short, Address, Env, String, Symbol, Val, Vec,
};

// ── Storage keys ────────────────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const TIMELOCK: Symbol = symbol_short!("TIMELOCK");
const VOTE_TOKEN: Symbol = symbol_short!("VOTE_TOK");
const GUARDIAN: Symbol = symbol_short!("GUARDIAN");
const PROPOSAL_COUNT: Symbol = symbol_short!("PROP_CNT");

// Per-proposal persistent storage uses tuple keys.
const PROPOSAL: Symbol = symbol_short!("PROPOSAL");
const RECEIPT: Symbol = symbol_short!("RECEIPT");
const LATEST: Symbol = symbol_short!("LATEST");

// ── Parameters ──────────────────────────────────────────────────────────────────

/// For-votes a proposal needs to pass: 2 % of supply, in basis points.
pub const QUORUM_BP: i128 = 200;
/// Vote weight needed to open a proposal: 0.1 % of supply, in basis points.
pub const PROPOSAL_THRESHOLD_BP: i128 = 10;
pub const BASIS_POINTS: i128 = 10_000;
/// Heights between proposing and the start of voting.
pub const VOTING_DELAY: u32 = 1;
/// Heights a proposal stays open for votes: about two days of ledgers.
pub const VOTING_PERIOD: u32 = 28_800;
/// Most actions one proposal may carry.
pub const MAX_OPERATIONS: u32 = 10;
/// Window after eta during which a queued proposal stays executable.
/// Matches the command queue's own grace period.
pub const GRACE_PERIOD: u64 = 1_209_600;

// ── Contract errors ─────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    BelowProposalThreshold = 4,
    NoActions = 5,
    TooManyActions = 6,
    ArityMismatch = 7,
    LiveProposalExists = 8,
    ProposalNotFound = 9,
    VotingClosed = 10,
    AlreadyVoted = 11,
    ProposalNotSucceeded = 12,
    ProposalNotQueued = 13,
    ActionAlreadyQueued = 14,
    ProposalAlreadyExecuted = 15,
}

// ── Types ───────────────────────────────────────────────────────────────────────

/// Where a proposal currently stands. Never stored; always derived from the
/// proposal's fields and the current height/time.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalState {
    Pending,
    Active,
    Canceled,
    Defeated,
    Succeeded,
    Queued,
    Expired,
    Executed,
}

/// A governance proposal: an ordered batch of governed calls plus the vote
/// bookkeeping around it. `eta == 0` means "not queued yet".
#[contracttype]
#[derive(Clone, Debug)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub targets: Vec<Address>,
    pub funcs: Vec<Symbol>,
    pub datas: Vec<Vec<Val>>,
    pub description: String,
    pub start_height: u32,
    pub end_height: u32,
    pub for_votes: i128,
    pub against_votes: i128,
    pub eta: u64,
    pub executed: bool,
    pub canceled: bool,
}

/// One account's vote on one proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Receipt {
    pub support: bool,
    pub votes: i128,
}

// ── Contract ────────────────────────────────────────────────────────────────────

#[contract]
pub struct Governor;

#[contractimpl]
impl Governor {
    /// Bootstrap the governor against its command queue and vote token.
    ///
    /// The guardian is a safety valve that may cancel proposals and claim
    /// the queue's pending admin handover; it holds no other power.
    pub fn initialize(
        env: Env,
        timelock: Address,
        vote_token: Address,
        guardian: Address,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&TIMELOCK, &timelock);
        env.storage().instance().set(&VOTE_TOKEN, &vote_token);
        env.storage().instance().set(&GUARDIAN, &guardian);

        events::publish_initialized(&env, timelock, vote_token, guardian);
        Ok(())
    }

    // ── Proposal lifecycle ────────────────────────────────────────────────────

    /// Open a proposal over an ordered batch of governed calls.
    ///
    /// The proposer's delegated weight at the previous height must clear the
    /// proposal threshold, and a proposer may only have one proposal pending
    /// or active at a time. Voting opens after [`VOTING_DELAY`] heights.
    pub fn propose(
        env: Env,
        proposer: Address,
        targets: Vec<Address>,
        funcs: Vec<Symbol>,
        datas: Vec<Vec<Val>>,
        description: String,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        proposer.require_auth();

        let actions = targets.len();
        if actions == 0 {
            return Err(ContractError::NoActions);
        }
        if actions > MAX_OPERATIONS {
            return Err(ContractError::TooManyActions);
        }
        if funcs.len() != actions || datas.len() != actions {
            return Err(ContractError::ArityMismatch);
        }

        let height = env.ledger().sequence();
        let snapshot = height.saturating_sub(1);
        let token = GovTokenClient::new(&env, &Self::load_vote_token(&env)?);
        let weight = token.prior_votes(&proposer, &snapshot);
        let threshold = token.prior_supply(&snapshot) * PROPOSAL_THRESHOLD_BP / BASIS_POINTS;
        if weight <= threshold {
            return Err(ContractError::BelowProposalThreshold);
        }

        if let Some(prev_id) = env
            .storage()
            .persistent()
            .get::<_, u64>(&(LATEST, proposer.clone()))
        {
            let prev = Self::load_proposal(&env, prev_id)?;
            match Self::evaluate_state(&env, &prev) {
                ProposalState::Pending | ProposalState::Active => {
                    return Err(ContractError::LiveProposalExists)
                }
                _ => {}
            }
        }

        let id: u64 = env.storage().instance().get(&PROPOSAL_COUNT).unwrap_or(0) + 1;
        let start_height = height + VOTING_DELAY;
        let end_height = start_height + VOTING_PERIOD;

        let proposal = Proposal {
            id,
            proposer: proposer.clone(),
            targets,
            funcs,
            datas,
            description: description.clone(),
            start_height,
            end_height,
            for_votes: 0,
            against_votes: 0,
            eta: 0,
            executed: false,
            canceled: false,
        };
        env.storage().persistent().set(&(PROPOSAL, id), &proposal);
        env.storage()
            .persistent()
            .set(&(LATEST, proposer.clone()), &id);
        env.storage().instance().set(&PROPOSAL_COUNT, &id);

        events::publish_proposal_created(&env, id, proposer, start_height, end_height, description);
        Ok(id)
    }

    /// Vote for or against an active proposal.
    ///
    /// The weight counted is the voter's delegated weight at the proposal's
    /// start height, so weight moved after a proposal opens cannot swing it.
    pub fn cast_vote(env: Env, voter: Address, id: u64, support: bool) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let mut proposal = Self::load_proposal(&env, id)?;
        if Self::evaluate_state(&env, &proposal) != ProposalState::Active {
            return Err(ContractError::VotingClosed);
        }

        let receipt_key = (RECEIPT, id, voter.clone());
        if env.storage().persistent().has(&receipt_key) {
            return Err(ContractError::AlreadyVoted);
        }

        let token = GovTokenClient::new(&env, &Self::load_vote_token(&env)?);
        let votes = token.prior_votes(&voter, &proposal.start_height);

        if support {
            proposal.for_votes += votes;
        } else {
            proposal.against_votes += votes;
        }
        env.storage().persistent().set(&(PROPOSAL, id), &proposal);
        env.storage()
            .persistent()
            .set(&receipt_key, &Receipt { support, votes });

        events::publish_vote_cast(&env, id, voter, support, votes);
        Ok(())
    }

    /// Push a succeeded proposal's actions into the command queue. Anyone
    /// may crank this; the vote already decided the outcome.
    pub fn queue(env: Env, id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;

        let mut proposal = Self::load_proposal(&env, id)?;
        if Self::evaluate_state(&env, &proposal) != ProposalState::Succeeded {
            return Err(ContractError::ProposalNotSucceeded);
        }

        let queue = TimelockClient::new(&env, &Self::load_timelock(&env)?);
        let eta = env.ledger().timestamp() + queue.delay();
        let this = env.current_contract_address();

        for i in 0..proposal.targets.len() {
            let target = proposal.targets.get_unchecked(i);
            let func = proposal.funcs.get_unchecked(i);
            let data = proposal.datas.get_unchecked(i);

            let hash = queue.hash_transaction(&target, &func, &data, &eta);
            if queue.is_queued(&hash) {
                return Err(ContractError::ActionAlreadyQueued);
            }
            queue.queue_transaction(&this, &target, &func, &data, &eta);
        }

        proposal.eta = eta;
        env.storage().persistent().set(&(PROPOSAL, id), &proposal);

        events::publish_proposal_queued(&env, id, eta);
        Ok(())
    }

    /// Execute a queued proposal once its eta has passed.
    ///
    /// Every action must go through; a failure in any of them aborts the
    /// whole call and the proposal stays queued.
    pub fn execute(env: Env, id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;

        let mut proposal = Self::load_proposal(&env, id)?;
        if Self::evaluate_state(&env, &proposal) != ProposalState::Queued {
            return Err(ContractError::ProposalNotQueued);
        }

        let queue = TimelockClient::new(&env, &Self::load_timelock(&env)?);
        let this = env.current_contract_address();

        for i in 0..proposal.targets.len() {
            queue.execute_transaction(
                &this,
                &proposal.targets.get_unchecked(i),
                &proposal.funcs.get_unchecked(i),
                &proposal.datas.get_unchecked(i),
                &proposal.eta,
            );
        }

        proposal.executed = true;
        env.storage().persistent().set(&(PROPOSAL, id), &proposal);

        events::publish_proposal_executed(&env, id);
        Ok(())
    }

    /// Cancel a proposal and drop any of its queued commands.
    ///
    /// The guardian may always cancel; anyone else may only sweep a
    /// proposal whose proposer has since dropped below the threshold.
    pub fn cancel(env: Env, caller: Address, id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        let mut proposal = Self::load_proposal(&env, id)?;
        if proposal.executed {
            return Err(ContractError::ProposalAlreadyExecuted);
        }

        let guardian = Self::load_guardian(&env)?;
        if caller != guardian {
            let token = GovTokenClient::new(&env, &Self::load_vote_token(&env)?);
            let threshold = token.total_supply() * PROPOSAL_THRESHOLD_BP / BASIS_POINTS;
            if token.votes_of(&proposal.proposer) > threshold {
                return Err(ContractError::Unauthorized);
            }
        }

        proposal.canceled = true;
        env.storage().persistent().set(&(PROPOSAL, id), &proposal);

        if proposal.eta != 0 {
            let queue = TimelockClient::new(&env, &Self::load_timelock(&env)?);
            let this = env.current_contract_address();
            for i in 0..proposal.targets.len() {
                queue.cancel_transaction(
                    &this,
                    &proposal.targets.get_unchecked(i),
                    &proposal.funcs.get_unchecked(i),
                    &proposal.datas.get_unchecked(i),
                    &proposal.eta,
                );
            }
        }

        events::publish_proposal_canceled(&env, id);
        Ok(())
    }

    /// Claim a pending admin handover on the command queue. Guardian-only;
    /// used once at deployment to put the governor in charge of the queue.
    pub fn accept_timelock_admin(env: Env, caller: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();

        if caller != Self::load_guardian(&env)? {
            return Err(ContractError::Unauthorized);
        }

        let queue = TimelockClient::new(&env, &Self::load_timelock(&env)?);
        queue.accept_admin(&env.current_contract_address());
        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    /// Where proposal `id` currently stands.
    pub fn state(env: Env, id: u64) -> Result<ProposalState, ContractError> {
        let proposal = Self::load_proposal(&env, id)?;
        Ok(Self::evaluate_state(&env, &proposal))
    }

    /// Quorum against the current supply. Historical proposals are judged
    /// against the supply at their start height instead.
    pub fn quorum_votes(env: Env) -> Result<i128, ContractError> {
        let token = GovTokenClient::new(&env, &Self::load_vote_token(&env)?);
        Ok(token.total_supply() * QUORUM_BP / BASIS_POINTS)
    }

    /// Proposal threshold against the current supply.
    pub fn proposal_threshold(env: Env) -> Result<i128, ContractError> {
        let token = GovTokenClient::new(&env, &Self::load_vote_token(&env)?);
        Ok(token.total_supply() * PROPOSAL_THRESHOLD_BP / BASIS_POINTS)
    }

    pub fn proposal(env: Env, id: u64) -> Result<Proposal, ContractError> {
        Self::load_proposal(&env, id)
    }

    pub fn receipt(env: Env, id: u64, voter: Address) -> Option<Receipt> {
        env.storage().persistent().get(&(RECEIPT, id, voter))
    }

    pub fn proposal_count(env: Env) -> u64 {
        env.storage().instance().get(&PROPOSAL_COUNT).unwrap_or(0)
    }

    pub fn timelock(env: Env) -> Result<Address, ContractError> {
        Self::load_timelock(&env)
    }

    pub fn vote_token(env: Env) -> Result<Address, ContractError> {
        Self::load_vote_token(&env)
    }

    pub fn guardian(env: Env) -> Result<Address, ContractError> {
        Self::load_guardian(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    fn load_timelock(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TIMELOCK)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_vote_token(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&VOTE_TOKEN)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_guardian(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&GUARDIAN)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_proposal(env: &Env, id: u64) -> Result<Proposal, ContractError> {
        env.storage()
            .persistent()
            .get(&(PROPOSAL, id))
            .ok_or(ContractError::ProposalNotFound)
    }

    /// Derive a proposal's state from its fields and the clock. The checks
    /// run in precedence order: cancellation beats everything, the voting
    /// window beats tallies, tallies beat queue/execution status.
    fn evaluate_state(env: &Env, proposal: &Proposal) -> ProposalState {
        if proposal.canceled {
            return ProposalState::Canceled;
        }

        let height = env.ledger().sequence();
        if height <= proposal.start_height {
            return ProposalState::Pending;
        }
        if height <= proposal.end_height {
            return ProposalState::Active;
        }

        if proposal.for_votes <= proposal.against_votes
            || proposal.for_votes < Self::quorum_at(env, proposal.start_height)
        {
            return ProposalState::Defeated;
        }
        if proposal.eta == 0 {
            return ProposalState::Succeeded;
        }
        if proposal.executed {
            return ProposalState::Executed;
        }
        if env.ledger().timestamp() >= proposal.eta + GRACE_PERIOD {
            return ProposalState::Expired;
        }
        ProposalState::Queued
    }

    /// Quorum against the supply at `height`, so minting after a proposal
    /// opens cannot move its goalposts.
    fn quorum_at(env: &Env, height: u32) -> i128 {
        let vote_token: Address = match env.storage().instance().get(&VOTE_TOKEN) {
            Some(addr) => addr,
            None => return 0,
        };
        let token = GovTokenClient::new(env, &vote_token);
        token.prior_supply(&height) * QUORUM_BP / BASIS_POINTS
    }
}
