use soroban_sdk::{symbol_short, Address, Env, String};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the governor is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub timelock: Address,
    pub vote_token: Address,
    pub guardian: Address,
    pub timestamp: u64,
}

/// Fired when a proposal is opened.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCreatedEvent {
    pub id: u64,
    pub proposer: Address,
    pub start_height: u32,
    pub end_height: u32,
    pub description: String,
    pub timestamp: u64,
}

/// Fired on every vote.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteCastEvent {
    pub id: u64,
    pub voter: Address,
    pub support: bool,
    pub votes: i128,
    pub timestamp: u64,
}

/// Fired when a succeeded proposal's actions enter the timelock.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalQueuedEvent {
    pub id: u64,
    pub eta: u64,
    pub timestamp: u64,
}

/// Fired when every action of a proposal has executed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalExecutedEvent {
    pub id: u64,
    pub timestamp: u64,
}

/// Fired when a proposal is canceled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalCanceledEvent {
    pub id: u64,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, timelock: Address, vote_token: Address, guardian: Address) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            timelock,
            vote_token,
            guardian,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proposal_created(
    env: &Env,
    id: u64,
    proposer: Address,
    start_height: u32,
    end_height: u32,
    description: String,
) {
    env.events().publish(
        (symbol_short!("PROPOSED"), id),
        ProposalCreatedEvent {
            id,
            proposer,
            start_height,
            end_height,
            description,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_vote_cast(env: &Env, id: u64, voter: Address, support: bool, votes: i128) {
    env.events().publish(
        (symbol_short!("VOTE"), id, voter.clone()),
        VoteCastEvent {
            id,
            voter,
            support,
            votes,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proposal_queued(env: &Env, id: u64, eta: u64) {
    env.events().publish(
        (symbol_short!("PROP_QUE"), id),
        ProposalQueuedEvent {
            id,
            eta,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proposal_executed(env: &Env, id: u64) {
    env.events().publish(
        (symbol_short!("PROP_EXE"), id),
        ProposalExecutedEvent {
            id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_proposal_canceled(env: &Env, id: u64) {
    env.events().publish(
        (symbol_short!("PROP_CAN"), id),
        ProposalCanceledEvent {
            id,
            timestamp: env.ledger().timestamp(),
        },
    );
}
