extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Ledger as _},
    vec, Address, Env, IntoVal, String, Symbol, Val, Vec,
};

use crate::{ContractError, Governor, GovernorClient, ProposalState};
use gov_token::{GovToken, GovTokenClient};
use timelock::{TimelockQueue, TimelockQueueClient, GRACE_PERIOD};

// ── Test helpers ─────────────────────────────────────────────────────────────

const DELAY: u64 = 86_400; // 1 day

struct World {
    env: Env,
    token: GovTokenClient<'static>,
    queue: TimelockQueueClient<'static>,
    queue_id: Address,
    gov: GovernorClient<'static>,
    guardian: Address,
    /// 100_000 of the 200_000 supply, self-delegated.
    proposer: Address,
    /// 99_900 units, self-delegated.
    voter_a: Address,
    /// 100 units, self-delegated.
    voter_b: Address,
}

/// Wire up the governance side: vote token with 200_000 supply spread over
/// three self-delegated holders, a 1-day timelock whose admin is the
/// governor, and the governor itself. The ledger is left at height 10.
fn setup() -> World {
    let env = Env::default();
    env.mock_all_auths();

    let deployer = Address::generate(&env);
    let guardian = Address::generate(&env);

    let token_id = env.register(GovToken, ());
    let token = GovTokenClient::new(&env, &token_id);
    token.initialize(&deployer);

    let queue_id = env.register(TimelockQueue, ());
    let queue = TimelockQueueClient::new(&env, &queue_id);
    queue.initialize(&deployer, &DELAY);

    let gov_id = env.register(Governor, ());
    let gov = GovernorClient::new(&env, &gov_id);
    gov.initialize(&queue_id, &token_id, &guardian);

    queue.set_pending_admin(&deployer, &gov_id);
    gov.accept_timelock_admin(&guardian);

    let proposer = Address::generate(&env);
    let voter_a = Address::generate(&env);
    let voter_b = Address::generate(&env);
    for (who, amount) in [(&proposer, 100_000i128), (&voter_a, 99_900), (&voter_b, 100)] {
        token.mint(&deployer, who, &amount);
        token.delegate(who, who);
    }

    env.ledger().with_mut(|li| li.sequence_number = 10);

    World {
        env,
        token,
        queue,
        queue_id,
        gov,
        guardian,
        proposer,
        voter_a,
        voter_b,
    }
}

fn advance_to_height(env: &Env, height: u32) {
    env.ledger().with_mut(|li| li.sequence_number = height);
}

fn advance_to_time(env: &Env, timestamp: u64) {
    env.ledger().with_mut(|li| li.timestamp = timestamp);
}

/// A one-action proposal doubling the queue's delay.
fn propose_delay_change(w: &World, proposer: &Address) -> u64 {
    let targets: Vec<Address> = vec![&w.env, w.queue_id.clone()];
    let funcs: Vec<Symbol> = vec![&w.env, symbol_short!("set_delay")];
    let datas: Vec<Vec<Val>> = vec![&w.env, vec![&w.env, (DELAY * 2).into_val(&w.env)]];
    w.gov.propose(
        proposer,
        &targets,
        &funcs,
        &datas,
        &String::from_str(&w.env, "double the timelock delay"),
    )
}

/// Propose, pass the vote with voter A, and step past the voting window.
fn propose_and_pass(w: &World) -> u64 {
    let id = propose_delay_change(w, &w.proposer);
    advance_to_height(&w.env, 12);
    w.gov.cast_vote(&w.voter_a, &id, &true);
    advance_to_height(&w.env, 30_000);
    id
}

// ── Initialisation & fractions ────────────────────────────────────────────────

#[test]
fn test_initialize_once() {
    let w = setup();

    assert_eq!(w.gov.guardian(), w.guardian);
    assert_eq!(w.gov.timelock(), w.queue_id);
    assert_eq!(w.queue.admin(), w.gov.address);

    let result = w
        .gov
        .try_initialize(&w.queue_id, &w.token.address, &w.guardian);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

#[test]
fn test_quorum_and_threshold_fractions() {
    let w = setup();

    // 200_000 supply: 2% quorum, 0.1% proposal threshold.
    assert_eq!(w.gov.quorum_votes(), 4_000);
    assert_eq!(w.gov.proposal_threshold(), 200);
}

// ── Proposing ─────────────────────────────────────────────────────────────────

#[test]
fn test_propose_below_threshold_fails() {
    let w = setup();

    // 100 units is 0.05% of supply, below the 0.1% threshold.
    let result = {
        let targets: Vec<Address> = vec![&w.env, w.queue_id.clone()];
        let funcs: Vec<Symbol> = vec![&w.env, symbol_short!("set_delay")];
        let datas: Vec<Vec<Val>> = vec![&w.env, vec![&w.env, (DELAY * 2).into_val(&w.env)]];
        w.gov.try_propose(
            &w.voter_b,
            &targets,
            &funcs,
            &datas,
            &String::from_str(&w.env, "sneaky"),
        )
    };
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::BelowProposalThreshold),
        _ => unreachable!("Expected BelowProposalThreshold error"),
    }
}

#[test]
fn test_proposal_pending_then_active() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    assert_eq!(w.gov.proposal_count(), 1);

    // One height later the proposal is still pending; voting opens strictly
    // after the start height.
    advance_to_height(&w.env, 11);
    assert_eq!(w.gov.state(&id), ProposalState::Pending);

    advance_to_height(&w.env, 12);
    assert_eq!(w.gov.state(&id), ProposalState::Active);
}

#[test]
fn test_propose_action_shape_guards() {
    let w = setup();

    let empty_targets: Vec<Address> = vec![&w.env];
    let empty_funcs: Vec<Symbol> = vec![&w.env];
    let empty_datas: Vec<Vec<Val>> = vec![&w.env];
    let result = w.gov.try_propose(
        &w.proposer,
        &empty_targets,
        &empty_funcs,
        &empty_datas,
        &String::from_str(&w.env, "nothing"),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::NoActions),
        _ => unreachable!("Expected NoActions error"),
    }

    let targets: Vec<Address> = vec![&w.env, w.queue_id.clone()];
    let result = w.gov.try_propose(
        &w.proposer,
        &targets,
        &empty_funcs,
        &empty_datas,
        &String::from_str(&w.env, "lopsided"),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ArityMismatch),
        _ => unreachable!("Expected ArityMismatch error"),
    }

    let mut many_targets: Vec<Address> = vec![&w.env];
    let mut many_funcs: Vec<Symbol> = vec![&w.env];
    let mut many_datas: Vec<Vec<Val>> = vec![&w.env];
    for _ in 0..11 {
        many_targets.push_back(w.queue_id.clone());
        many_funcs.push_back(symbol_short!("set_delay"));
        many_datas.push_back(vec![&w.env, (DELAY * 2).into_val(&w.env)]);
    }
    let result = w.gov.try_propose(
        &w.proposer,
        &many_targets,
        &many_funcs,
        &many_datas,
        &String::from_str(&w.env, "too much"),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::TooManyActions),
        _ => unreachable!("Expected TooManyActions error"),
    }
}

#[test]
fn test_one_live_proposal_per_proposer() {
    let w = setup();

    propose_delay_change(&w, &w.proposer);

    let targets: Vec<Address> = vec![&w.env, w.queue_id.clone()];
    let funcs: Vec<Symbol> = vec![&w.env, symbol_short!("set_delay")];
    let datas: Vec<Vec<Val>> = vec![&w.env, vec![&w.env, (DELAY * 3).into_val(&w.env)]];
    let result = w.gov.try_propose(
        &w.proposer,
        &targets,
        &funcs,
        &datas,
        &String::from_str(&w.env, "again"),
    );
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::LiveProposalExists),
        _ => unreachable!("Expected LiveProposalExists error"),
    }
}

// ── Voting ────────────────────────────────────────────────────────────────────

#[test]
fn test_vote_tally_uses_snapshot_weights() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    w.gov.cast_vote(&w.voter_a, &id, &true);
    let proposal = w.gov.proposal(&id);
    assert_eq!(proposal.for_votes, 99_900);
    assert_eq!(proposal.against_votes, 0);

    w.gov.cast_vote(&w.voter_b, &id, &false);
    let proposal = w.gov.proposal(&id);
    assert_eq!(proposal.for_votes, 99_900);
    assert_eq!(proposal.against_votes, 100);

    let receipt = w.gov.receipt(&id, &w.voter_a).unwrap();
    assert!(receipt.support);
    assert_eq!(receipt.votes, 99_900);
}

#[test]
fn test_double_vote_fails() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    w.gov.cast_vote(&w.voter_a, &id, &true);

    // A second vote fails whichever way it points.
    for support in [true, false] {
        let result = w.gov.try_cast_vote(&w.voter_a, &id, &support);
        match result {
            Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyVoted),
            _ => unreachable!("Expected AlreadyVoted error"),
        }
    }
}

#[test]
fn test_vote_outside_window_fails() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);

    // Still pending.
    let result = w.gov.try_cast_vote(&w.voter_a, &id, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::VotingClosed),
        _ => unreachable!("Expected VotingClosed error"),
    }

    // Past the voting window.
    advance_to_height(&w.env, 30_000);
    let result = w.gov.try_cast_vote(&w.voter_a, &id, &true);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::VotingClosed),
        _ => unreachable!("Expected VotingClosed error"),
    }
}

#[test]
fn test_weight_moved_after_start_does_not_count() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    // B picks up A's whole balance after the snapshot; B's vote still
    // carries only the 100 units held at the start height.
    w.token.transfer(&w.voter_a, &w.voter_b, &99_900);
    advance_to_height(&w.env, 13);

    w.gov.cast_vote(&w.voter_b, &id, &true);
    assert_eq!(w.gov.proposal(&id).for_votes, 100);
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

#[test]
fn test_defeated_below_quorum() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    // 100 for-votes is far below the 4_000 quorum.
    w.gov.cast_vote(&w.voter_b, &id, &true);
    advance_to_height(&w.env, 30_000);

    assert_eq!(w.gov.state(&id), ProposalState::Defeated);
    let result = w.gov.try_queue(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotSucceeded),
        _ => unreachable!("Expected ProposalNotSucceeded error"),
    }
}

#[test]
fn test_defeated_when_against_prevails() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    w.gov.cast_vote(&w.voter_a, &id, &false);
    w.gov.cast_vote(&w.voter_b, &id, &true);
    advance_to_height(&w.env, 30_000);

    assert_eq!(w.gov.state(&id), ProposalState::Defeated);
}

#[test]
fn test_succeeded_with_quorum_and_majority() {
    let w = setup();

    let id = propose_and_pass(&w);
    assert_eq!(w.gov.state(&id), ProposalState::Succeeded);
}

// ── Queueing & execution ──────────────────────────────────────────────────────

#[test]
fn test_queue_requires_succeeded() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    advance_to_height(&w.env, 12);

    let result = w.gov.try_queue(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotSucceeded),
        _ => unreachable!("Expected ProposalNotSucceeded error"),
    }
}

#[test]
fn test_execute_requires_queued() {
    let w = setup();

    let id = propose_and_pass(&w);

    // Succeeded but never queued.
    let result = w.gov.try_execute(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotQueued),
        _ => unreachable!("Expected ProposalNotQueued error"),
    }
}

#[test]
fn test_queue_sets_eta_and_registers_commands() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);

    let proposal = w.gov.proposal(&id);
    assert_eq!(proposal.eta, 1_000 + DELAY);
    assert_eq!(w.gov.state(&id), ProposalState::Queued);

    let data: Vec<Val> = vec![&w.env, (DELAY * 2).into_val(&w.env)];
    let hash = w.queue.hash_transaction(
        &w.queue_id,
        &symbol_short!("set_delay"),
        &data,
        &proposal.eta,
    );
    assert!(w.queue.is_queued(&hash));
}

#[test]
fn test_execute_before_eta_fails() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);

    // The delay has not elapsed; the queue refuses and nothing is marked
    // executed.
    let result = w.gov.try_execute(&id);
    assert!(result.is_err());
    assert_eq!(w.gov.state(&id), ProposalState::Queued);
    assert!(!w.gov.proposal(&id).executed);
    assert_eq!(w.queue.delay(), DELAY);
}

#[test]
fn test_execute_applies_the_governed_call() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);

    // Two days later the command window is open.
    advance_to_time(&w.env, 1_000 + 2 * DELAY);
    w.gov.execute(&id);

    assert_eq!(w.queue.delay(), DELAY * 2);
    assert_eq!(w.gov.state(&id), ProposalState::Executed);

    // A second execution has nothing left to run.
    let result = w.gov.try_execute(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotQueued),
        _ => unreachable!("Expected ProposalNotQueued error"),
    }
}

#[test]
fn test_queued_proposal_expires_after_grace() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);

    let eta = w.gov.proposal(&id).eta;
    advance_to_time(&w.env, eta + GRACE_PERIOD);

    assert_eq!(w.gov.state(&id), ProposalState::Expired);
    let result = w.gov.try_execute(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotQueued),
        _ => unreachable!("Expected ProposalNotQueued error"),
    }
}

// ── Cancellation ──────────────────────────────────────────────────────────────

#[test]
fn test_guardian_cancels_queued_proposal() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);
    let proposal = w.gov.proposal(&id);

    w.gov.cancel(&w.guardian, &id);
    assert_eq!(w.gov.state(&id), ProposalState::Canceled);

    // The queued command went with it.
    let data: Vec<Val> = vec![&w.env, (DELAY * 2).into_val(&w.env)];
    let hash = w.queue.hash_transaction(
        &w.queue_id,
        &symbol_short!("set_delay"),
        &data,
        &proposal.eta,
    );
    assert!(!w.queue.is_queued(&hash));

    let result = w.gov.try_execute(&id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalNotQueued),
        _ => unreachable!("Expected ProposalNotQueued error"),
    }
}

#[test]
fn test_cancel_by_outsider_needs_weak_proposer() {
    let w = setup();

    let id = propose_delay_change(&w, &w.proposer);
    let rando = Address::generate(&w.env);

    // The proposer still clears the threshold; outsiders cannot cancel.
    let result = w.gov.try_cancel(&rando, &id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    // Once the proposer's weight falls below the threshold, anyone may
    // sweep the proposal away.
    w.token.transfer(&w.proposer, &w.voter_a, &99_950);
    w.gov.cancel(&rando, &id);
    assert_eq!(w.gov.state(&id), ProposalState::Canceled);
}

#[test]
fn test_cancel_after_execution_fails() {
    let w = setup();

    let id = propose_and_pass(&w);
    advance_to_time(&w.env, 1_000);
    w.gov.queue(&id);
    advance_to_time(&w.env, 1_000 + 2 * DELAY);
    w.gov.execute(&id);

    let result = w.gov.try_cancel(&w.guardian, &id);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ProposalAlreadyExecuted),
        _ => unreachable!("Expected ProposalAlreadyExecuted error"),
    }
}
