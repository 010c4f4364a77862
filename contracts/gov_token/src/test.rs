extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env,
};

use crate::{ContractError, GovToken, GovTokenClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup() -> (Env, GovTokenClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(GovToken, ());
    let client = GovTokenClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin)
}

fn advance_to_height(env: &Env, height: u32) {
    env.ledger().with_mut(|li| li.sequence_number = height);
}

// ── Initialisation ────────────────────────────────────────────────────────────

#[test]
fn test_initialize() {
    let (_env, client, admin) = setup();

    assert_eq!(client.owner(), admin);
    assert_eq!(client.total_supply(), 0);

    let result = client.try_initialize(&admin);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::AlreadyInitialized),
        _ => unreachable!("Expected AlreadyInitialized error"),
    }
}

// ── Minting ───────────────────────────────────────────────────────────────────

#[test]
fn test_mint_by_owner() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder, &100_000);

    assert_eq!(client.balance(&holder), 100_000);
    assert_eq!(client.total_supply(), 100_000);
}

#[test]
fn test_mint_by_non_owner_fails() {
    let (env, client, _admin) = setup();

    let intruder = Address::generate(&env);
    let result = client.try_mint(&intruder, &intruder, &1_000);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(client.total_supply(), 0);
}

#[test]
fn test_mint_non_positive_fails() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    let result = client.try_mint(&admin, &holder, &0);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidAmount),
        _ => unreachable!("Expected InvalidAmount error"),
    }
}

// ── Transfers ─────────────────────────────────────────────────────────────────

#[test]
fn test_transfer_moves_balance() {
    let (env, client, admin) = setup();

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    client.mint(&admin, &alice, &1_000);

    client.transfer(&alice, &bob, &300);

    assert_eq!(client.balance(&alice), 700);
    assert_eq!(client.balance(&bob), 300);
    assert_eq!(client.total_supply(), 1_000);
}

#[test]
fn test_transfer_more_than_balance_fails() {
    let (env, client, admin) = setup();

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    client.mint(&admin, &alice, &100);

    let result = client.try_transfer(&alice, &bob, &101);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientBalance),
        _ => unreachable!("Expected InsufficientBalance error"),
    }
    assert_eq!(client.balance(&alice), 100);
}

// ── Delegation & checkpoints ──────────────────────────────────────────────────

#[test]
fn test_undelegated_balance_has_no_votes() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder, &5_000);

    assert_eq!(client.votes_of(&holder), 0);
}

#[test]
fn test_delegate_to_self_activates_votes() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder, &5_000);
    client.delegate(&holder, &holder);

    assert_eq!(client.votes_of(&holder), 5_000);
    assert_eq!(client.delegate_of(&holder), Some(holder.clone()));
}

#[test]
fn test_transfer_moves_delegated_votes() {
    let (env, client, admin) = setup();

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    client.mint(&admin, &alice, &1_000);
    client.mint(&admin, &bob, &500);
    client.delegate(&alice, &alice);
    client.delegate(&bob, &bob);

    client.transfer(&alice, &bob, &400);

    assert_eq!(client.votes_of(&alice), 600);
    assert_eq!(client.votes_of(&bob), 900);
}

#[test]
fn test_redelegation_shifts_full_weight() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    let first = Address::generate(&env);
    let second = Address::generate(&env);
    client.mint(&admin, &holder, &2_000);

    client.delegate(&holder, &first);
    assert_eq!(client.votes_of(&first), 2_000);

    client.delegate(&holder, &second);
    assert_eq!(client.votes_of(&first), 0);
    assert_eq!(client.votes_of(&second), 2_000);
}

#[test]
fn test_prior_votes_requires_elapsed_height() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder, &1_000);
    client.delegate(&holder, &holder);

    // Height 0 is the current ledger — not yet queryable.
    let result = client.try_prior_votes(&holder, &0);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::HeightNotElapsed),
        _ => unreachable!("Expected HeightNotElapsed error"),
    }
}

#[test]
fn test_prior_votes_snapshots_history() {
    let (env, client, admin) = setup();

    let holder = Address::generate(&env);
    client.mint(&admin, &holder, &1_000);
    client.delegate(&holder, &holder);

    // Double the weight at height 5.
    advance_to_height(&env, 5);
    client.mint(&admin, &holder, &1_000);

    advance_to_height(&env, 10);
    assert_eq!(client.prior_votes(&holder, &0), 1_000);
    assert_eq!(client.prior_votes(&holder, &4), 1_000);
    assert_eq!(client.prior_votes(&holder, &5), 2_000);
    assert_eq!(client.prior_votes(&holder, &9), 2_000);
}

#[test]
fn test_prior_supply_snapshots_history() {
    let (env, client, admin) = setup();

    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    client.mint(&admin, &alice, &100_000);

    advance_to_height(&env, 3);
    client.mint(&admin, &bob, &100_000);

    advance_to_height(&env, 6);
    assert_eq!(client.prior_supply(&2), 100_000);
    assert_eq!(client.prior_supply(&3), 200_000);
    assert_eq!(client.total_supply(), 200_000);
}

// ── Ownership handoff ─────────────────────────────────────────────────────────

#[test]
fn test_set_owner_hands_off_minting() {
    let (env, client, admin) = setup();

    let next_owner = Address::generate(&env);
    client.set_owner(&admin, &next_owner);
    assert_eq!(client.owner(), next_owner);

    // Old owner can no longer mint.
    let holder = Address::generate(&env);
    let result = client.try_mint(&admin, &holder, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    client.mint(&next_owner, &holder, &1);
    assert_eq!(client.balance(&holder), 1);
}

#[test]
fn test_set_owner_by_non_owner_fails() {
    let (env, client, _admin) = setup();

    let intruder = Address::generate(&env);
    let result = client.try_set_owner(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}
