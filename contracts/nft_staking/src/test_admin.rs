extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    Address, Env, String,
};

use collection::{CollectionContract, CollectionContractClient};

use crate::{ContractError, NftStakingContract, NftStakingContractClient};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn setup(
    reward_per_block: i128,
    unbonding_time: u64,
    delay_time: u64,
) -> (
    Env,
    NftStakingContractClient<'static>,
    CollectionContractClient<'static>,
    Address, // admin
) {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);

    let collection_id = env.register(CollectionContract, ());
    let collection = CollectionContractClient::new(&env, &collection_id);
    collection.initialize(
        &admin,
        &String::from_str(&env, "NFT Collection"),
        &String::from_str(&env, "NFTC"),
    );

    let reward_token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let pool_id = env.register(NftStakingContract, ());
    let pool = NftStakingContractClient::new(&env, &pool_id);
    pool.initialize(
        &admin,
        &collection_id,
        &reward_token.address(),
        &unbonding_time,
        &delay_time,
        &reward_per_block,
    );

    (env, pool, collection, admin)
}

fn advance_blocks(env: &Env, blocks: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number += blocks;
    });
}

fn advance_time(env: &Env, secs: u64) {
    env.ledger().with_mut(|li| {
        li.timestamp += secs;
    });
}

// ── Parameter setters ─────────────────────────────────────────────────────────

#[test]
fn test_set_reward_per_block_by_admin() {
    let (_env, pool, _collection, admin) = setup(1, 0, 0);

    pool.set_reward_per_block(&admin, &7);
    assert_eq!(pool.get_reward_per_block(), 7);
}

#[test]
fn test_set_reward_per_block_negative_fails() {
    let (_env, pool, _collection, admin) = setup(1, 0, 0);

    let result = pool.try_set_reward_per_block(&admin, &-5);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
    assert_eq!(pool.get_reward_per_block(), 1);
}

#[test]
fn test_set_delay_time_by_admin() {
    let (_env, pool, _collection, admin) = setup(1, 0, 60);

    pool.set_delay_time(&admin, &120);
    assert_eq!(pool.get_delay_time(), 120);
}

#[test]
fn test_set_unbonding_time_by_admin() {
    let (_env, pool, _collection, admin) = setup(1, 60, 0);

    pool.set_unbonding_time(&admin, &120);
    assert_eq!(pool.get_unbonding_time(), 120);
}

#[test]
fn test_setters_by_non_admin_fail() {
    let (env, pool, _collection, _admin) = setup(1, 60, 60);

    let intruder = Address::generate(&env);

    let result = pool.try_set_reward_per_block(&intruder, &999);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let result = pool.try_set_delay_time(&intruder, &999);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    let result = pool.try_set_unbonding_time(&intruder, &999);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }

    // All parameters remain unchanged.
    assert_eq!(pool.get_reward_per_block(), 1);
    assert_eq!(pool.get_delay_time(), 60);
    assert_eq!(pool.get_unbonding_time(), 60);
}

// ── Prospective application ───────────────────────────────────────────────────

#[test]
fn test_rate_change_is_prospective() {
    let (env, pool, collection, admin) = setup(1, 0, 0);

    let staker = Address::generate(&env);
    collection.mint(&admin, &staker, &1);
    collection.approve(&staker, &pool.address, &1);
    pool.stake(&staker, &1);

    // 10 blocks at the old rate, then the admin triples it.
    advance_blocks(&env, 10);
    pool.set_reward_per_block(&admin, &3);
    advance_blocks(&env, 10);

    // 1 × 1 × 10 + 1 × 3 × 10 = 40; the first interval is not repriced.
    assert_eq!(pool.get_pending_rewards(&staker), 40);
}

#[test]
fn test_unbonding_retune_applies_to_staked_items() {
    let (env, pool, collection, admin) = setup(1, 1_000, 0);

    let staker = Address::generate(&env);
    collection.mint(&admin, &staker, &1);
    collection.approve(&staker, &pool.address, &1);
    pool.stake(&staker, &1);

    advance_time(&env, 10);
    let result = pool.try_unstake(&staker, &1);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::UnbondingNotElapsed),
        _ => unreachable!("Expected UnbondingNotElapsed error"),
    }

    // Gates read the current global value, so shortening the unbonding
    // time frees the item immediately.
    pool.set_unbonding_time(&admin, &10);
    pool.unstake(&staker, &1);
    assert_eq!(collection.owner_of(&1), staker);
}

#[test]
fn test_delay_retune_applies_to_pending_request() {
    let (env, pool, collection, admin) = setup(1, 0, 1_000);

    let staker = Address::generate(&env);
    collection.mint(&admin, &staker, &1);
    collection.approve(&staker, &pool.address, &1);
    pool.stake(&staker, &1);

    advance_blocks(&env, 2);
    pool.claim_rewards(&staker); // request under the long delay

    advance_time(&env, 10);
    let result = pool.try_claim_rewards(&staker);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::ClaimPending),
        _ => unreachable!("Expected ClaimPending error"),
    }

    pool.set_delay_time(&admin, &10);
    // Pool has no reward funding in this setup, so fund-independent state
    // is what we assert: the gate itself now passes.
    let result = pool.try_claim_rewards(&staker);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InsufficientRewardPool),
        _ => unreachable!("Expected InsufficientRewardPool error"),
    }
}

// ── Admin transfer (two-step) ─────────────────────────────────────────────────

#[test]
fn test_admin_transfer_two_step() {
    let (env, pool, _collection, admin) = setup(1, 0, 0);

    let new_admin = Address::generate(&env);
    pool.propose_admin(&admin, &new_admin);
    assert_eq!(pool.get_pending_admin(), Some(new_admin.clone()));

    pool.accept_admin(&new_admin);
    assert_eq!(pool.get_admin(), new_admin);
    assert_eq!(pool.get_pending_admin(), None);

    // The old admin has lost its capability.
    let result = pool.try_set_reward_per_block(&admin, &5);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    pool.set_reward_per_block(&new_admin, &5);
    assert_eq!(pool.get_reward_per_block(), 5);
}

#[test]
fn test_accept_admin_by_wrong_address_fails() {
    let (env, pool, _collection, admin) = setup(1, 0, 0);

    let proposed = Address::generate(&env);
    let impostor = Address::generate(&env);
    pool.propose_admin(&admin, &proposed);

    let result = pool.try_accept_admin(&impostor);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
    assert_eq!(pool.get_admin(), admin);
}

#[test]
fn test_propose_admin_by_non_admin_fails() {
    let (env, pool, _collection, _admin) = setup(1, 0, 0);

    let intruder = Address::generate(&env);
    let result = pool.try_propose_admin(&intruder, &intruder);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::Unauthorized),
        _ => unreachable!("Expected Unauthorized error"),
    }
}

#[test]
fn test_cancel_admin_transfer() {
    let (env, pool, _collection, admin) = setup(1, 0, 0);

    let proposed = Address::generate(&env);
    pool.propose_admin(&admin, &proposed);
    pool.cancel_admin_transfer(&admin);
    assert_eq!(pool.get_pending_admin(), None);

    // Accepting after cancellation has nothing to accept.
    let result = pool.try_accept_admin(&proposed);
    match result {
        Err(Ok(e)) => assert_eq!(e, ContractError::InvalidInput),
        _ => unreachable!("Expected InvalidInput error"),
    }
}

// ── Accumulator flush ordering ────────────────────────────────────────────────

#[test]
fn test_rate_zero_stops_accrual() {
    let (env, pool, collection, admin) = setup(2, 0, 0);

    let staker = Address::generate(&env);
    collection.mint(&admin, &staker, &1);
    collection.approve(&staker, &pool.address, &1);
    pool.stake(&staker, &1);

    advance_blocks(&env, 5);
    pool.set_reward_per_block(&admin, &0);

    advance_blocks(&env, 100);
    assert_eq!(pool.get_pending_rewards(&staker), 10);
}
