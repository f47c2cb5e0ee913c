#![no_std]

//! Custodial staking pool for a single NFT collection.
//!
//! Holders lock items from one collection and accrue a fungible reward per
//! ledger sequence number ("block") per item. Principal is gated by an
//! unbonding time counted from each item's stake timestamp; payouts are
//! gated by a separate delay between a claim request and its delivery.

pub mod errors;
pub mod events;
pub mod records;
pub mod rewards;

use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol, Vec};

use collection::CollectionClient;
pub use errors::{ContractError, ErrorCategory};
pub use records::{ItemRecord, StakerRecord};

// ── Storage key constants ────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const PENDING_ADMIN: Symbol = symbol_short!("PEND_ADM");
const INITIALIZED: Symbol = symbol_short!("INIT");
const COLLECTION: Symbol = symbol_short!("COLL");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_PER_BLOCK: Symbol = symbol_short!("RWD_BLK");
const UNBONDING_TIME: Symbol = symbol_short!("UNBOND");
const DELAY_TIME: Symbol = symbol_short!("DELAY");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const RPI: Symbol = symbol_short!("RPI");
const LAST_ACC_SEQ: Symbol = symbol_short!("LAST_SEQ");

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct NftStakingContract;

#[contractimpl]
impl NftStakingContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the pool.
    ///
    /// * `collection`       – address of the item registry being staked.
    /// * `reward_token`     – SAC address of the token paid out as rewards.
    /// * `unbonding_time`   – seconds an item must stay staked before `unstake`.
    /// * `delay_time`       – seconds between a claim request and its payout.
    /// * `reward_per_block` – reward units emitted **per item per block**.
    pub fn initialize(
        env: Env,
        admin: Address,
        collection: Address,
        reward_token: Address,
        unbonding_time: u64,
        delay_time: u64,
        reward_per_block: i128,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&COLLECTION, &collection);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&UNBONDING_TIME, &unbonding_time);
        env.storage().instance().set(&DELAY_TIME, &delay_time);
        env.storage()
            .instance()
            .set(&REWARD_PER_BLOCK, &reward_per_block);
        // Seed the accumulator at the current block so accrual counts only
        // blocks produced after genesis. TOTAL_STAKED and RPI start at zero;
        // unwrap_or(0) handles absent keys, so no explicit init needed.
        env.storage()
            .instance()
            .set(&LAST_ACC_SEQ, &env.ledger().sequence());

        events::publish_initialized(
            &env,
            admin,
            collection,
            reward_token,
            unbonding_time,
            delay_time,
            reward_per_block,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Take custody of `item_id` on behalf of `staker`.
    ///
    /// The staker's accrual is checkpointed before the position grows, so
    /// the new item earns nothing retroactively. All local state is
    /// committed before the external transfer; a rejected transfer traps
    /// and the host reverts the invocation as a whole.
    pub fn stake(env: Env, staker: Address, item_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if records::get_item(&env, item_id).is_some() {
            return Err(ContractError::AlreadyStaked);
        }

        let collection_addr: Address = env
            .storage()
            .instance()
            .get(&COLLECTION)
            .ok_or(ContractError::NotInitialized)?;
        let collection = CollectionClient::new(&env, &collection_addr);
        if collection.owner_of(&item_id) != staker {
            return Err(ContractError::NotOwner);
        }

        // 1. Checkpoint before the position changes so accrual is computed
        //    over a constant-stake interval.
        let mut record = Self::checkpoint_staker(&env, &staker);

        // 2. Commit the new position.
        let now = env.ledger().timestamp();
        record.staked_items.push_back(item_id);
        record.amount_staked = record.amount_staked.saturating_add(1);
        record.last_stake_at = now;
        records::put_staker(&env, &staker, &record);
        records::put_item(
            &env,
            item_id,
            &ItemRecord {
                staker: staker.clone(),
                staked_at: now,
            },
        );

        let total: u64 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = total.saturating_add(1);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // 3. Pull the item into custody. Requires a prior approval of the
        //    pool for this item on the collection.
        let pool = env.current_contract_address();
        collection.transfer_from(&pool, &staker, &pool, &item_id);

        events::publish_staked(&env, staker, item_id, record.amount_staked, new_total);

        Ok(())
    }

    // ── Unstaking ───────────────────────────────────────────────────────────

    /// Return `item_id` to `staker` once its unbonding time has elapsed.
    ///
    /// The gate is evaluated against the current global `unbonding_time`,
    /// not the value in force when the item was staked. Accrued rewards are
    /// never forfeited: they stay payable via `claim_rewards` even after
    /// the last item leaves.
    pub fn unstake(env: Env, staker: Address, item_id: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let item = records::get_item(&env, item_id).ok_or(ContractError::NotStaked)?;
        if item.staker != staker {
            return Err(ContractError::NotStaked);
        }

        let unbonding_time: u64 = env.storage().instance().get(&UNBONDING_TIME).unwrap_or(0);
        let now = env.ledger().timestamp();
        if now.saturating_sub(item.staked_at) < unbonding_time {
            return Err(ContractError::UnbondingNotElapsed);
        }

        // 1. Checkpoint at the outgoing stake level.
        let mut record = Self::checkpoint_staker(&env, &staker);

        // 2. Commit the shrunken position.
        if let Some(index) = record.staked_items.first_index_of(item_id) {
            record.staked_items.remove(index);
        }
        record.amount_staked = record.amount_staked.saturating_sub(1);
        records::put_staker(&env, &staker, &record);
        records::remove_item(&env, item_id);

        let total: u64 = env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0);
        let new_total = total.saturating_sub(1);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);

        // 3. Release custody back to the staker.
        let collection_addr: Address = env
            .storage()
            .instance()
            .get(&COLLECTION)
            .ok_or(ContractError::NotInitialized)?;
        CollectionClient::new(&env, &collection_addr).transfer(
            &env.current_contract_address(),
            &staker,
            &item_id,
        );

        events::publish_unstaked(&env, staker, item_id, record.amount_staked, new_total);

        Ok(())
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Two-phase delayed payout of accrued rewards.
    ///
    /// The first call with a non-zero accrued balance records a claim
    /// request and moves no funds. A later call made `delay_time` seconds
    /// or more after the request pays out the full accrued balance,
    /// including anything earned while the delay ran. A call inside the
    /// delay window fails with `ClaimPending`.
    pub fn claim_rewards(env: Env, staker: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        let mut record = Self::checkpoint_staker(&env, &staker);
        let now = env.ledger().timestamp();

        if !record.claim_pending {
            if record.accrued_rewards == 0 {
                return Err(ContractError::NothingToClaim);
            }

            record.claim_pending = true;
            record.last_claim_request_at = now;
            records::put_staker(&env, &staker, &record);

            let delay_time: u64 = env.storage().instance().get(&DELAY_TIME).unwrap_or(0);
            events::publish_claim_requested(
                &env,
                staker,
                record.accrued_rewards,
                now.saturating_add(delay_time),
            );

            return Ok(0);
        }

        let delay_time: u64 = env.storage().instance().get(&DELAY_TIME).unwrap_or(0);
        if now.saturating_sub(record.last_claim_request_at) < delay_time {
            return Err(ContractError::ClaimPending);
        }

        let amount = record.accrued_rewards;

        let reward_token: Address = env
            .storage()
            .instance()
            .get(&REWARD_TOKEN)
            .ok_or(ContractError::NotInitialized)?;
        let reward = token::Client::new(&env, &reward_token);

        // Fail loudly rather than truncating so an operator can top up.
        let pool = env.current_contract_address();
        if reward.balance(&pool) < amount {
            return Err(ContractError::InsufficientRewardPool);
        }

        // Zero the balance before the external transfer.
        record.accrued_rewards = 0;
        record.claim_pending = false;
        records::put_staker(&env, &staker, &record);

        reward.transfer(&pool, &staker, &amount);

        events::publish_rewards_claimed(&env, staker, amount);

        Ok(amount)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Return the full staking record for an address (zero record if the
    /// address has never staked).
    pub fn get_staker(env: Env, staker: Address) -> StakerRecord {
        records::get_staker(&env, &staker)
    }

    /// Return real-time pending rewards for a staker without mutating state.
    pub fn get_pending_rewards(env: Env, staker: Address) -> i128 {
        let stored_rpi: i128 = env.storage().instance().get(&RPI).unwrap_or(0);
        let rate: i128 = env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0);
        let last_seq: u32 = env.storage().instance().get(&LAST_ACC_SEQ).unwrap_or(0);

        let blocks = env.ledger().sequence().saturating_sub(last_seq);
        let rpi_now = rewards::accumulator_at(stored_rpi, rate, blocks);

        let record = records::get_staker(&env, &staker);
        record.accrued_rewards.saturating_add(rewards::staker_delta(
            record.amount_staked,
            rpi_now,
            record.rpi_paid,
        ))
    }

    /// Return the item ids currently staked by an address.
    pub fn get_staked_items(env: Env, staker: Address) -> Vec<u64> {
        records::get_staker(&env, &staker).staked_items
    }

    /// Return who staked `item_id`, if anyone.
    pub fn get_item_staker(env: Env, item_id: u64) -> Option<Address> {
        records::get_item(&env, item_id).map(|item| item.staker)
    }

    /// Return the reward units emitted per item per block.
    pub fn get_reward_per_block(env: Env) -> i128 {
        env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0)
    }

    /// Return the configured payout delay in seconds.
    pub fn get_delay_time(env: Env) -> u64 {
        env.storage().instance().get(&DELAY_TIME).unwrap_or(0)
    }

    /// Return the configured unbonding time in seconds.
    pub fn get_unbonding_time(env: Env) -> u64 {
        env.storage().instance().get(&UNBONDING_TIME).unwrap_or(0)
    }

    /// Return the number of items currently in custody across all stakers.
    pub fn get_total_staked(env: Env) -> u64 {
        env.storage().instance().get(&TOTAL_STAKED).unwrap_or(0)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    // ── Admin transfer (two-step) ──────────────────────────────────────────

    /// Propose a new admin address. Only the current admin can call this.
    /// The new admin must call `accept_admin` to complete the transfer.
    pub fn propose_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        env.storage().instance().set(&PENDING_ADMIN, &new_admin);

        events::publish_admin_transfer_proposed(&env, current_admin, new_admin);

        Ok(())
    }

    /// Accept the pending admin transfer. Only the proposed new admin can
    /// call this.
    pub fn accept_admin(env: Env, new_admin: Address) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        new_admin.require_auth();

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        if new_admin != pending {
            return Err(ContractError::Unauthorized);
        }

        let old_admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_accepted(&env, old_admin, new_admin);

        Ok(())
    }

    /// Cancel a pending admin transfer. Only the current admin can call this.
    pub fn cancel_admin_transfer(
        env: Env,
        current_admin: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        current_admin.require_auth();
        Self::require_admin(&env, &current_admin)?;

        let pending: Address = env
            .storage()
            .instance()
            .get(&PENDING_ADMIN)
            .ok_or(ContractError::InvalidInput)?;

        env.storage().instance().remove(&PENDING_ADMIN);

        events::publish_admin_transfer_cancelled(&env, current_admin, pending);

        Ok(())
    }

    /// Get the pending admin address, if any.
    pub fn get_pending_admin(env: Env) -> Option<Address> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    // ── Admin functions ──────────────────────────────────────────────────────

    /// Update the per-item emission rate.
    ///
    /// The global accumulator is flushed at the current rate *before* the
    /// rate changes, so past intervals are never repriced.
    pub fn set_reward_per_block(
        env: Env,
        caller: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        // Flush accumulator at old rate before changing.
        Self::flush_accumulator(&env);

        env.storage().instance().set(&REWARD_PER_BLOCK, &new_rate);

        events::publish_reward_per_block_set(&env, new_rate);

        Ok(())
    }

    /// Update the payout delay. Applies to every subsequent gate check,
    /// including requests already pending.
    pub fn set_delay_time(env: Env, caller: Address, new_delay: u64) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&DELAY_TIME, &new_delay);

        events::publish_delay_time_set(&env, new_delay);

        Ok(())
    }

    /// Update the unbonding time. Applies to every subsequent gate check,
    /// including items already staked.
    pub fn set_unbonding_time(
        env: Env,
        caller: Address,
        new_unbonding: u64,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        caller.require_auth();
        Self::require_admin(&env, &caller)?;

        env.storage().instance().set(&UNBONDING_TIME, &new_unbonding);

        events::publish_unbonding_time_set(&env, new_unbonding);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored admin.
    fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)?;
        if *caller != admin {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    /// Roll the global reward-per-item accumulator forward to the current
    /// ledger sequence and persist it. Returns the up-to-date value.
    ///
    /// Unlike a pot-shared accumulator this advances even while nothing is
    /// staked: each item earns the full per-block rate independently, so an
    /// empty pool simply has nobody to credit.
    fn flush_accumulator(env: &Env) -> i128 {
        let stored_rpi: i128 = env.storage().instance().get(&RPI).unwrap_or(0);
        let rate: i128 = env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0);
        let last_seq: u32 = env.storage().instance().get(&LAST_ACC_SEQ).unwrap_or(0);

        let seq = env.ledger().sequence();
        let rpi_now = rewards::accumulator_at(stored_rpi, rate, seq.saturating_sub(last_seq));

        env.storage().instance().set(&RPI, &rpi_now);
        env.storage().instance().set(&LAST_ACC_SEQ, &seq);

        rpi_now
    }

    /// Full per-staker accrual checkpoint.
    ///
    /// 1. Flush the global accumulator.
    /// 2. Credit everything the staker earned since their last snapshot.
    /// 3. Re-snapshot so the next interval starts fresh.
    ///
    /// Called at the top of every operation that reads or changes a
    /// position, which keeps `amount_staked` constant across each accrued
    /// interval.
    fn checkpoint_staker(env: &Env, staker: &Address) -> StakerRecord {
        let rpi_now = Self::flush_accumulator(env);

        let mut record = records::get_staker(env, staker);
        let delta = rewards::staker_delta(record.amount_staked, rpi_now, record.rpi_paid);
        record.accrued_rewards = record.accrued_rewards.saturating_add(delta);
        record.rpi_paid = rpi_now;
        records::put_staker(env, staker, &record);

        record
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod test_admin;
