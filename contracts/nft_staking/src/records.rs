//! Staker record store: per-address positions and per-item custody entries,
//! kept in persistent storage under tuple keys and mutated only by the pool
//! contract.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

const STAKER: Symbol = symbol_short!("STAKER");
const ITEM: Symbol = symbol_short!("ITEM");

/// Per-address staking position.
///
/// Never deleted: after a full withdrawal the record persists at zero state
/// and keeps any unclaimed `accrued_rewards` payable.
#[contracttype]
#[derive(Clone, Debug)]
pub struct StakerRecord {
    /// Item ids currently custodied for this staker.
    pub staked_items: Vec<u64>,
    /// Always equals `staked_items.len()`.
    pub amount_staked: u32,
    /// Reward units checkpointed but not yet paid out.
    pub accrued_rewards: i128,
    /// Global accumulator value at this staker's last checkpoint.
    pub rpi_paid: i128,
    /// Ledger timestamp of the most recent stake.
    pub last_stake_at: u64,
    /// Ledger timestamp of the most recent claim request.
    pub last_claim_request_at: u64,
    /// A requested payout has not yet been delivered.
    pub claim_pending: bool,
}

impl StakerRecord {
    pub fn zero(env: &Env) -> Self {
        StakerRecord {
            staked_items: Vec::new(env),
            amount_staked: 0,
            accrued_rewards: 0,
            rpi_paid: 0,
            last_stake_at: 0,
            last_claim_request_at: 0,
            claim_pending: false,
        }
    }
}

/// Custody entry for a single staked item.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ItemRecord {
    /// Whose `StakerRecord` tracks the item.
    pub staker: Address,
    /// Stake timestamp the unbonding gate is evaluated against.
    pub staked_at: u64,
}

pub fn get_staker(env: &Env, staker: &Address) -> StakerRecord {
    env.storage()
        .persistent()
        .get(&(STAKER, staker.clone()))
        .unwrap_or_else(|| StakerRecord::zero(env))
}

pub fn put_staker(env: &Env, staker: &Address, record: &StakerRecord) {
    env.storage()
        .persistent()
        .set(&(STAKER, staker.clone()), record);
}

pub fn get_item(env: &Env, item_id: u64) -> Option<ItemRecord> {
    env.storage().persistent().get(&(ITEM, item_id))
}

pub fn put_item(env: &Env, item_id: u64, record: &ItemRecord) {
    env.storage().persistent().set(&(ITEM, item_id), record);
}

pub fn remove_item(env: &Env, item_id: u64) {
    env.storage().persistent().remove(&(ITEM, item_id));
}
