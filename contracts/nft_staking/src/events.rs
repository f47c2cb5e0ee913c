#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the pool is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub collection: Address,
    pub reward_token: Address,
    pub unbonding_time: u64,
    pub delay_time: u64,
    pub reward_per_block: i128,
    pub timestamp: u64,
}

/// Fired when an item enters custody.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub staker: Address,
    pub item_id: u64,
    pub amount_staked: u32,
    pub total_staked: u64,
    pub timestamp: u64,
}

/// Fired when an item is returned to its staker.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnstakedEvent {
    pub staker: Address,
    pub item_id: u64,
    pub amount_staked: u32,
    pub total_staked: u64,
    pub timestamp: u64,
}

/// Fired when a payout is requested (phase one of a claim).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClaimRequestedEvent {
    pub staker: Address,
    pub accrued: i128,
    pub payable_at: u64,
    pub timestamp: u64,
}

/// Fired when accrued rewards are paid out (phase two of a claim).
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub staker: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the per-block emission rate.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPerBlockSetEvent {
    pub new_rate: i128,
    pub timestamp: u64,
}

/// Fired when the admin changes the payout delay.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DelayTimeSetEvent {
    pub new_delay: u64,
    pub timestamp: u64,
}

/// Fired when the admin changes the unbonding time.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnbondingTimeSetEvent {
    pub new_unbonding: u64,
    pub timestamp: u64,
}

/// Fired when an admin transfer is proposed.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferProposedEvent {
    pub current_admin: Address,
    pub proposed_admin: Address,
    pub timestamp: u64,
}

/// Fired when an admin transfer is accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferAcceptedEvent {
    pub old_admin: Address,
    pub new_admin: Address,
    pub timestamp: u64,
}

/// Fired when a pending admin transfer is cancelled.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminTransferCancelledEvent {
    pub admin: Address,
    pub cancelled_proposed: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    admin: Address,
    collection: Address,
    reward_token: Address,
    unbonding_time: u64,
    delay_time: u64,
    reward_per_block: i128,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            admin,
            collection,
            reward_token,
            unbonding_time,
            delay_time,
            reward_per_block,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_staked(
    env: &Env,
    staker: Address,
    item_id: u64,
    amount_staked: u32,
    total_staked: u64,
) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        StakedEvent {
            staker,
            item_id,
            amount_staked,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unstaked(
    env: &Env,
    staker: Address,
    item_id: u64,
    amount_staked: u32,
    total_staked: u64,
) {
    env.events().publish(
        (symbol_short!("UNSTAKED"), staker.clone()),
        UnstakedEvent {
            staker,
            item_id,
            amount_staked,
            total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_claim_requested(env: &Env, staker: Address, accrued: i128, payable_at: u64) {
    env.events().publish(
        (symbol_short!("CLM_REQ"), staker.clone()),
        ClaimRequestedEvent {
            staker,
            accrued,
            payable_at,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_rewards_claimed(env: &Env, staker: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("CLMD"), staker.clone()),
        RewardsClaimedEvent {
            staker,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_per_block_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RWD_SET"),),
        RewardPerBlockSetEvent {
            new_rate,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_delay_time_set(env: &Env, new_delay: u64) {
    env.events().publish(
        (symbol_short!("DLY_SET"),),
        DelayTimeSetEvent {
            new_delay,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_unbonding_time_set(env: &Env, new_unbonding: u64) {
    env.events().publish(
        (symbol_short!("UNB_SET"),),
        UnbondingTimeSetEvent {
            new_unbonding,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_proposed(env: &Env, current_admin: Address, proposed_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_PROP"), current_admin.clone()),
        AdminTransferProposedEvent {
            current_admin,
            proposed_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_accepted(env: &Env, old_admin: Address, new_admin: Address) {
    env.events().publish(
        (symbol_short!("ADM_ACPT"), new_admin.clone()),
        AdminTransferAcceptedEvent {
            old_admin,
            new_admin,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_admin_transfer_cancelled(env: &Env, admin: Address, cancelled_proposed: Address) {
    env.events().publish(
        (symbol_short!("ADM_CNCL"), admin.clone()),
        AdminTransferCancelledEvent {
            admin,
            cancelled_proposed,
            timestamp: env.ledger().timestamp(),
        },
    );
}
