//! Block-based reward accumulator math.
//!
//! `RPI` ("reward per item") is the cumulative reward one staked item has
//! earned since pool genesis, measured in ledger sequence numbers. Each item
//! earns `reward_per_block` independently rather than sharing a pot, so the
//! arithmetic is exact and needs no precision scaling. A staker checkpoint
//! credits `amount_staked × (RPI_now − rpi_paid)` and re-snapshots
//! `rpi_paid`; because every stake/unstake checkpoints first, accrual is
//! always computed over a constant-stake interval.

/// Roll the stored accumulator forward by `blocks_elapsed` blocks.
pub fn accumulator_at(stored_rpi: i128, reward_per_block: i128, blocks_elapsed: u32) -> i128 {
    let delta = reward_per_block
        .checked_mul(blocks_elapsed as i128)
        .unwrap_or(i128::MAX);
    stored_rpi.saturating_add(delta)
}

/// Reward owed to a staker with `amount_staked` items since their last
/// snapshot at `rpi_paid`.
pub fn staker_delta(amount_staked: u32, rpi_now: i128, rpi_paid: i128) -> i128 {
    let per_item = rpi_now.saturating_sub(rpi_paid);
    (amount_staked as i128).checked_mul(per_item).unwrap_or(i128::MAX)
}
