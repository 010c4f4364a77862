//! Pure reward-accrual arithmetic.
//!
//! Kept free of storage and host types so the accounting can be checked in
//! isolation. All divisions floor; the accumulator carries twelve decimal
//! places of precision on top of the token's own units.

/// Fixed-point scale of the per-share accumulator.
pub const ACC_SCALE: i128 = 1_000_000_000_000;

/// Total reward a pool earns over `elapsed` heights.
///
/// The global emission is split across pools by weight.
pub fn pool_reward(elapsed: u32, rate: i128, weight: u128, total_weight: u128) -> i128 {
    if total_weight == 0 {
        return 0;
    }
    rate * elapsed as i128 * weight as i128 / total_weight as i128
}

/// Advance a pool accumulator by `reward` distributed over `total_staked`.
///
/// With nothing staked the accumulator must not move; the caller only
/// advances the pool's height marker in that case.
pub fn advance_accumulator(acc: i128, reward: i128, total_staked: i128) -> i128 {
    if total_staked <= 0 {
        return acc;
    }
    acc + reward * ACC_SCALE / total_staked
}

/// A stake's fully-settled reward at accumulator value `acc`.
pub fn settled(amount: i128, acc: i128) -> i128 {
    amount * acc / ACC_SCALE
}

/// Reward accrued since the stake's last settlement.
pub fn pending(amount: i128, acc: i128, reward_debt: i128) -> i128 {
    settled(amount, acc) - reward_debt
}

/// Referral commission on a paid reward, in basis points.
pub fn commission(reward: i128, commission_bp: u32) -> i128 {
    reward * commission_bp as i128 / 10_000
}

/// Deposit fee taken from an incoming stake, in basis points.
pub fn deposit_fee(amount: i128, fee_bp: u32) -> i128 {
    amount * fee_bp as i128 / 10_000
}
