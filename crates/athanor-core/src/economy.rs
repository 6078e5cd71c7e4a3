//! Cost curves and prestige requirements.
//!
//! All curves are computed in exact integer arithmetic -- no float powers in
//! the sim. Where a curve outgrows its integer type it saturates to
//! `u64::MAX`, which downstream checks treat as unaffordable/unreachable.

use crate::fixed::Fixed64;

/// Energy cost to raise an extractor from `level` to `level + 1`:
/// `floor(10 * 1.5^(level-1))`, computed exactly as `(10 * 3^n) >> n`.
/// Saturates once `10 * 3^n` no longer fits in u128 (n > 76).
pub fn upgrade_cost(level: u32) -> u64 {
    let n = level.saturating_sub(1);
    let Some(pow) = 3u128.checked_pow(n) else {
        return u64::MAX;
    };
    let Some(numerator) = pow.checked_mul(10) else {
        return u64::MAX;
    };
    u64::try_from(numerator >> n).unwrap_or(u64::MAX)
}

/// What a resource must reach before its next calcination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalcinationRequirements {
    /// Minimum extractor level: `10 + 5 * count`.
    pub level: u32,
    /// Minimum lifetime production: `1000 * 2^count`.
    pub production: u64,
}

/// Requirements gating the next calcination, given how many have already
/// been performed on the resource. Each reset is strictly harder than the
/// last: linear in level, exponential in lifetime production.
pub fn calcination_requirements(calcinations: u32) -> CalcinationRequirements {
    let level = 10u32.saturating_add(calcinations.saturating_mul(5));
    let production = if calcinations >= 64 {
        u64::MAX
    } else {
        u64::try_from(1000u128 << calcinations).unwrap_or(u64::MAX)
    };
    CalcinationRequirements { level, production }
}

/// Permanent production multiplier after `calcinations` resets:
/// `1.0 + 0.15 * count`. A flat step per reset, not compounding.
pub fn purity_bonus(calcinations: u32) -> Fixed64 {
    Fixed64::from_num(1) + Fixed64::from_num(0.15) * Fixed64::from_num(calcinations)
}
