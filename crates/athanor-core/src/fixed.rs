use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
///
/// Quantities, lifetime totals, purity bonuses, and worker rates all use
/// this type so that fractional per-tick accumulation is deterministic and
/// drift-free. The integer range (about 2.1e9) bounds how much of a single
/// resource a session can hold; ledger arithmetic saturates at that bound.
pub type Fixed64 = I32F32;

/// Ticks are the atomic unit of simulation time. The host drives one tick
/// per external timer period.
pub type Ticks = u64;

/// Convert an f64 to Fixed64. Use only at initialization and data-loading
/// boundaries, never in the sim loop.
#[inline]
pub fn f64_to_fixed64(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

/// Convert Fixed64 to f64. Use only for display, never in the sim loop.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}
