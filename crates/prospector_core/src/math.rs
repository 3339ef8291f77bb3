//! Fixed-point helpers for gain comparisons.
//!
//! Yields are fractions of a cell's halite, so comparing them in integers
//! would truncate. Fixed-point keeps the comparison exact and identical on
//! every platform.

use fixed::types::I32F32;

/// Fixed-point number type for all decision math.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Scale `value` by `percent` / 100.
#[must_use]
pub fn scale_percent(value: Fixed, percent: u32) -> Fixed {
    value * Fixed::from_num(percent) / Fixed::from_num(100)
}

/// Integer share of `amount` rounded down.
#[must_use]
pub const fn floor_div(amount: u32, ratio: u32) -> u32 {
    if ratio == 0 {
        0
    } else {
        amount / ratio
    }
}

/// Integer share of `amount` rounded up.
#[must_use]
pub const fn ceil_div(amount: u32, ratio: u32) -> u32 {
    if ratio == 0 {
        0
    } else {
        amount.div_ceil(ratio)
    }
}

/// Whether `amount` is at least `percent` % of `capacity`.
#[must_use]
pub const fn at_least_percent(amount: u32, capacity: u32, percent: u32) -> bool {
    (amount as u64) * 100 >= (capacity as u64) * (percent as u64)
}
