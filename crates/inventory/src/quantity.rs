//! Clamped stock arithmetic.
//!
//! Quantities are never negative. Clamping happens when a new working value is
//! computed, so later diffs see the post-clamp value.

/// `max(0, current + delta)`, saturating at `u64::MAX`.
pub fn clamp_adjust(current: u64, delta: i64) -> u64 {
    let next = i128::from(current) + i128::from(delta);
    clamp_i128(next)
}

/// `max(0, value)` for a directly entered quantity.
pub fn clamp_absolute(value: i64) -> u64 {
    clamp_i128(i128::from(value))
}

fn clamp_i128(value: i128) -> u64 {
    if value <= 0 {
        0
    } else {
        u64::try_from(value).unwrap_or(u64::MAX)
    }
}
