//! Rounding helpers shared by every module that produces a displayed figure.
//!
//! The breakdown aggregator rounds each addend independently before the final
//! sum; changing that order (or the tie-breaking rule) changes displayed
//! totals. All "round" operations in this crate go through [`round_half_up`].

/// Rounds to the nearest integer with halves going up.
///
/// `f64::round` sends halves away from zero, which disagrees on negative
/// input (-2.5 must round to -2 here, not -3). Non-finite values pass
/// through unchanged.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to one decimal place, halves up. Used for normalized bodyweights.
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}
