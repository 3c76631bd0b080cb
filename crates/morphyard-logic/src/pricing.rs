//! Pure pricing formula.
//!
//! An animal's value is the base price compounded once per morph and once
//! per het, then scaled by a variance factor drawn by the caller. The result
//! is rounded to cents and stays within [`PRICE_FLOOR`] and [`PRICE_CAP`].

use crate::constants::pricing::{
    BASE_PRICE, HET_MULTIPLIER, MORPH_MULTIPLIER, PRICE_CAP, PRICE_FLOOR, VARIANCE_MAX,
    VARIANCE_MIN,
};

/// Undiscounted value of a trait combination, before variance.
///
/// Capped at [`PRICE_CAP`], so huge trait lists cannot overflow to infinity.
pub fn base_value(morph_count: usize, het_count: usize) -> f64 {
    let value = BASE_PRICE
        * MORPH_MULTIPLIER.powi(exponent(morph_count))
        * HET_MULTIPLIER.powi(exponent(het_count));
    value.min(PRICE_CAP)
}

fn exponent(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Apply a variance factor to a base value and enforce the floor.
///
/// `variance` is expected in `[VARIANCE_MIN, VARIANCE_MAX]`; values outside
/// that range are clamped so a bad draw cannot produce a negative price.
pub fn apply_variance(base: f64, variance: f64) -> f64 {
    let variance = variance.clamp(VARIANCE_MIN, VARIANCE_MAX);
    enforce_floor(round_cents(base * variance))
}

/// Full valuation for the given trait counts and a variance sample.
pub fn value_with_variance(morph_count: usize, het_count: usize, variance: f64) -> f64 {
    apply_variance(base_value(morph_count, het_count), variance)
}

/// Bring a price within the floor and the cap.
pub fn enforce_floor(price: f64) -> f64 {
    price.clamp(PRICE_FLOOR, PRICE_CAP)
}

/// Round a monetary amount to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
