//! Monetary rounding
//!
//! Values are rounded on their shortest decimal representation, so `1.005`
//! rounds to `1.01` even though the nearest `f64` sits slightly below it.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// Decimal places used for every published price
pub const MONETARY_PLACES: u32 = 2;

/// Round half-up to two places; absence stays absent
pub fn round_monetary(value: Option<f64>) -> Option<f64> {
    value.map(|v| round_half_up(v, MONETARY_PLACES))
}

/// Round half away from zero to `places` decimals
pub fn round_half_up(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    // f64 Display never uses exponent notation, which Decimal cannot parse
    match Decimal::from_str(&value.to_string()) {
        Ok(d) => d
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(value),
        // Out of Decimal range: binary rounding is as good as it gets there
        Err(_) => {
            let factor = 10f64.powi(places as i32);
            (value * factor).round() / factor
        }
    }
}
