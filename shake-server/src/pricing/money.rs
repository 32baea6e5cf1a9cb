//! Money helpers
//!
//! Amounts travel as `f64` (JSON, DOUBLE PRECISION columns) but every
//! calculation runs on `Decimal`. Rounding happens once, at output.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Largest fee a catalog item may carry
pub const MAX_FEE: f64 = 1_000_000.0;

/// Largest configurable discount cap
pub const MAX_DISCOUNT_AMOUNT: f64 = MAX_FEE;

/// Convert f64 to Decimal for display. Non-finite input becomes zero.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert f64 to Decimal when it lies in `[0, max]`
pub fn bounded_decimal(value: f64, max: f64) -> Option<Decimal> {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return None;
    }
    Decimal::from_f64(value)
}

/// Round to cents, half away from zero
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert Decimal back to f64 for output, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// `value * percentage / 100`, unrounded. `None` on overflow.
#[inline]
pub fn percent_of(value: Decimal, percentage: Decimal) -> Option<Decimal> {
    value
        .checked_mul(percentage)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// "R25.00"
pub fn format_rand(value: f64) -> String {
    format!("R{:.2}", to_f64(to_decimal(value)))
}
