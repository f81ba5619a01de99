//! Currency rounding helpers.
//!
//! Point costs are decimal values shown with two fractional digits.
//! Rounding happens once, where a total is returned, never on
//! intermediate terms.

/// Number of fractional digits in a point cost.
pub const CURRENCY_PRECISION: i32 = 2;

/// Round a point value to [`CURRENCY_PRECISION`] decimal places.
///
/// Halves round away from zero.
#[must_use]
pub fn round_currency(value: f64) -> f64 {
    let scale = 10f64.powi(CURRENCY_PRECISION);
    (value * scale).round() / scale
}

/// Round a point value and raise it to at least `floor`.
#[must_use]
pub fn round_with_floor(value: f64, floor: f64) -> f64 {
    round_currency(value).max(floor)
}
