//! Monetary helpers: two-place rounding and fractional-hour durations.
//!
//! Amounts are [`Decimal`] rather than `f64` so that half-up rounding is
//! exact at the midpoint (`1.425` rounds to `1.43`, not `1.42`).

use chrono::Duration;
use rust_decimal::{Decimal, RoundingStrategy};

const MILLIS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Rounds half-up to two decimal places.
///
/// Prices are never negative, so "away from zero" at the midpoint is the
/// same as rounding half-up.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a duration to fractional hours at millisecond resolution.
///
/// The result is not rounded.
#[must_use]
pub fn fractional_hours(duration: Duration) -> Decimal {
    Decimal::from(duration.num_milliseconds()) / Decimal::from(MILLIS_PER_HOUR)
}
