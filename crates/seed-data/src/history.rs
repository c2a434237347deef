use chrono::{Days, NaiveDate};
use core_types::HistoricalPoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::FromPrimitive;

/// Floor applied after every step so the series never reaches zero.
const MIN_VALUE: f64 = 0.1;

/// Generates a daily random-walk series of `days + 1` points ending on `end`.
///
/// Each step moves the value by `(r - 0.45) * volatility` where `r` is uniform in
/// `[0, 1)`, which gives the walk a slight upward drift. Values are rounded to two
/// decimals. The same `seed` always yields the same series.
pub fn generate_history(
    days: u32,
    initial_value: f64,
    volatility: f64,
    end: NaiveDate,
    seed: u64,
) -> Vec<HistoricalPoint> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut current = initial_value;
    let mut series = Vec::with_capacity(days as usize + 1);

    for offset in (0..=days).rev() {
        let Some(date) = end.checked_sub_days(Days::new(u64::from(offset))) else {
            continue;
        };
        let change = (rng.random::<f64>() - 0.45) * volatility;
        current = (current * (1.0 + change)).max(MIN_VALUE);
        series.push(HistoricalPoint {
            date,
            value: to_cents(current),
        });
    }

    series
}

/// Two decimals, halves rounded away from zero.
fn to_cents(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .unwrap_or(Decimal::ZERO)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
