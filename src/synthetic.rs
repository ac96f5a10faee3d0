//! In-process market-data generator.
//!
//! Produces the same payload the backend serves: a Gaussian random walk
//! with trailing 5- and 10-period simple moving averages and a ribbon color
//! derived from their crossover.

use std::collections::VecDeque;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::models::{BEARISH_COLOR, BULLISH_COLOR, Sample};

/// Standard deviation of one random-walk step.
const STEP_STDDEV: f64 = 5.0;

/// Seconds between consecutive samples.
const SAMPLE_SPACING_SECS: u64 = 60;

/// Generates `steps` samples starting from `start_price`.
///
/// `sma_5` is absent for the first four samples, `sma_10` for the first
/// nine, and `ribbon_color` until both exist. Values are rounded to two
/// decimal places; the crossover is decided on the unrounded averages.
pub fn generate_market_data<R: Rng>(
    steps: usize,
    start_price: f64,
    start_secs: u64,
    rng: &mut R,
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(steps);
    let mut window: VecDeque<f64> = VecDeque::with_capacity(10);
    let mut price = start_price;

    for i in 0..steps {
        price += gaussian(rng) * STEP_STDDEV;
        if window.len() == 10 {
            window.pop_front();
        }
        window.push_back(price);

        let sma_5 = trailing_mean(&window, 5);
        let sma_10 = trailing_mean(&window, 10);
        let ribbon_color = match (sma_5, sma_10) {
            (Some(fast), Some(slow)) if fast > slow => Some(BULLISH_COLOR.to_string()),
            (Some(_), Some(_)) => Some(BEARISH_COLOR.to_string()),
            _ => None,
        };

        samples.push(Sample {
            price: round2(price).unwrap_or_default(),
            sma_5: sma_5.and_then(round2),
            sma_10: sma_10.and_then(round2),
            ribbon_color,
            timestamp: Some(iso_timestamp(start_secs + i as u64 * SAMPLE_SPACING_SECS)),
        });
    }

    samples
}

/// Seconds since the Unix epoch, for seeding timestamps.
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn trailing_mean(window: &VecDeque<f64>, period: usize) -> Option<f64> {
    if window.len() < period {
        return None;
    }
    let sum: f64 = window.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

fn round2(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value).map(|d| d.round_dp(2))
}

/// Standard normal draw (Box-Muller).
fn gaussian<R: Rng>(rng: &mut R) -> f64 {
    // 1 - u keeps the logarithm argument in (0, 1].
    let u1: f64 = 1.0 - rng.r#gen::<f64>();
    let u2: f64 = rng.r#gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// Formats epoch seconds as an ISO 8601 UTC timestamp.
fn iso_timestamp(secs: u64) -> String {
    let (mut days, rem) = (secs / 86_400, secs % 86_400);

    let mut year = 1970;
    while days >= days_in_year(year) {
        days -= days_in_year(year);
        year += 1;
    }

    let february = if is_leap(year) { 29 } else { 28 };
    let mut month = 1;
    for len in [31, february, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31] {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }

    format!(
        "{year:04}-{month:02}-{:02}T{:02}:{:02}:{:02}Z",
        days + 1,
        rem / 3600,
        rem % 3600 / 60,
        rem % 60
    )
}

fn is_leap(year: u64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn days_in_year(year: u64) -> u64 {
    if is_leap(year) { 366 } else { 365 }
}
