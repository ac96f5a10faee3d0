//! Wire models for the market-data endpoint.

pub mod sample;

pub use sample::{BEARISH_COLOR, BULLISH_COLOR, Sample, parse_samples};
