//! Market-data samples returned by the `/api/market-data` endpoint.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Ribbon color the backend assigns while the fast average is above the slow one.
pub const BULLISH_COLOR: &str = "#0ebb23";

/// Ribbon color the backend assigns otherwise.
pub const BEARISH_COLOR: &str = "#FF0000";

/// One point of the time-ordered market-data sequence.
///
/// The position of a sample in its sequence is its time coordinate;
/// `timestamp` is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub price: Decimal,
    #[serde(default)]
    pub sma_5: Option<Decimal>,
    #[serde(default)]
    pub sma_10: Option<Decimal>,
    /// Hex color hint (`#rrggbb`), absent until both averages exist.
    #[serde(default)]
    pub ribbon_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl Sample {
    /// Returns `true` when the ribbon color is exactly the bullish constant.
    ///
    /// Any other color, including a differently cased spelling, is bearish.
    pub fn is_bullish(&self) -> bool {
        self.ribbon_color.as_deref() == Some(BULLISH_COLOR)
    }
}

/// Parses and validates a market-data response body.
///
/// The body must be a JSON array. Each entry is decoded on its own so a
/// failure names the offending index instead of reporting a bare serde
/// position. `ribbon_color` is a free-form hint and any string is kept.
///
/// # Errors
///
/// - [`RibbonError::Json`](crate::RibbonError::Json) if the body is not JSON.
/// - [`RibbonError::MalformedPayload`](crate::RibbonError::MalformedPayload)
///   if the top-level value is not an array.
/// - [`RibbonError::MalformedSample`](crate::RibbonError::MalformedSample)
///   if an entry lacks a numeric `price` or a field has the wrong type.
pub fn parse_samples(body: &str) -> crate::Result<Vec<Sample>> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(crate::RibbonError::MalformedPayload(
            "expected a JSON array of samples".to_string(),
        ));
    };

    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| {
            serde_json::from_value(entry).map_err(|e| crate::RibbonError::MalformedSample {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}
