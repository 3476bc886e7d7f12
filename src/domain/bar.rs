//! Intraday OHLCV bar representation.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One aggregated trade interval for a symbol. A bar series is a `Vec<Bar>`
/// strictly increasing by timestamp with no duplicates; the data adapter is
/// responsible for returning it sorted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Bar {
    #[serde(rename = "t")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "o")]
    pub open: f64,
    #[serde(rename = "h")]
    pub high: f64,
    #[serde(rename = "l")]
    pub low: f64,
    #[serde(rename = "c")]
    pub close: f64,
    #[serde(rename = "v")]
    pub volume: f64,
}

/// Latest close of a series, if any.
pub fn last_close(bars: &[Bar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}
