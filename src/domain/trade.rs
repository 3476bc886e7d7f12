//! Trade log records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One completed sell, appended to the trade log and never mutated.
/// Entries are not logged; a record is written only when a position closes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub date: NaiveDate,
    pub symbol: String,
    pub strategy: String,
    pub side: String,
    pub qty: i64,
    pub entry: f64,
    pub exit: f64,
    pub pnl: f64,
}
