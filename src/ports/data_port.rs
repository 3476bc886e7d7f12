//! Market-data retrieval port trait.

use crate::domain::bar::Bar;
use crate::domain::error::BotError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// A tradable instrument in the brokerage catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub tradable: bool,
}

pub trait MarketDataPort {
    /// 1-minute bars, sorted ascending by timestamp.
    fn get_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, BotError>;

    /// Daily bars for a batch of symbols, used by the universe builder.
    fn get_daily_bars(
        &self,
        symbols: &[String],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<Bar>>, BotError>;

    /// Active instruments from the brokerage catalog.
    fn list_tradable_instruments(&self) -> Result<Vec<Instrument>, BotError>;
}
