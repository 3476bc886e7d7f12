//! Trade log persistence port trait.

use crate::domain::error::BotError;
use crate::domain::trade::TradeRecord;

/// Outcome of an append, made explicit so the create-vs-append branch is
/// visible to callers instead of buried in error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWrite {
    /// The log file was created and a header written before the row.
    Created,
    /// The row was appended to an existing log.
    Appended,
}

pub trait TradeLogPort {
    fn append(&self, record: &TradeRecord) -> Result<LogWrite, BotError>;

    /// All records in write order.
    fn read_all(&self) -> Result<Vec<TradeRecord>, BotError>;
}
