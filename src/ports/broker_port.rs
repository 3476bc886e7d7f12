//! Brokerage execution port trait.

use crate::domain::account::{AccountSnapshot, HeldPosition, OrderSide};
use crate::domain::error::BotError;

pub trait BrokerPort {
    fn account(&self) -> Result<AccountSnapshot, BotError>;

    fn positions(&self) -> Result<Vec<HeldPosition>, BotError>;

    /// Submit a day-time-in-force market order; returns the broker order id.
    fn submit_market_order(
        &self,
        symbol: &str,
        qty: i64,
        side: OrderSide,
    ) -> Result<String, BotError>;

    /// Close the full reported position for `symbol`.
    fn close_position(&self, symbol: &str) -> Result<(), BotError>;
}
