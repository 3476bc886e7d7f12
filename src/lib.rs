//! rotortrader: strategy-rotation live trading bot.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`].
//!
//! Each cycle the bot scores every enabled strategy per symbol with a short
//! walk-forward backtest, takes the best one's live signal, sizes a
//! risk-bounded order, and halts the session when the daily loss limit trips.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
