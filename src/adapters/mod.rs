//! Concrete adapter implementations for ports.

pub mod alpaca;
pub mod alpaca_broker;
pub mod alpaca_data;
pub mod csv_trade_log;
pub mod file_config_adapter;
pub mod json_status;
pub mod json_universe_cache;
