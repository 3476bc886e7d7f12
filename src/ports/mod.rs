//! Port traits consumed by the domain; implemented in [`crate::adapters`].

pub mod broker_port;
pub mod config_port;
pub mod data_port;
pub mod status_port;
pub mod trade_log_port;
pub mod universe_cache_port;
