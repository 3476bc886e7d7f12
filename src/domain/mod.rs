//! Core domain types and logic.

pub mod account;
pub mod bar;
pub mod bot;
pub mod config;
pub mod error;
pub mod market_hours;
pub mod risk;
pub mod selector;
pub mod stats;
pub mod strategies;
pub mod trade;
pub mod universe;
