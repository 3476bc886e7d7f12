//! Universe cache port trait.

use crate::domain::error::BotError;
use chrono::{DateTime, Utc};

/// Explicit cache lookup result. Absent, unreadable, or stale entries all
/// surface as `Miss` so the builder's branching stays in its own control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    Hit(Vec<String>),
    Miss,
}

pub trait UniverseCachePort {
    fn load(&self, ttl_minutes: i64, now: DateTime<Utc>) -> CacheLookup;

    fn save(&self, symbols: &[String], now: DateTime<Utc>) -> Result<(), BotError>;
}
