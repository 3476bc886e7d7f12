//! JSON universe cache adapter.
//!
//! Stores `{timestamp, symbols}` and treats absent, unreadable, or
//! stale-beyond-TTL entries as a miss; the builder rebuilds on miss.

use crate::domain::error::BotError;
use crate::ports::universe_cache_port::{CacheLookup, UniverseCachePort};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    timestamp: DateTime<Utc>,
    symbols: Vec<String>,
}

pub struct JsonUniverseCache {
    path: PathBuf,
}

impl JsonUniverseCache {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UniverseCachePort for JsonUniverseCache {
    fn load(&self, ttl_minutes: i64, now: DateTime<Utc>) -> CacheLookup {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return CacheLookup::Miss;
        };
        let Ok(entry) = serde_json::from_str::<CacheEntry>(&content) else {
            return CacheLookup::Miss;
        };
        if now - entry.timestamp > Duration::minutes(ttl_minutes) {
            return CacheLookup::Miss;
        }
        CacheLookup::Hit(entry.symbols)
    }

    fn save(&self, symbols: &[String], now: DateTime<Utc>) -> Result<(), BotError> {
        let entry = CacheEntry {
            timestamp: now,
            symbols: symbols.to_vec(),
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|e| BotError::Io(e.into()))?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
