//! Dynamic universe construction: candidate filtering, liquidity ranking,
//! and time-boxed caching.
//!
//! The builder replaces the static symbol list with the most liquid
//! price-bounded candidates. Results are cached with a TTL so repeated loads
//! within the window cost no external calls; any failure falls back to the
//! configured static list at the call site, never to an empty universe.

use crate::domain::bar::last_close;
use crate::domain::error::BotError;
use crate::ports::data_port::MarketDataPort;
use crate::ports::universe_cache_port::{CacheLookup, UniverseCachePort};
use chrono::{DateTime, Duration, Utc};

/// Batch size for daily-bar requests, respecting data API limits.
const DAILY_BATCH: usize = 50;

/// Instrument symbols carrying this leading marker are reserved and excluded.
const RESERVED_MARKER: char = '$';

#[derive(Debug, Clone, PartialEq)]
pub struct UniverseConfig {
    pub enabled: bool,
    pub max_symbols: usize,
    pub max_candidates: usize,
    pub lookback_days: i64,
    pub min_price: f64,
    pub max_price: f64,
    pub cache_minutes: i64,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        UniverseConfig {
            enabled: false,
            max_symbols: 10,
            max_candidates: 200,
            lookback_days: 5,
            min_price: 5.0,
            max_price: 500.0,
            cache_minutes: 60,
        }
    }
}

/// Build the ranked universe, consulting the cache first.
///
/// On a cache miss: list tradable instruments (reserved symbols skipped,
/// capped at `max_candidates`), fetch daily bars over the lookback window in
/// batches, keep symbols whose latest close lies in `[min_price, max_price]`,
/// rank by descending average daily volume, persist the top `max_symbols`.
/// An empty ranking yields an empty list; the caller decides the fallback.
pub fn build_universe(
    cfg: &UniverseConfig,
    data: &dyn MarketDataPort,
    cache: &dyn UniverseCachePort,
    now: DateTime<Utc>,
) -> Result<Vec<String>, BotError> {
    if let CacheLookup::Hit(mut symbols) = cache.load(cfg.cache_minutes, now) {
        symbols.truncate(cfg.max_symbols);
        return Ok(symbols);
    }

    let candidates = candidate_symbols(cfg, data).map_err(|e| BotError::Universe {
        reason: e.to_string(),
    })?;
    let mut ranked = rank_by_volume(cfg, data, &candidates, now).map_err(|e| BotError::Universe {
        reason: e.to_string(),
    })?;
    if ranked.is_empty() {
        return Ok(vec![]);
    }

    ranked.truncate(cfg.max_symbols);
    cache.save(&ranked, now)?;
    Ok(ranked)
}

/// Resolve the trading universe, falling back to the static list when the
/// dynamic build is disabled, fails, or produces nothing.
pub fn load_universe(
    cfg: &UniverseConfig,
    fallback: &[String],
    data: &dyn MarketDataPort,
    cache: &dyn UniverseCachePort,
    now: DateTime<Utc>,
) -> Vec<String> {
    if !cfg.enabled {
        return fallback.to_vec();
    }

    match build_universe(cfg, data, cache, now) {
        Ok(symbols) if !symbols.is_empty() => {
            eprintln!("[universe] loaded dynamic symbols: {}", symbols.join(","));
            symbols
        }
        Ok(_) => {
            eprintln!("[universe] dynamic build yielded no symbols, using static list");
            fallback.to_vec()
        }
        Err(e) => {
            eprintln!("[universe] dynamic build failed ({e}), using static list");
            fallback.to_vec()
        }
    }
}

fn candidate_symbols(
    cfg: &UniverseConfig,
    data: &dyn MarketDataPort,
) -> Result<Vec<String>, BotError> {
    let instruments = data.list_tradable_instruments()?;
    let mut symbols = Vec::new();
    for instrument in instruments {
        if !instrument.tradable || instrument.symbol.starts_with(RESERVED_MARKER) {
            continue;
        }
        symbols.push(instrument.symbol);
        if symbols.len() >= cfg.max_candidates {
            break;
        }
    }
    Ok(symbols)
}

fn rank_by_volume(
    cfg: &UniverseConfig,
    data: &dyn MarketDataPort,
    candidates: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<String>, BotError> {
    let start = now - Duration::days(cfg.lookback_days);
    let mut rows: Vec<(String, f64)> = Vec::new();

    for batch in candidates.chunks(DAILY_BATCH) {
        let per_symbol = data.get_daily_bars(batch, start, now)?;
        // Iterate the batch, not the map, so ranking input order stays fixed.
        for symbol in batch {
            let Some(bars) = per_symbol.get(symbol) else {
                continue;
            };
            let Some(close) = last_close(bars) else {
                continue;
            };
            if close < cfg.min_price || close > cfg.max_price {
                continue;
            }
            let avg_volume =
                bars.iter().map(|b| b.volume).sum::<f64>() / bars.len() as f64;
            rows.push((symbol.clone(), avg_volume));
        }
    }

    rows.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok(rows.into_iter().map(|(symbol, _)| symbol).collect())
}
