//! Bot configuration assembly and validation.
//!
//! All recognized options are read through [`ConfigPort`] and validated up
//! front so the loop never starts on a bad configuration.

use crate::domain::error::BotError;
use crate::domain::strategies::strategy_by_name;
use crate::domain::universe::UniverseConfig;
use crate::ports::config_port::ConfigPort;
use chrono_tz::Tz;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct RiskConfig {
    pub max_daily_loss_pct: f64,
    pub per_trade_risk_pct: f64,
    pub stop_loss_pct: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectorConfig {
    pub score_window_bars: usize,
    pub min_score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilesConfig {
    pub trade_log: PathBuf,
    pub status: PathBuf,
    pub universe_cache: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub symbols: Vec<String>,
    pub interval_minutes: i64,
    pub lookback_days: i64,
    pub max_positions: usize,
    pub timezone: Tz,
    pub risk: RiskConfig,
    pub selector: SelectorConfig,
    pub enabled_strategies: Vec<String>,
    pub universe: UniverseConfig,
    pub files: FilesConfig,
}

impl BotConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BotError> {
        let symbols: Vec<String> = config
            .get_list("trading", "symbols")
            .into_iter()
            .map(|s| s.to_uppercase())
            .collect();
        if symbols.is_empty() {
            return Err(BotError::ConfigMissing {
                section: "trading".into(),
                key: "symbols".into(),
            });
        }

        let interval_minutes = config.get_int("trading", "interval_minutes", 5);
        if interval_minutes < 1 {
            return Err(invalid("trading", "interval_minutes", "must be at least 1"));
        }
        let lookback_days = config.get_int("trading", "lookback_days", 2);
        if lookback_days < 1 {
            return Err(invalid("trading", "lookback_days", "must be at least 1"));
        }
        let max_positions = config.get_int("trading", "max_positions", 5);
        if max_positions < 1 {
            return Err(invalid("trading", "max_positions", "must be at least 1"));
        }

        let tz_name = config
            .get_string("trading", "timezone")
            .unwrap_or_else(|| "America/New_York".to_string());
        let timezone: Tz = tz_name
            .parse()
            .map_err(|_| invalid("trading", "timezone", "unknown IANA time zone"))?;

        let risk = RiskConfig {
            max_daily_loss_pct: positive_pct(config, "risk", "max_daily_loss_pct", 0.03)?,
            per_trade_risk_pct: positive_pct(config, "risk", "per_trade_risk_pct", 0.01)?,
            stop_loss_pct: {
                let value = config.get_double("risk", "stop_loss_pct", 0.02);
                if value < 0.0 {
                    return Err(invalid("risk", "stop_loss_pct", "must be non-negative"));
                }
                value
            },
        };

        let score_window_bars = config.get_int("selector", "score_window_bars", 200);
        if score_window_bars < 1 {
            return Err(invalid("selector", "score_window_bars", "must be at least 1"));
        }
        let selector = SelectorConfig {
            score_window_bars: score_window_bars as usize,
            min_score: config.get_double("selector", "min_score", 0.0),
        };

        let enabled_strategies = config.get_list("strategies", "enabled");
        if enabled_strategies.is_empty() {
            return Err(BotError::ConfigMissing {
                section: "strategies".into(),
                key: "enabled".into(),
            });
        }
        for name in &enabled_strategies {
            if strategy_by_name(name).is_none() {
                return Err(invalid(
                    "strategies",
                    "enabled",
                    &format!("unknown strategy: {name}"),
                ));
            }
        }

        let universe = build_universe_config(config)?;
        let files = FilesConfig {
            trade_log: config
                .get_string("files", "trade_log")
                .unwrap_or_else(|| "trades.csv".to_string())
                .into(),
            status: config
                .get_string("files", "status")
                .unwrap_or_else(|| "status.json".to_string())
                .into(),
            universe_cache: config
                .get_string("files", "universe_cache")
                .unwrap_or_else(|| "universe_cache.json".to_string())
                .into(),
        };

        Ok(BotConfig {
            symbols,
            interval_minutes,
            lookback_days,
            max_positions: max_positions as usize,
            timezone,
            risk,
            selector,
            enabled_strategies,
            universe,
            files,
        })
    }
}

fn build_universe_config(config: &dyn ConfigPort) -> Result<UniverseConfig, BotError> {
    let defaults = UniverseConfig::default();
    let min_price = config.get_double("universe", "min_price", defaults.min_price);
    let max_price = config.get_double("universe", "max_price", defaults.max_price);
    if min_price < 0.0 || max_price < min_price {
        return Err(invalid(
            "universe",
            "max_price",
            "price band must satisfy 0 <= min_price <= max_price",
        ));
    }

    let max_symbols = config.get_int("universe", "max_symbols", defaults.max_symbols as i64);
    let max_candidates = config.get_int(
        "universe",
        "max_candidates",
        defaults.max_candidates as i64,
    );
    let lookback_days = config.get_int("universe", "lookback_days", defaults.lookback_days);
    let cache_minutes = config.get_int("universe", "cache_minutes", defaults.cache_minutes);
    if max_symbols < 1 || max_candidates < 1 || lookback_days < 1 || cache_minutes < 1 {
        return Err(invalid(
            "universe",
            "max_symbols",
            "universe counts and windows must be at least 1",
        ));
    }

    Ok(UniverseConfig {
        enabled: config.get_bool("universe", "enabled", false),
        max_symbols: max_symbols as usize,
        max_candidates: max_candidates as usize,
        lookback_days,
        min_price,
        max_price,
        cache_minutes,
    })
}

fn positive_pct(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, BotError> {
    let value = config.get_double(section, key, default);
    if value <= 0.0 || value > 1.0 {
        return Err(invalid(section, key, "must be in (0, 1]"));
    }
    Ok(value)
}

fn invalid(section: &str, key: &str, reason: &str) -> BotError {
    BotError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
