//! Shared Alpaca API environment: credentials, endpoints, data feed.

use crate::domain::error::BotError;

pub const PAPER_TRADING_BASE: &str = "https://paper-api.alpaca.markets";
pub const LIVE_TRADING_BASE: &str = "https://api.alpaca.markets";
pub const DATA_BASE: &str = "https://data.alpaca.markets";

#[derive(Debug, Clone)]
pub struct AlpacaEnv {
    pub key: String,
    pub secret: String,
    pub paper: bool,
    pub feed: String,
}

impl AlpacaEnv {
    /// Read credentials and options from the environment. Missing or empty
    /// credentials are fatal; the bot must not start without them.
    pub fn from_env() -> Result<Self, BotError> {
        Self::from_parts(
            std::env::var("ALPACA_API_KEY").ok(),
            std::env::var("ALPACA_API_SECRET").ok(),
            std::env::var("ALPACA_PAPER").ok(),
            std::env::var("ALPACA_DATA_FEED").ok(),
        )
    }

    fn from_parts(
        key: Option<String>,
        secret: Option<String>,
        paper: Option<String>,
        feed: Option<String>,
    ) -> Result<Self, BotError> {
        let key = key.filter(|s| !s.is_empty());
        let secret = secret.filter(|s| !s.is_empty());
        let (Some(key), Some(secret)) = (key, secret) else {
            return Err(BotError::MissingCredentials);
        };

        let paper = paper
            .map(|v| v.to_lowercase() != "false")
            .unwrap_or(true);
        let feed = match feed.map(|v| v.to_lowercase()) {
            Some(v) if v == "sip" => "sip".to_string(),
            _ => "iex".to_string(),
        };

        Ok(AlpacaEnv {
            key,
            secret,
            paper,
            feed,
        })
    }

    pub fn trading_base(&self) -> &'static str {
        if self.paper {
            PAPER_TRADING_BASE
        } else {
            LIVE_TRADING_BASE
        }
    }
}
