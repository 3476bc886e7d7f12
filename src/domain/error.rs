//! Domain error types.

/// Top-level error type for rotortrader.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("missing ALPACA_API_KEY/ALPACA_API_SECRET")]
    MissingCredentials,

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("broker error: {reason}")]
    Broker { reason: String },

    #[error("market data error: {reason}")]
    Data { reason: String },

    #[error("no bar data for {symbol}")]
    NoData { symbol: String },

    #[error("universe build failed: {reason}")]
    Universe { reason: String },

    #[error("trade log error: {reason}")]
    TradeLog { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&BotError> for std::process::ExitCode {
    fn from(err: &BotError) -> Self {
        let code: u8 = match err {
            BotError::Io(_) => 1,
            BotError::ConfigParse { .. }
            | BotError::ConfigMissing { .. }
            | BotError::ConfigInvalid { .. } => 2,
            BotError::MissingCredentials => 3,
            BotError::Broker { .. } => 4,
            BotError::Data { .. } | BotError::NoData { .. } => 5,
            BotError::Universe { .. } => 6,
            BotError::TradeLog { .. } => 7,
        };
        std::process::ExitCode::from(code)
    }
}
