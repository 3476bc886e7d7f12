#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use chrono_tz::Tz;
use rotortrader::adapters::file_config_adapter::FileConfigAdapter;
use rotortrader::domain::account::{AccountSnapshot, HeldPosition, OrderSide};
use rotortrader::domain::bar::Bar;
use rotortrader::domain::bot::BotStatus;
use rotortrader::domain::config::BotConfig;
use rotortrader::domain::error::BotError;
use rotortrader::domain::trade::TradeRecord;
use rotortrader::ports::broker_port::BrokerPort;
use rotortrader::ports::data_port::{Instrument, MarketDataPort};
use rotortrader::ports::status_port::StatusPort;
use rotortrader::ports::trade_log_port::{LogWrite, TradeLogPort};
use std::cell::RefCell;
use std::collections::HashMap;

pub struct MockBroker {
    pub equity: RefCell<f64>,
    pub held: Vec<HeldPosition>,
    pub orders: RefCell<Vec<(String, i64, OrderSide)>>,
    pub closed: RefCell<Vec<String>>,
}

impl MockBroker {
    pub fn new(equity: f64) -> Self {
        Self {
            equity: RefCell::new(equity),
            held: Vec::new(),
            orders: RefCell::new(Vec::new()),
            closed: RefCell::new(Vec::new()),
        }
    }

    pub fn with_position(mut self, symbol: &str, quantity: i64, avg_entry_price: f64) -> Self {
        self.held.push(HeldPosition {
            symbol: symbol.to_string(),
            quantity,
            avg_entry_price,
        });
        self
    }

    pub fn set_equity(&self, equity: f64) {
        *self.equity.borrow_mut() = equity;
    }
}

impl BrokerPort for MockBroker {
    fn account(&self) -> Result<AccountSnapshot, BotError> {
        Ok(AccountSnapshot {
            equity: *self.equity.borrow(),
        })
    }

    fn positions(&self) -> Result<Vec<HeldPosition>, BotError> {
        Ok(self.held.clone())
    }

    fn submit_market_order(
        &self,
        symbol: &str,
        qty: i64,
        side: OrderSide,
    ) -> Result<String, BotError> {
        self.orders
            .borrow_mut()
            .push((symbol.to_string(), qty, side));
        Ok(format!("order-{}", self.orders.borrow().len()))
    }

    fn close_position(&self, symbol: &str) -> Result<(), BotError> {
        self.closed.borrow_mut().push(symbol.to_string());
        Ok(())
    }
}

pub struct MockData {
    pub bars: HashMap<String, Vec<Bar>>,
    pub errors: HashMap<String, String>,
}

impl MockData {
    pub fn new() -> Self {
        Self {
            bars: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<Bar>) -> Self {
        self.bars.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl MarketDataPort for MockData {
    fn get_bars(
        &self,
        symbol: &str,
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, BotError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(BotError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.bars.get(symbol).cloned().unwrap_or_default())
    }

    fn get_daily_bars(
        &self,
        symbols: &[String],
        _start: DateTime<Utc>,
        _end: DateTime<Utc>,
    ) -> Result<HashMap<String, Vec<Bar>>, BotError> {
        let mut out = HashMap::new();
        for symbol in symbols {
            if let Some(bars) = self.bars.get(symbol) {
                out.insert(symbol.clone(), bars.clone());
            }
        }
        Ok(out)
    }

    fn list_tradable_instruments(&self) -> Result<Vec<Instrument>, BotError> {
        Ok(self
            .bars
            .keys()
            .map(|symbol| Instrument {
                symbol: symbol.clone(),
                tradable: true,
            })
            .collect())
    }
}

#[derive(Default)]
pub struct MockStatus {
    pub published: RefCell<Vec<BotStatus>>,
}

impl MockStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<BotStatus> {
        self.published.borrow().last().cloned()
    }
}

impl StatusPort for MockStatus {
    fn publish(&self, status: &BotStatus) -> Result<(), BotError> {
        self.published.borrow_mut().push(status.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockTradeLog {
    pub records: RefCell<Vec<TradeRecord>>,
}

impl MockTradeLog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TradeLogPort for MockTradeLog {
    fn append(&self, record: &TradeRecord) -> Result<LogWrite, BotError> {
        let mut records = self.records.borrow_mut();
        records.push(record.clone());
        Ok(if records.len() == 1 {
            LogWrite::Created
        } else {
            LogWrite::Appended
        })
    }

    fn read_all(&self) -> Result<Vec<TradeRecord>, BotError> {
        Ok(self.records.borrow().clone())
    }
}

/// Minute bars from a close series, timestamped one minute apart.
pub fn minute_bars(closes: &[f64]) -> Vec<Bar> {
    let start = Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Bar {
            timestamp: start + Duration::minutes(i as i64),
            open: close,
            high: close + 0.5,
            low: close - 0.5,
            close,
            volume: 10_000.0,
        })
        .collect()
}

/// A decline followed by a spike; the fast EMA crosses above the slow EMA
/// on the final bar, so trend_ema signals Buy there.
pub fn buy_signal_series() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..59).map(|i| 150.0 - i as f64).collect();
    closes.push(300.0);
    closes
}

/// A flat tape; trend_ema stays selected (score 0.0) but signals Hold.
pub fn hold_signal_series() -> Vec<f64> {
    vec![100.0; 60]
}

/// A rally followed by a collapse; trend_ema signals Sell on the final bar.
pub fn sell_signal_series() -> Vec<f64> {
    let mut closes: Vec<f64> = (0..59).map(|i| 100.0 + i as f64).collect();
    closes.push(10.0);
    closes
}

/// A weekday during regular hours, exchange-local.
pub fn open_market_time() -> DateTime<Tz> {
    chrono_tz::America::New_York
        .with_ymd_and_hms(2024, 6, 10, 10, 0, 0)
        .unwrap()
}

pub fn test_config(symbols: &str) -> BotConfig {
    let content = format!(
        "\
[trading]
symbols = {symbols}
interval_minutes = 5
lookback_days = 2
max_positions = 5

[risk]
max_daily_loss_pct = 0.03
per_trade_risk_pct = 0.01
stop_loss_pct = 0.02

[selector]
score_window_bars = 60
min_score = -10.0

[strategies]
enabled = trend_ema
"
    );
    let adapter = FileConfigAdapter::from_string(&content).unwrap();
    BotConfig::from_config(&adapter).unwrap()
}
