//! The live trading loop and its run state.
//!
//! One logical actor drives everything: per tick it gates on market hours,
//! re-checks the daily-loss breaker, then walks the universe in fixed order
//! running selector -> live signal -> risk sizing -> broker dispatch. All
//! external calls are synchronous; suspension happens only at the sleeps
//! between ticks.

use crate::domain::account::{HeldPosition, OrderSide};
use crate::domain::bar::last_close;
use crate::domain::config::BotConfig;
use crate::domain::error::BotError;
use crate::domain::market_hours::{after_close, market_open};
use crate::domain::risk::{exceeded_daily_loss, position_size};
use crate::domain::selector::pick_strategy;
use crate::domain::stats::daily_summary;
use crate::domain::strategies::{Signal, SignalStrategy};
use crate::domain::trade::TradeRecord;
use crate::ports::broker_port::BrokerPort;
use crate::ports::data_port::MarketDataPort;
use crate::ports::status_port::StatusPort;
use crate::ports::trade_log_port::TradeLogPort;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::HashMap;

/// Run state published with every status snapshot. `Halted` is terminal for
/// the process run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BotState {
    Idle,
    Running,
    Halted,
}

/// Snapshot overwritten wholesale on each publish; not a log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BotStatus {
    pub state: BotState,
    pub last_action: String,
}

/// Mutable loop state threaded through each tick. `start_equity` is captured
/// once at startup and never changes for the rest of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopState {
    pub start_equity: f64,
    pub last_summary_date: Option<NaiveDate>,
}

/// What a tick decided, so the caller knows how long to sleep and when to
/// stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Market closed; retry after the idle wait.
    Idle,
    /// Normal cycle completed; sleep the configured interval.
    Completed,
    /// Daily-loss breaker tripped; terminate the loop.
    Halted,
}

pub struct TradeBot<'a> {
    config: &'a BotConfig,
    symbols: Vec<String>,
    strategies: Vec<Box<dyn SignalStrategy>>,
    broker: &'a dyn BrokerPort,
    data: &'a dyn MarketDataPort,
    trade_log: &'a dyn TradeLogPort,
    status: &'a dyn StatusPort,
}

impl<'a> TradeBot<'a> {
    pub fn new(
        config: &'a BotConfig,
        symbols: Vec<String>,
        strategies: Vec<Box<dyn SignalStrategy>>,
        broker: &'a dyn BrokerPort,
        data: &'a dyn MarketDataPort,
        trade_log: &'a dyn TradeLogPort,
        status: &'a dyn StatusPort,
    ) -> Self {
        TradeBot {
            config,
            symbols,
            strategies,
            broker,
            data,
            trade_log,
            status,
        }
    }

    /// Capture the session baseline. Called once before the first tick.
    pub fn init_state(&self) -> Result<LoopState, BotError> {
        let account = self.broker.account()?;
        eprintln!("session start equity: {:.2}", account.equity);
        Ok(LoopState {
            start_equity: account.equity,
            last_summary_date: None,
        })
    }

    /// Run one decision cycle at exchange-local time `now`.
    pub fn tick(&self, now: DateTime<Tz>, state: &mut LoopState) -> Result<TickOutcome, BotError> {
        if !market_open(&now) {
            self.publish(BotState::Idle, "market closed".to_string())?;
            let today = now.date_naive();
            if after_close(&now) && state.last_summary_date != Some(today) {
                self.report_daily_summary(today);
                state.last_summary_date = Some(today);
            }
            return Ok(TickOutcome::Idle);
        }

        let equity = self.broker.account()?.equity;
        if exceeded_daily_loss(state.start_equity, equity, self.config.risk.max_daily_loss_pct) {
            let note = format!(
                "daily loss limit hit (start {:.2}, now {:.2}); halting",
                state.start_equity, equity
            );
            eprintln!("{note}");
            self.publish(BotState::Halted, note)?;
            return Ok(TickOutcome::Halted);
        }

        let held: HashMap<String, HeldPosition> = self
            .broker
            .positions()?
            .into_iter()
            .map(|p| (p.symbol.clone(), p))
            .collect();
        let mut open_count = held.len();

        let mut published = false;
        for symbol in &self.symbols {
            // One bad symbol must not poison the rest of the cycle.
            match self.process_symbol(symbol, now, equity, &held, &mut open_count) {
                Ok(true) => published = true,
                Ok(false) => {}
                Err(e) => eprintln!("warning: skipping {symbol} this cycle ({e})"),
            }
        }

        // The snapshot is overwritten every cycle, even when nothing traded,
        // so readers never see an hours-old action as current.
        if !published {
            self.publish(BotState::Running, "no action this cycle".to_string())?;
        }

        Ok(TickOutcome::Completed)
    }

    /// Run until the breaker trips, sleeping between ticks.
    pub fn run(&self, state: &mut LoopState) -> Result<(), BotError> {
        loop {
            let now = Utc::now().with_timezone(&self.config.timezone);
            match self.tick(now, state)? {
                TickOutcome::Halted => return Ok(()),
                TickOutcome::Idle => {
                    std::thread::sleep(std::time::Duration::from_secs(60));
                }
                TickOutcome::Completed => {
                    let secs = self.config.interval_minutes as u64 * 60;
                    std::thread::sleep(std::time::Duration::from_secs(secs));
                }
            }
        }
    }

    /// Decide and act for one symbol. Returns whether a status snapshot was
    /// published, so the caller can refresh it when the whole cycle is quiet.
    fn process_symbol(
        &self,
        symbol: &str,
        now: DateTime<Tz>,
        equity: f64,
        held: &HashMap<String, HeldPosition>,
        open_count: &mut usize,
    ) -> Result<bool, BotError> {
        let end = now.with_timezone(&Utc);
        let start = end - Duration::days(self.config.lookback_days);
        let bars = self.data.get_bars(symbol, start, end)?;
        if bars.is_empty() {
            return Err(BotError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let (chosen, scores) = pick_strategy(
            &bars,
            &self.strategies,
            self.config.selector.score_window_bars,
            self.config.selector.min_score,
        );
        let Some(strategy) = chosen else {
            let rendered: Vec<String> = scores
                .iter()
                .map(|(name, score)| format!("{name}={score:.2}"))
                .collect();
            self.publish(
                BotState::Running,
                format!(
                    "no strategy selected for {symbol} ({})",
                    rendered.join(", ")
                ),
            )?;
            return Ok(true);
        };

        let signal = strategy.signal(&bars);
        let Some(last_price) = last_close(&bars) else {
            return Ok(false);
        };

        let mut published = false;
        match signal {
            Signal::Buy
                if !held.contains_key(symbol) && *open_count < self.config.max_positions =>
            {
                let qty = position_size(
                    equity,
                    last_price,
                    self.config.risk.per_trade_risk_pct,
                    self.config.risk.stop_loss_pct,
                );
                if qty > 0 {
                    self.broker
                        .submit_market_order(symbol, qty, OrderSide::Buy)?;
                    *open_count += 1;
                    let note = format!("BUY {symbol} x{qty} via {}", strategy.name());
                    eprintln!("{note}");
                    self.publish(BotState::Running, note)?;
                    published = true;
                }
            }
            Signal::Sell if held.contains_key(symbol) => {
                let position = &held[symbol];
                // Close whatever the broker reports we hold, in full.
                self.broker.close_position(symbol)?;
                *open_count = open_count.saturating_sub(1);

                let pnl = (last_price - position.avg_entry_price) * position.quantity as f64;
                let record = TradeRecord {
                    date: now.date_naive(),
                    symbol: symbol.to_string(),
                    strategy: strategy.name().to_string(),
                    side: "sell".to_string(),
                    qty: position.quantity,
                    entry: position.avg_entry_price,
                    exit: last_price,
                    pnl,
                };
                self.trade_log.append(&record)?;

                let note = format!(
                    "SELL {symbol} x{} via {} pnl {:+.2}",
                    position.quantity,
                    strategy.name(),
                    pnl
                );
                eprintln!("{note}");
                self.publish(BotState::Running, note)?;
                published = true;
            }
            _ => {}
        }

        Ok(published)
    }

    /// Print the day's summary once after the close. Log-read failures only
    /// warn; the once-per-day guard is the caller's.
    fn report_daily_summary(&self, date: NaiveDate) {
        let records = match self.trade_log.read_all() {
            Ok(records) => records,
            Err(e) => {
                eprintln!("warning: could not read trade log for summary ({e})");
                return;
            }
        };
        match daily_summary(&records, date) {
            Some(summary) => {
                eprintln!(
                    "[{date}] trades: {} | total pnl: {:.2} | wins: {} | losses: {} | win rate: {:.0}%",
                    summary.trades,
                    summary.total_pnl,
                    summary.wins,
                    summary.losses,
                    summary.win_rate * 100.0
                );
            }
            None => eprintln!("[{date}] no trades logged today"),
        }
    }

    fn publish(&self, state: BotState, last_action: String) -> Result<(), BotError> {
        self.status.publish(&BotStatus { state, last_action })
    }
}
