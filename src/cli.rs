//! CLI definition and dispatch.

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::alpaca_broker::AlpacaBroker;
use crate::adapters::alpaca_data::AlpacaData;
use crate::adapters::csv_trade_log::CsvTradeLog;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_status::JsonStatusFile;
use crate::adapters::json_universe_cache::JsonUniverseCache;
use crate::domain::bot::TradeBot;
use crate::domain::config::BotConfig;
use crate::domain::stats::{daily_summary, strategy_stats};
use crate::domain::strategies::resolve_enabled;
use crate::domain::universe::load_universe;
use crate::ports::trade_log_port::TradeLogPort;

#[derive(Parser, Debug)]
#[command(name = "rotortrader", about = "Strategy-rotation live trading bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the live trading loop
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the daily summary and per-strategy table from the trade log
    Report {
        #[arg(short, long)]
        config: PathBuf,
        /// Day to summarize (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// Build and print the dynamic universe
    Universe {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run { config } => run_loop(&config),
        Command::Report { config, date } => run_report(&config, date.as_deref()),
        Command::Universe { config } => run_universe(&config),
        Command::Validate { config } => run_validate(&config),
    }
}

fn load_bot_config(path: &PathBuf) -> Result<BotConfig, ExitCode> {
    let adapter = FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })?;
    BotConfig::from_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_loop(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let strategies = match resolve_enabled(&config.enabled_strategies) {
        Ok(s) => s,
        Err(reason) => {
            eprintln!("error: {reason}");
            return ExitCode::from(2);
        }
    };
    eprintln!(
        "Enabled strategies: {}",
        config.enabled_strategies.join(", ")
    );

    let broker = match AlpacaBroker::from_env() {
        Ok(b) => b,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    let data = match AlpacaData::from_env() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    let trade_log = CsvTradeLog::new(config.files.trade_log.clone());
    let status = JsonStatusFile::new(config.files.status.clone());
    let cache = JsonUniverseCache::new(config.files.universe_cache.clone());

    let symbols = load_universe(
        &config.universe,
        &config.symbols,
        &data,
        &cache,
        Utc::now(),
    );
    eprintln!("Trading universe: {}", symbols.join(", "));

    let bot = TradeBot::new(
        &config,
        symbols,
        strategies,
        &broker,
        &data,
        &trade_log,
        &status,
    );

    let mut state = match bot.init_state() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    match bot.run(&mut state) {
        Ok(()) => {
            eprintln!("Trading loop stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_report(config_path: &PathBuf, date: Option<&str>) -> ExitCode {
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let date = match date {
        Some(raw) => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            Ok(d) => d,
            Err(_) => {
                eprintln!("error: invalid date {raw:?} (expected YYYY-MM-DD)");
                return ExitCode::from(2);
            }
        },
        None => Utc::now().with_timezone(&config.timezone).date_naive(),
    };

    let log = CsvTradeLog::new(config.files.trade_log.clone());
    let records = match log.read_all() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };

    match daily_summary(&records, date) {
        Some(summary) => {
            println!("Daily summary ({date})");
            println!(
                "  trades: {} | total pnl: {:.2} | wins: {} | losses: {} | win rate: {:.0}%",
                summary.trades,
                summary.total_pnl,
                summary.wins,
                summary.losses,
                summary.win_rate * 100.0
            );
        }
        None => println!("No trades logged for {date}"),
    }

    let stats = strategy_stats(&records);
    if stats.is_empty() {
        println!("No strategy stats yet");
        return ExitCode::SUCCESS;
    }

    println!("\nStrategy performance");
    println!(
        "  {:<20} {:>7} {:>12} {:>10} {:>9}",
        "strategy", "trades", "total pnl", "avg pnl", "win rate"
    );
    for row in &stats {
        println!(
            "  {:<20} {:>7} {:>12.2} {:>10.2} {:>8.0}%",
            row.strategy,
            row.trades,
            row.total_pnl,
            row.avg_pnl,
            row.win_rate * 100.0
        );
    }
    ExitCode::SUCCESS
}

fn run_universe(config_path: &PathBuf) -> ExitCode {
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let data = match AlpacaData::from_env() {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    let cache = JsonUniverseCache::new(config.files.universe_cache.clone());

    let symbols = load_universe(
        &config.universe,
        &config.symbols,
        &data,
        &cache,
        Utc::now(),
    );
    for symbol in &symbols {
        println!("{symbol}");
    }
    eprintln!("{} symbols", symbols.len());
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_bot_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(reason) = resolve_enabled(&config.enabled_strategies) {
        eprintln!("error: {reason}");
        return ExitCode::from(2);
    }

    eprintln!("  symbols: {}", config.symbols.join(", "));
    eprintln!("  strategies: {}", config.enabled_strategies.join(", "));
    eprintln!(
        "  universe: {}",
        if config.universe.enabled {
            "dynamic"
        } else {
            "static"
        }
    );
    eprintln!("Config validated successfully");
    ExitCode::SUCCESS
}
