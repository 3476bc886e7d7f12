//! Trade-log aggregates consumed by the reporting side.

use crate::domain::trade::TradeRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One day's realized results.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub trades: usize,
    pub total_pnl: f64,
    pub wins: usize,
    pub losses: usize,
    pub win_rate: f64,
}

/// Per-strategy aggregate across the full log.
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyStats {
    pub strategy: String,
    pub trades: usize,
    pub total_pnl: f64,
    pub avg_pnl: f64,
    pub win_rate: f64,
}

/// Summarize the records dated `date`. None when no trades match.
pub fn daily_summary(records: &[TradeRecord], date: NaiveDate) -> Option<DailySummary> {
    let day: Vec<&TradeRecord> = records.iter().filter(|r| r.date == date).collect();
    if day.is_empty() {
        return None;
    }

    let total_pnl: f64 = day.iter().map(|r| r.pnl).sum();
    let wins = day.iter().filter(|r| r.pnl > 0.0).count();
    let losses = day.iter().filter(|r| r.pnl < 0.0).count();

    Some(DailySummary {
        date,
        trades: day.len(),
        total_pnl,
        wins,
        losses,
        win_rate: wins as f64 / day.len() as f64,
    })
}

/// Aggregate the log per strategy, sorted descending by total pnl with the
/// strategy name as a deterministic secondary key.
pub fn strategy_stats(records: &[TradeRecord]) -> Vec<StrategyStats> {
    let mut grouped: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        grouped.entry(&record.strategy).or_default().push(record.pnl);
    }

    let mut stats: Vec<StrategyStats> = grouped
        .into_iter()
        .map(|(strategy, pnls)| {
            let trades = pnls.len();
            let total_pnl: f64 = pnls.iter().sum();
            let wins = pnls.iter().filter(|&&p| p > 0.0).count();
            StrategyStats {
                strategy: strategy.to_string(),
                trades,
                total_pnl,
                avg_pnl: total_pnl / trades as f64,
                win_rate: wins as f64 / trades as f64,
            }
        })
        .collect();

    stats.sort_by(|a, b| {
        b.total_pnl
            .partial_cmp(&a.total_pnl)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.strategy.cmp(&b.strategy))
    });
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: (i32, u32, u32), strategy: &str, pnl: f64) -> TradeRecord {
        TradeRecord {
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            symbol: "AAPL".into(),
            strategy: strategy.into(),
            side: "sell".into(),
            qty: 10,
            entry: 100.0,
            exit: 100.0 + pnl / 10.0,
            pnl,
        }
    }

    #[test]
    fn daily_summary_counts_wins_and_losses() {
        let records = vec![
            record((2024, 6, 3), "trend_ema", 50.0),
            record((2024, 6, 3), "breakout_orb", -20.0),
            record((2024, 6, 3), "trend_ema", 30.0),
            record((2024, 6, 4), "trend_ema", 999.0),
        ];
        let summary = daily_summary(&records, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
            .unwrap();
        assert_eq!(summary.trades, 3);
        assert!((summary.total_pnl - 60.0).abs() < 1e-9);
        assert_eq!(summary.wins, 2);
        assert_eq!(summary.losses, 1);
        assert!((summary.win_rate - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn daily_summary_none_when_no_trades_that_day() {
        let records = vec![record((2024, 6, 3), "trend_ema", 50.0)];
        assert!(daily_summary(&records, NaiveDate::from_ymd_opt(2024, 6, 4).unwrap()).is_none());
        assert!(daily_summary(&[], NaiveDate::from_ymd_opt(2024, 6, 3).unwrap()).is_none());
    }

    #[test]
    fn breakeven_trades_count_neither_way() {
        let records = vec![record((2024, 6, 3), "trend_ema", 0.0)];
        let summary = daily_summary(&records, NaiveDate::from_ymd_opt(2024, 6, 3).unwrap())
            .unwrap();
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.trades, 1);
    }

    #[test]
    fn strategy_stats_sorted_by_total_pnl_desc() {
        let records = vec![
            record((2024, 6, 3), "breakout_orb", 10.0),
            record((2024, 6, 3), "trend_ema", 50.0),
            record((2024, 6, 3), "trend_ema", -10.0),
            record((2024, 6, 4), "mean_reversion_rsi", 25.0),
        ];
        let stats = strategy_stats(&records);
        assert_eq!(stats.len(), 3);
        assert_eq!(stats[0].strategy, "trend_ema");
        assert!((stats[0].total_pnl - 40.0).abs() < 1e-9);
        assert!((stats[0].avg_pnl - 20.0).abs() < 1e-9);
        assert!((stats[0].win_rate - 0.5).abs() < 1e-9);
        assert_eq!(stats[1].strategy, "mean_reversion_rsi");
        assert_eq!(stats[2].strategy, "breakout_orb");
    }

    #[test]
    fn strategy_stats_ties_order_by_name() {
        let records = vec![
            record((2024, 6, 3), "zeta", 10.0),
            record((2024, 6, 3), "alpha", 10.0),
        ];
        let stats = strategy_stats(&records);
        assert_eq!(stats[0].strategy, "alpha");
        assert_eq!(stats[1].strategy, "zeta");
    }

    #[test]
    fn strategy_stats_empty_log() {
        assert!(strategy_stats(&[]).is_empty());
    }
}
