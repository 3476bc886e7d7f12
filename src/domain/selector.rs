//! Walk-forward backtest scoring and best-strategy selection.

use crate::domain::bar::Bar;
use crate::domain::strategies::{Signal, SignalStrategy};

/// Bars replayed before scoring starts; also the minimum window content.
const WARMUP_BARS: usize = 30;

/// Sentinel score for a window with fewer than [`WARMUP_BARS`] bars.
pub const INSUFFICIENT_SCORE: f64 = -1.0;

/// Score a strategy by replaying its signal over the trailing `window` bars.
///
/// A single long position is simulated: enter at the close on `Buy` when
/// flat, realize `exit - entry` at the close on `Sell` when long. A position
/// still open at the end of the window is left open; only realized
/// round-trips count toward the score.
pub fn backtest_score(strategy: &dyn SignalStrategy, bars: &[Bar], window: usize) -> f64 {
    let start = bars.len().saturating_sub(window);
    let tail = &bars[start..];
    if tail.len() < WARMUP_BARS {
        return INSUFFICIENT_SCORE;
    }

    let mut pnl = 0.0;
    let mut entry: Option<f64> = None;

    for i in WARMUP_BARS..tail.len() {
        let prefix = &tail[..=i];
        let price = tail[i].close;
        match (entry, strategy.signal(prefix)) {
            (None, Signal::Buy) => entry = Some(price),
            (Some(entry_price), Signal::Sell) => {
                pnl += price - entry_price;
                entry = None;
            }
            _ => {}
        }
    }

    pnl
}

/// Score every enabled strategy and choose the best one.
///
/// Scores are returned as `(name, score)` pairs in enabled-list order;
/// selection scans that list with a strict-greater comparison so ties always
/// resolve to the earliest-listed strategy. Returns no selection when the
/// trailing window holds fewer than 30 bars (regardless of `min_score`) or
/// when the best score falls below `min_score`.
pub fn pick_strategy<'a>(
    bars: &[Bar],
    enabled: &'a [Box<dyn SignalStrategy>],
    window: usize,
    min_score: f64,
) -> (Option<&'a dyn SignalStrategy>, Vec<(String, f64)>) {
    let scores: Vec<(String, f64)> = enabled
        .iter()
        .map(|s| (s.name().to_string(), backtest_score(s.as_ref(), bars, window)))
        .collect();

    let tail_len = bars.len().min(window);
    if tail_len < WARMUP_BARS {
        return (None, scores);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, (_, score)) in scores.iter().enumerate() {
        match best {
            Some((_, best_score)) if *score <= best_score => {}
            _ => best = Some((i, *score)),
        }
    }

    match best {
        Some((i, score)) if score >= min_score => (Some(enabled[i].as_ref()), scores),
        _ => (None, scores),
    }
}
