//! Trend-following EMA crossover strategy.

use crate::domain::bar::Bar;
use crate::domain::strategies::{Signal, SignalStrategy};

const FAST_SPAN: usize = 10;
const SLOW_SPAN: usize = 30;
const MIN_BARS: usize = 50;

/// Buy on an upward fast/slow EMA crossover, sell on the downward one.
pub struct TrendEma;

/// Exponential moving average over the series, span-parameterized with
/// normalized decaying weights (each value is the weighted mean of the full
/// history, weights (1 - alpha)^age).
fn ema_series(closes: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut num = 0.0;
    let mut den = 0.0;
    closes
        .iter()
        .map(|&close| {
            num = num * decay + close;
            den = den * decay + 1.0;
            num / den
        })
        .collect()
}

impl SignalStrategy for TrendEma {
    fn name(&self) -> &'static str {
        "trend_ema"
    }

    fn min_bars(&self) -> usize {
        MIN_BARS
    }

    fn signal(&self, bars: &[Bar]) -> Signal {
        if bars.len() < MIN_BARS {
            return Signal::Hold;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_series(&closes, FAST_SPAN);
        let slow = ema_series(&closes, SLOW_SPAN);

        let last = closes.len() - 1;
        let (prev_fast, prev_slow) = (fast[last - 1], slow[last - 1]);
        let (cur_fast, cur_slow) = (fast[last], slow[last]);

        if prev_fast <= prev_slow && cur_fast > cur_slow {
            Signal::Buy
        } else if prev_fast >= prev_slow && cur_fast < cur_slow {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
