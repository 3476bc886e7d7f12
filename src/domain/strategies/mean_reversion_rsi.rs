//! Mean-reversion RSI oscillator strategy.

use crate::domain::bar::Bar;
use crate::domain::strategies::{Signal, SignalStrategy};

const RSI_PERIOD: usize = 14;
const MIN_BARS: usize = 20;
const OVERSOLD: f64 = 30.0;
const OVERBOUGHT: f64 = 70.0;

/// Buy when the 14-period RSI is oversold, sell when overbought.
pub struct MeanReversionRsi;

/// RSI over the trailing `period` close-to-close moves, using simple moving
/// averages of up and down moves. All-flat input yields NaN, which the
/// caller's threshold comparisons treat as no signal.
fn latest_rsi(closes: &[f64], period: usize) -> f64 {
    let start = closes.len() - period - 1;
    let mut up_sum = 0.0;
    let mut down_sum = 0.0;
    for window in closes[start..].windows(2) {
        let delta = window[1] - window[0];
        if delta > 0.0 {
            up_sum += delta;
        } else {
            down_sum += -delta;
        }
    }
    let ma_up = up_sum / period as f64;
    let ma_down = down_sum / period as f64;
    let rs = ma_up / ma_down;
    100.0 - (100.0 / (1.0 + rs))
}

impl SignalStrategy for MeanReversionRsi {
    fn name(&self) -> &'static str {
        "mean_reversion_rsi"
    }

    fn min_bars(&self) -> usize {
        MIN_BARS
    }

    fn signal(&self, bars: &[Bar]) -> Signal {
        if bars.len() < MIN_BARS {
            return Signal::Hold;
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let rsi = latest_rsi(&closes, RSI_PERIOD);

        if rsi < OVERSOLD {
            Signal::Buy
        } else if rsi > OVERBOUGHT {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use chrono::{TimeZone, Utc};

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: Utc
                    .with_ymd_and_hms(2024, 6, 3, 14, 0, 0)
                    .unwrap()
                    + chrono::Duration::minutes(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1_000.0,
            })
            .collect()
    }

    #[test]
    fn below_minimum_is_hold() {
        let closes: Vec<f64> = (0..19).map(|i| 100.0 + i as f64).collect();
        assert_eq!(
            MeanReversionRsi.signal(&bars_from_closes(&closes)),
            Signal::Hold
        );
    }

    #[test]
    fn straight_decline_is_buy() {
        // Every move down: RSI 0, deep oversold.
        let closes: Vec<f64> = (0..25).map(|i| 100.0 - i as f64).collect();
        assert_eq!(
            MeanReversionRsi.signal(&bars_from_closes(&closes)),
            Signal::Buy
        );
    }

    #[test]
    fn straight_rally_is_sell() {
        // Every move up: RSI 100, deep overbought.
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        assert_eq!(
            MeanReversionRsi.signal(&bars_from_closes(&closes)),
            Signal::Sell
        );
    }

    #[test]
    fn flat_series_is_hold() {
        // Zero up and down moves give a NaN RSI; neither threshold fires.
        let closes = vec![100.0; 25];
        assert_eq!(
            MeanReversionRsi.signal(&bars_from_closes(&closes)),
            Signal::Hold
        );
    }

    #[test]
    fn balanced_moves_are_hold() {
        // Alternating equal up/down moves: RSI near 50.
        let closes: Vec<f64> = (0..25)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        assert_eq!(
            MeanReversionRsi.signal(&bars_from_closes(&closes)),
            Signal::Hold
        );
    }

    #[test]
    fn rsi_all_up_is_100() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 + i as f64).collect();
        assert_relative_eq!(latest_rsi(&closes, RSI_PERIOD), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn rsi_all_down_is_0() {
        let closes: Vec<f64> = (0..20).map(|i| 100.0 - i as f64).collect();
        assert_abs_diff_eq!(latest_rsi(&closes, RSI_PERIOD), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn rsi_balanced_moves_is_50() {
        let closes: Vec<f64> = (0..20)
            .map(|i| if i % 2 == 0 { 100.0 } else { 101.0 })
            .collect();
        assert_relative_eq!(latest_rsi(&closes, RSI_PERIOD), 50.0, epsilon = 1e-9);
    }
}
