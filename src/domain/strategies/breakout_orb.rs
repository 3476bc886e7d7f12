//! Opening-range breakout strategy.

use crate::domain::bar::Bar;
use crate::domain::strategies::{Signal, SignalStrategy};

const OPENING_RANGE_BARS: usize = 15;
const MIN_BARS: usize = 30;

/// Buy when the latest close breaks above the opening range, sell when it
/// breaks below. The opening range is the high/low band of the first 15 bars
/// of the series.
pub struct BreakoutOrb;

impl SignalStrategy for BreakoutOrb {
    fn name(&self) -> &'static str {
        "breakout_orb"
    }

    fn min_bars(&self) -> usize {
        MIN_BARS
    }

    fn signal(&self, bars: &[Bar]) -> Signal {
        if bars.len() < MIN_BARS {
            return Signal::Hold;
        }

        let opening = &bars[..OPENING_RANGE_BARS];
        let range_high = opening.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let range_low = opening.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        let latest = bars[bars.len() - 1].close;
        if latest > range_high {
            Signal::Buy
        } else if latest < range_low {
            Signal::Sell
        } else {
            Signal::Hold
        }
    }
}
