//! Pluggable signal strategies.
//!
//! Each strategy is a pure function of an ordered bar series to a [`Signal`].
//! Strategies must only look at the bars they are given (no lookahead) and
//! return [`Signal::Hold`] when the series is shorter than their minimum.

use crate::domain::bar::Bar;

pub mod breakout_orb;
pub mod mean_reversion_rsi;
pub mod trend_ema;

pub use breakout_orb::BreakoutOrb;
pub use mean_reversion_rsi::MeanReversionRsi;
pub use trend_ema::TrendEma;

/// Directional recommendation for the next action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// A signal-generating strategy. Implementations are deterministic and
/// side-effect free.
pub trait SignalStrategy {
    fn name(&self) -> &'static str;

    /// Minimum series length below which [`signal`](Self::signal) is `Hold`.
    fn min_bars(&self) -> usize;

    fn signal(&self, bars: &[Bar]) -> Signal;
}

/// Static registry resolving a strategy identifier to an implementation.
pub fn strategy_by_name(name: &str) -> Option<Box<dyn SignalStrategy>> {
    match name {
        "trend_ema" => Some(Box::new(TrendEma)),
        "mean_reversion_rsi" => Some(Box::new(MeanReversionRsi)),
        "breakout_orb" => Some(Box::new(BreakoutOrb)),
        _ => None,
    }
}

/// Resolve the enabled strategy names from configuration, preserving list
/// order (selection ties are broken by this order). Unknown names error.
pub fn resolve_enabled(names: &[String]) -> Result<Vec<Box<dyn SignalStrategy>>, String> {
    let mut strategies = Vec::with_capacity(names.len());
    for name in names {
        match strategy_by_name(name) {
            Some(s) => strategies.push(s),
            None => return Err(format!("unknown strategy: {name}")),
        }
    }
    Ok(strategies)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_resolves_all_reference_strategies() {
        for name in ["trend_ema", "mean_reversion_rsi", "breakout_orb"] {
            let strategy = strategy_by_name(name).unwrap();
            assert_eq!(strategy.name(), name);
        }
    }

    #[test]
    fn registry_rejects_unknown_name() {
        assert!(strategy_by_name("momentum_xyz").is_none());
    }

    #[test]
    fn resolve_enabled_preserves_order() {
        let names = vec!["breakout_orb".to_string(), "trend_ema".to_string()];
        let strategies = resolve_enabled(&names).unwrap();
        assert_eq!(strategies[0].name(), "breakout_orb");
        assert_eq!(strategies[1].name(), "trend_ema");
    }

    #[test]
    fn resolve_enabled_errors_on_unknown() {
        let names = vec!["trend_ema".to_string(), "bogus".to_string()];
        assert!(resolve_enabled(&names).is_err());
    }

    #[test]
    fn empty_series_is_hold_for_all() {
        for name in ["trend_ema", "mean_reversion_rsi", "breakout_orb"] {
            let strategy = strategy_by_name(name).unwrap();
            assert_eq!(strategy.signal(&[]), Signal::Hold);
        }
    }
}
