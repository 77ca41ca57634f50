//! Hybrid regime switch: picks one direction per bar from the trend and
//! reversion signals using volatility/momentum state.
//!
//! The four rules are evaluated in order and the first match wins; if none
//! match the bar is flat. The rule regions overlap: with non-positive momentum
//! rule 4 is also covered by rule 1 (below the threshold) or rule 3 (at it),
//! and the earlier rule wins. That priority is inherited behavior, kept
//! exactly and pinned by test rather than cleaned up.

use crate::domain::indicators::IndicatorSet;
use crate::domain::regime::RegimeSignals;
use crate::domain::signal::Signal;

/// Rule table, first match wins (comparisons against an undefined operand
/// are false, so warm-up bars fall through to the flat default):
///
/// 1. volatility <  threshold                  -> trend
/// 2. volatility >= threshold, momentum > 0    -> trend
/// 3. volatility >= threshold, momentum <= 0   -> reversion
/// 4. volatility <= threshold, momentum <= 0   -> short
pub fn select_signal(
    volatility: Option<f64>,
    vol_threshold: Option<f64>,
    momentum: Option<f64>,
    trend: Signal,
    reversion: Signal,
) -> Signal {
    let (v, t) = match (volatility, vol_threshold) {
        (Some(v), Some(t)) => (v, t),
        _ => return Signal::Flat,
    };
    let momentum_positive = momentum.is_some_and(|m| m > 0.0);
    let momentum_nonpositive = momentum.is_some_and(|m| m <= 0.0);

    if v < t {
        trend
    } else if v >= t && momentum_positive {
        trend
    } else if v >= t && momentum_nonpositive {
        reversion
    } else if v <= t && momentum_nonpositive {
        Signal::Short
    } else {
        Signal::Flat
    }
}

/// Applies [`select_signal`] across the series.
pub fn select_signals(indicators: &IndicatorSet, regime: &RegimeSignals) -> Vec<Signal> {
    (0..indicators.len())
        .map(|i| {
            select_signal(
                indicators.volatility[i],
                regime.vol_threshold[i],
                indicators.momentum[i],
                regime.trend[i],
                regime.reversion[i],
            )
        })
        .collect()
}
