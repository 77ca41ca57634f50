//! Regime inputs for the hybrid switch: a volatility threshold plus the two
//! competing directional signals (trend-following, mean-reversion).

use crate::domain::indicators::IndicatorSet;
use crate::domain::rolling::rolling_median;
use crate::domain::signal::Signal;

/// Output of the regime stage, parallel to the indicator columns.
#[derive(Debug, Clone, PartialEq)]
pub struct RegimeSignals {
    /// Trailing median of volatility. Nested trailing computation, so its
    /// warm-up is roughly twice the long window.
    pub vol_threshold: Vec<Option<f64>>,
    /// 1 iff sma_short > sma_long, else 0.
    pub trend: Vec<Signal>,
    /// +1 oversold (z below -threshold), -1 overbought, else 0.
    pub reversion: Vec<Signal>,
}

impl RegimeSignals {
    pub fn compute(
        indicators: &IndicatorSet,
        long_window: usize,
        zscore_threshold: f64,
    ) -> Self {
        let vol_threshold = rolling_median(&indicators.volatility, long_window);

        let trend = indicators
            .sma_short
            .iter()
            .zip(&indicators.sma_long)
            .map(|pair| match pair {
                (Some(short), Some(long)) if short > long => Signal::Long,
                _ => Signal::Flat,
            })
            .collect();

        let reversion = indicators
            .zscore
            .iter()
            .map(|z| match z {
                Some(z) if *z < -zscore_threshold => Signal::Long,
                Some(z) if *z > zscore_threshold => Signal::Short,
                _ => Signal::Flat,
            })
            .collect();

        RegimeSignals {
            vol_threshold,
            trend,
            reversion,
        }
    }
}
