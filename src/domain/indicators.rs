//! Derived indicator columns computed from raw closes.
//!
//! Every column is a pure function of a trailing window ending at the current
//! bar; positions where a window is not yet full are None. With the default
//! 7/30 windows the first defined indices are: returns 1, sma_short 6,
//! sma_long 29, momentum 30, volatility 30, zscore 29.

use crate::domain::bar::CloseBar;
use crate::domain::rolling::{rolling_mean, rolling_std};

/// Output of the indicator stage: parallel columns, one entry per input bar.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSet {
    pub returns: Vec<Option<f64>>,
    pub sma_short: Vec<Option<f64>>,
    pub sma_long: Vec<Option<f64>>,
    pub momentum: Vec<Option<f64>>,
    pub volatility: Vec<Option<f64>>,
    pub zscore: Vec<Option<f64>>,
}

impl IndicatorSet {
    pub fn compute(bars: &[CloseBar], short_window: usize, long_window: usize) -> Self {
        let closes: Vec<Option<f64>> = bars.iter().map(|b| Some(b.close)).collect();

        let mut returns = vec![None; bars.len()];
        for i in 1..bars.len() {
            returns[i] = Some((bars[i].close - bars[i - 1].close) / bars[i - 1].close);
        }

        let sma_short = rolling_mean(&closes, short_window);
        let sma_long = rolling_mean(&closes, long_window);

        // close minus close `long_window` bars prior
        let mut momentum = vec![None; bars.len()];
        for i in long_window..bars.len() {
            momentum[i] = Some(bars[i].close - bars[i - long_window].close);
        }

        // sample std of returns; first defined one bar after the window
        // could fill, because returns themselves start at index 1
        let volatility = rolling_std(&returns, long_window);

        let close_mean = rolling_mean(&closes, long_window);
        let close_std = rolling_std(&closes, long_window);
        let zscore = bars
            .iter()
            .enumerate()
            .map(|(i, bar)| match (close_mean[i], close_std[i]) {
                (Some(mean), Some(std)) if std > 0.0 => Some((bar.close - mean) / std),
                _ => None,
            })
            .collect();

        IndicatorSet {
            returns,
            sma_short,
            sma_long,
            momentum,
            volatility,
            zscore,
        }
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}
