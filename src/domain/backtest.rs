//! Pipeline orchestration: raw closes through indicators, regime signals,
//! the hybrid switch, the kill switch, sizing and simulation, to metrics.
//!
//! Each stage is a pure function of earlier stages' output; re-running on the
//! same input reproduces every column bit for bit.

use chrono::NaiveDate;

use crate::domain::bar::CloseBar;
use crate::domain::indicators::IndicatorSet;
use crate::domain::kill_switch::{self, KillSwitchOutcome};
use crate::domain::metrics::Metrics;
use crate::domain::regime::RegimeSignals;
use crate::domain::signal::Signal;
use crate::domain::simulator::{self, SimulationResult};
use crate::domain::sizing;
use crate::domain::switch;

/// Signal-generation parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StrategyParams {
    pub short_window: usize,
    pub long_window: usize,
    pub zscore_threshold: f64,
    pub kill_threshold: f64,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            short_window: 7,
            long_window: 30,
            zscore_threshold: 2.0,
            kill_threshold: -0.15,
        }
    }
}

/// Capital and cost parameters for the simulation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SimConfig {
    pub initial_capital: f64,
    pub risk_per_trade: f64,
    pub fee: f64,
    pub slippage: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_capital: 10_000.0,
            risk_per_trade: 0.05,
            fee: 0.0005,
            slippage: 0.001,
        }
    }
}

/// Everything one run produces: the input bars, every stage's columns, and
/// the summary metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub bars: Vec<CloseBar>,
    pub params: StrategyParams,
    pub config: SimConfig,
    pub indicators: IndicatorSet,
    pub regime: RegimeSignals,
    /// Switch output before the kill-switch override.
    pub raw_signals: Vec<Signal>,
    pub kill: KillSwitchOutcome,
    pub position_size: Vec<Option<f64>>,
    pub sim: SimulationResult,
    pub metrics: Metrics,
}

/// Flat per-bar view over the result columns, for exporters.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BarRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub ret: Option<f64>,
    pub sma_short: Option<f64>,
    pub sma_long: Option<f64>,
    pub momentum: Option<f64>,
    pub volatility: Option<f64>,
    pub zscore: Option<f64>,
    pub vol_threshold: Option<f64>,
    pub trend_signal: i8,
    pub reversion_signal: i8,
    pub signal: i8,
    pub kill_switch: bool,
    pub position_size: Option<f64>,
    pub strategy_return: Option<f64>,
    pub portfolio_value: Option<f64>,
    pub drawdown: Option<f64>,
    /// Comparison curve: initial capital held in the asset from bar zero.
    pub buy_hold_value: f64,
}

impl BacktestResult {
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn record(&self, i: usize) -> BarRecord {
        let first_close = self.bars[0].close;
        let initial_capital = self.config.initial_capital;
        BarRecord {
            date: self.bars[i].date,
            close: self.bars[i].close,
            ret: self.indicators.returns[i],
            sma_short: self.indicators.sma_short[i],
            sma_long: self.indicators.sma_long[i],
            momentum: self.indicators.momentum[i],
            volatility: self.indicators.volatility[i],
            zscore: self.indicators.zscore[i],
            vol_threshold: self.regime.vol_threshold[i],
            trend_signal: self.regime.trend[i].as_int(),
            reversion_signal: self.regime.reversion[i].as_int(),
            signal: self.kill.signals[i].as_int(),
            kill_switch: self.kill.triggered[i],
            position_size: self.position_size[i],
            strategy_return: self.sim.strategy_return[i],
            portfolio_value: self.sim.portfolio_value[i],
            drawdown: self.sim.drawdown[i],
            buy_hold_value: initial_capital * (self.bars[i].close / first_close),
        }
    }

    pub fn records(&self) -> impl Iterator<Item = BarRecord> + '_ {
        (0..self.len()).map(|i| self.record(i))
    }
}

/// Runs the whole pipeline over a validated close series.
pub fn run_backtest(
    bars: &[CloseBar],
    params: &StrategyParams,
    config: &SimConfig,
) -> BacktestResult {
    let indicators = IndicatorSet::compute(bars, params.short_window, params.long_window);
    let regime = RegimeSignals::compute(&indicators, params.long_window, params.zscore_threshold);
    let raw_signals = switch::select_signals(&indicators, &regime);
    let kill =
        kill_switch::apply_kill_switch(&indicators, &regime, &raw_signals, params.kill_threshold);
    let position_size = sizing::position_sizes(&indicators.volatility, config.risk_per_trade);
    let sim = simulator::simulate(
        &indicators.returns,
        &kill.signals,
        &position_size,
        config.fee + config.slippage,
        config.initial_capital,
    );
    let metrics = Metrics::compute(bars, &sim, config.initial_capital);

    BacktestResult {
        bars: bars.to_vec(),
        params: params.clone(),
        config: config.clone(),
        indicators,
        regime,
        raw_signals,
        kill,
        position_size,
        sim,
        metrics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bars(closes: &[f64]) -> Vec<CloseBar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| CloseBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .checked_add_days(chrono::Days::new(i as u64))
                    .unwrap(),
                close,
            })
            .collect()
    }

    fn small_params() -> StrategyParams {
        StrategyParams {
            short_window: 2,
            long_window: 3,
            ..StrategyParams::default()
        }
    }

    #[test]
    fn all_columns_share_the_input_length() {
        let bars = make_bars(&[100.0, 101.0, 99.0, 102.0, 103.0, 101.0, 104.0, 105.0]);
        let result = run_backtest(&bars, &small_params(), &SimConfig::default());

        assert_eq!(result.len(), 8);
        assert_eq!(result.indicators.returns.len(), 8);
        assert_eq!(result.regime.vol_threshold.len(), 8);
        assert_eq!(result.raw_signals.len(), 8);
        assert_eq!(result.kill.signals.len(), 8);
        assert_eq!(result.position_size.len(), 8);
        assert_eq!(result.sim.portfolio_value.len(), 8);
    }

    #[test]
    fn records_mirror_the_columns() {
        let bars = make_bars(&[100.0, 110.0, 121.0, 115.0, 120.0, 126.0]);
        let result = run_backtest(&bars, &small_params(), &SimConfig::default());

        for (i, record) in result.records().enumerate() {
            assert_eq!(record.date, result.bars[i].date);
            assert_eq!(record.ret, result.indicators.returns[i]);
            assert_eq!(record.vol_threshold, result.regime.vol_threshold[i]);
            assert_eq!(record.signal, result.kill.signals[i].as_int());
            assert_eq!(record.kill_switch, result.kill.triggered[i]);
            assert_eq!(record.portfolio_value, result.sim.portfolio_value[i]);
        }
        let last = result.record(5);
        assert!((last.buy_hold_value - 12_600.0).abs() < 1e-9);
    }

    #[test]
    fn empty_input_is_a_degenerate_run_not_an_error() {
        let result = run_backtest(&[], &StrategyParams::default(), &SimConfig::default());
        assert!(result.is_empty());
        assert!((result.metrics.final_value - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(result.metrics.sharpe, None);
    }

    #[test]
    fn rerun_is_bit_identical() {
        let closes: Vec<f64> = (0..90)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + i as f64 * 0.1)
            .collect();
        let bars = make_bars(&closes);
        let params = StrategyParams::default();
        let config = SimConfig::default();

        let first = run_backtest(&bars, &params, &config);
        let second = run_backtest(&bars, &params, &config);
        assert_eq!(first, second);
    }
}
