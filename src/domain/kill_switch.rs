//! Drawdown kill switch.
//!
//! Simulates a provisional equity curve from the raw switch signals (one-bar
//! execution lag, no sizing, no costs, undefined terms contribute zero) and
//! forces a bar flat when that curve's drawdown breaches the kill threshold
//! while volatility sits above its threshold and momentum is negative. The
//! provisional curve is discarded afterwards; it is never the reported
//! portfolio.

use crate::domain::indicators::IndicatorSet;
use crate::domain::regime::RegimeSignals;
use crate::domain::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct KillSwitchOutcome {
    /// Whether the kill condition held on each bar.
    pub triggered: Vec<bool>,
    /// Final signals: the raw signal, or flat where triggered.
    pub signals: Vec<Signal>,
}

/// All three predicates must hold for a bar to be killed: provisional
/// drawdown below `kill_threshold` (strict), volatility above its threshold
/// (strict), momentum below zero (strict). An undefined operand makes its
/// predicate false. The provisional curve always consumes the raw signals,
/// so one bar's override cannot feed back into another bar's equity.
pub fn apply_kill_switch(
    indicators: &IndicatorSet,
    regime: &RegimeSignals,
    raw_signals: &[Signal],
    kill_threshold: f64,
) -> KillSwitchOutcome {
    let mut triggered = Vec::with_capacity(raw_signals.len());
    let mut signals = Vec::with_capacity(raw_signals.len());

    let mut equity = 1.0_f64;
    let mut peak = 1.0_f64;

    for i in 0..raw_signals.len() {
        let provisional_return = if i == 0 {
            0.0
        } else {
            indicators.returns[i].map_or(0.0, |r| r * raw_signals[i - 1].value())
        };
        equity *= 1.0 + provisional_return;
        if equity > peak {
            peak = equity;
        }
        let drawdown = equity / peak - 1.0;

        let drawdown_breach = drawdown < kill_threshold;
        let high_volatility = matches!(
            (indicators.volatility[i], regime.vol_threshold[i]),
            (Some(v), Some(t)) if v > t
        );
        let falling = indicators.momentum[i].is_some_and(|m| m < 0.0);

        let kill = drawdown_breach && high_volatility && falling;
        triggered.push(kill);
        signals.push(if kill { Signal::Flat } else { raw_signals[i] });
    }

    KillSwitchOutcome { triggered, signals }
}
