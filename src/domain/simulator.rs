//! Return accounting: lagged sized exposure, turnover costs, compounded
//! portfolio value and its drawdown.

use crate::domain::signal::Signal;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    /// Turnover cost per bar; undefined on the first bar (no prior signal).
    pub cost: Vec<Option<f64>>,
    /// Net per-bar strategy return after costs.
    pub strategy_return: Vec<Option<f64>>,
    /// Compounded equity; undefined where the strategy return is undefined,
    /// and compounding skips those bars rather than resetting.
    pub portfolio_value: Vec<Option<f64>>,
    /// Decline from the running peak of defined portfolio values. Reported
    /// only; the kill switch works on its own provisional curve.
    pub drawdown: Vec<Option<f64>>,
}

/// Runs the return accounting. Direction and size both lag one bar: bar `i`
/// earns `return[i] * signal[i-1] * size[i-1]`, so nothing the bar itself
/// reveals can influence its own trade. Costs are `cost_rate` per unit of
/// signal turnover.
pub fn simulate(
    returns: &[Option<f64>],
    signals: &[Signal],
    sizes: &[Option<f64>],
    cost_rate: f64,
    initial_capital: f64,
) -> SimulationResult {
    let n = signals.len();
    let mut cost = vec![None; n];
    let mut strategy_return = vec![None; n];
    let mut portfolio_value = vec![None; n];
    let mut drawdown = vec![None; n];

    let mut equity = initial_capital;
    let mut peak = f64::NEG_INFINITY;

    for i in 0..n {
        if i > 0 {
            let bar_cost = cost_rate * signals[i].turnover(signals[i - 1]);
            cost[i] = Some(bar_cost);
            strategy_return[i] = match (returns[i], sizes[i - 1]) {
                (Some(ret), Some(size)) => {
                    Some(ret * signals[i - 1].value() * size - bar_cost)
                }
                _ => None,
            };
        }

        if let Some(net) = strategy_return[i] {
            equity *= 1.0 + net;
            if equity > peak {
                peak = equity;
            }
            portfolio_value[i] = Some(equity);
            drawdown[i] = Some(equity / peak - 1.0);
        }
    }

    SimulationResult {
        cost,
        strategy_return,
        portfolio_value,
        drawdown,
    }
}
