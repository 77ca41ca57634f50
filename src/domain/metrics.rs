//! Summary performance metrics, computed once over the defined strategy
//! returns after the simulation pass.

use crate::domain::bar::CloseBar;
use crate::domain::simulator::SimulationResult;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Metrics {
    /// Mean daily strategy return scaled to a 252-day year.
    pub annualized_return: f64,
    /// Sample std of daily strategy returns scaled by sqrt(252); 0.0 when
    /// fewer than two returns are defined.
    pub annualized_volatility: f64,
    /// None when the volatility is exactly zero (constant or missing returns).
    pub sharpe: Option<f64>,
    /// Downside-only risk adjustment; None when no strategy return is negative.
    pub sortino: Option<f64>,
    /// Final portfolio value over initial capital, minus one, as a percentage.
    pub pct_gain: f64,
    pub final_value: f64,
    /// Initial capital scaled by last close over first close.
    pub buy_hold_value: f64,
}

impl Metrics {
    pub fn compute(bars: &[CloseBar], sim: &SimulationResult, initial_capital: f64) -> Self {
        let rets: Vec<f64> = sim.strategy_return.iter().flatten().copied().collect();

        let annualized_return = mean(&rets) * TRADING_DAYS_PER_YEAR;
        let annualized_volatility = sample_std(&rets) * TRADING_DAYS_PER_YEAR.sqrt();

        let sharpe = if annualized_volatility != 0.0 {
            Some(annualized_return / annualized_volatility)
        } else {
            None
        };

        let downside: Vec<f64> = rets.iter().copied().filter(|r| *r < 0.0).collect();
        let sortino = if downside.is_empty() {
            None
        } else {
            let down_sq_mean = downside.iter().map(|r| r * r).sum::<f64>() / downside.len() as f64;
            Some(annualized_return / (TRADING_DAYS_PER_YEAR * down_sq_mean).sqrt())
        };

        let final_value = sim
            .portfolio_value
            .iter()
            .flatten()
            .next_back()
            .copied()
            .unwrap_or(initial_capital);
        let pct_gain = (final_value / initial_capital - 1.0) * 100.0;

        let buy_hold_value = match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => initial_capital * (last.close / first.close),
            _ => initial_capital,
        };

        Metrics {
            annualized_return,
            annualized_volatility,
            sharpe,
            sortino,
            pct_gain,
            final_value,
            buy_hold_value,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sq_sum: f64 = values
        .iter()
        .map(|v| {
            let diff = v - m;
            diff * diff
        })
        .sum();
    (sq_sum / (values.len() - 1) as f64).sqrt()
}
