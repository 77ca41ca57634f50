//! Plain-text summary report adapter.

use crate::adapters::write_output;
use crate::domain::backtest::BacktestResult;
use crate::domain::error::RegimetraderError;
use crate::ports::report_port::ReportPort;

/// Renders the run as a short human-readable summary, one figure per line.
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for TextReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), RegimetraderError> {
        write_output(output_path, &render(result))
    }
}

fn render(result: &BacktestResult) -> String {
    let m = &result.metrics;
    let kill_bars = result.kill.triggered.iter().filter(|&&t| t).count();

    let mut output = String::new();
    output.push_str("Backtest Summary\n");
    output.push_str("================\n");
    match (result.bars.first(), result.bars.last()) {
        (Some(first), Some(last)) => {
            output.push_str(&format!(
                "Bars:                  {} ({} to {})\n",
                result.len(),
                first.date,
                last.date
            ));
        }
        _ => output.push_str("Bars:                  0\n"),
    }
    output.push_str(&format!(
        "Final portfolio value: {}\n",
        format_currency(m.final_value)
    ));
    output.push_str(&format!(
        "Buy & hold value:      {}\n",
        format_currency(m.buy_hold_value)
    ));
    output.push_str(&format!("Net gain:              {:+.2}%\n", m.pct_gain));
    output.push_str(&format!(
        "Annualized return:     {:.2}%\n",
        m.annualized_return * 100.0
    ));
    output.push_str(&format!(
        "Annualized volatility: {:.2}%\n",
        m.annualized_volatility * 100.0
    ));
    match m.sharpe {
        Some(s) => output.push_str(&format!("Sharpe ratio:          {:.2}\n", s)),
        None => output.push_str("Sharpe ratio:          n/a (zero volatility)\n"),
    }
    match m.sortino {
        Some(s) => output.push_str(&format!("Sortino ratio:         {:.2}\n", s)),
        None => output.push_str("Sortino ratio:         n/a (no losing days)\n"),
    }
    output.push_str(&format!(
        "Kill-switch bars:      {} of {}\n",
        kill_bars,
        result.len()
    ));
    output
}

/// `$12,345.67`, with a leading minus for negative amounts.
fn format_currency(value: f64) -> String {
    let digits = format!("{:.2}", value.abs());
    let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}.{frac}")
}
