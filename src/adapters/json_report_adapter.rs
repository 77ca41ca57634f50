//! JSON export adapter for downstream tooling.

use crate::adapters::write_output;
use crate::domain::backtest::{BacktestResult, BarRecord, SimConfig, StrategyParams};
use crate::domain::error::RegimetraderError;
use crate::domain::metrics::Metrics;
use crate::ports::report_port::ReportPort;

/// Exports the whole run as one JSON document: the parameters it ran with,
/// the summary metrics, and the full per-bar series.
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Serialize)]
struct JsonReport<'a> {
    params: &'a StrategyParams,
    config: &'a SimConfig,
    metrics: &'a Metrics,
    bars: Vec<BarRecord>,
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), RegimetraderError> {
        let doc = JsonReport {
            params: &result.params,
            config: &result.config,
            metrics: &result.metrics,
            bars: result.records().collect(),
        };
        let mut content =
            serde_json::to_string_pretty(&doc).map_err(|e| RegimetraderError::Report {
                path: output_path.to_string(),
                reason: e.to_string(),
            })?;
        content.push('\n');

        write_output(output_path, &content)
    }
}
