//! Per-bar CSV series export adapter.

use crate::adapters::write_output;
use crate::domain::backtest::BacktestResult;
use crate::domain::error::RegimetraderError;
use crate::ports::report_port::ReportPort;

/// Exports one row per bar with every derived column, for spreadsheets and
/// charting tools. Undefined cells are left empty.
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), RegimetraderError> {
        let report_err = |reason: String| RegimetraderError::Report {
            path: output_path.to_string(),
            reason,
        };

        let mut wtr = csv::Writer::from_writer(Vec::new());
        for record in result.records() {
            wtr.serialize(record).map_err(|e| report_err(e.to_string()))?;
        }
        let buf = wtr
            .into_inner()
            .map_err(|e| report_err(e.to_string()))?;
        let content = String::from_utf8(buf).map_err(|e| report_err(e.to_string()))?;

        write_output(output_path, &content)
    }
}
