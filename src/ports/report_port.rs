//! Report output port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::RegimetraderError;

/// Renders a finished run somewhere: a console summary, a per-bar CSV, a
/// JSON document. The core hands over plain data; presentation lives here.
pub trait ReportPort {
    /// Writes the result to `output_path`; `-` means standard output.
    fn write(&self, result: &BacktestResult, output_path: &str) -> Result<(), RegimetraderError>;
}
