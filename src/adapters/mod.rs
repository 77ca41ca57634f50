//! Concrete adapter implementations for the port traits.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use crate::domain::error::RegimetraderError;

pub mod csv_adapter;
pub mod csv_report_adapter;
pub mod file_config_adapter;
pub mod json_report_adapter;
pub mod text_report_adapter;

/// Writes rendered report content to `output_path`, creating parent
/// directories as needed. `-` writes to standard output.
pub(crate) fn write_output(output_path: &str, content: &str) -> Result<(), RegimetraderError> {
    let report_err = |reason: String| RegimetraderError::Report {
        path: output_path.to_string(),
        reason,
    };

    if output_path == "-" {
        return std::io::stdout()
            .lock()
            .write_all(content.as_bytes())
            .map_err(|e| report_err(e.to_string()));
    }

    let path = Path::new(output_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| report_err(e.to_string()))?;
        }
    }
    fs::write(path, content).map_err(|e| report_err(e.to_string()))
}
