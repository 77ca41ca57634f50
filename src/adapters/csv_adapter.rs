//! CSV close-price data adapter.

use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::domain::bar::{self, CloseBar};
use crate::domain::error::RegimetraderError;
use crate::ports::data_port::DataPort;

/// Reads a daily close series from a single CSV file. A header row is
/// expected; the date sits in the first column and the close column is
/// matched by name (case-insensitive), falling back to the second column
/// when no `close` header is present.
pub struct CsvDataAdapter {
    path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    fn data_error(&self, reason: String) -> RegimetraderError {
        RegimetraderError::Data {
            reason: format!("{}: {}", self.path.display(), reason),
        }
    }
}

impl DataPort for CsvDataAdapter {
    fn fetch_closes(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CloseBar>, RegimetraderError> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| self.data_error(format!("read failed: {e}")))?;
        let mut rdr = csv::Reader::from_reader(content.as_bytes());

        let close_col = rdr
            .headers()
            .map_err(|e| self.data_error(format!("bad header row: {e}")))?
            .iter()
            .position(|name| name.trim().eq_ignore_ascii_case("close"))
            .unwrap_or(1);

        let mut bars = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            // 1-based file line, counting the header row
            let row = i + 2;
            let record = result.map_err(|e| self.data_error(format!("row {row}: {e}")))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| self.data_error(format!("row {row}: missing date column")))?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d")
                .map_err(|e| self.data_error(format!("row {row}: bad date {date_str:?}: {e}")))?;

            if let Some(start) = start_date {
                if date < start {
                    continue;
                }
            }
            if let Some(end) = end_date {
                if date > end {
                    continue;
                }
            }

            let close_str = record
                .get(close_col)
                .ok_or_else(|| self.data_error(format!("row {row}: missing close column")))?;
            let close: f64 = close_str.trim().parse().map_err(|e| {
                self.data_error(format!("row {row}: bad close {close_str:?}: {e}"))
            })?;

            bars.push(CloseBar::new(date, close));
        }

        bar::validate_series(&bars)?;
        Ok(bars)
    }
}
