#![allow(dead_code)]

use chrono::NaiveDate;
use regimetrader::domain::bar::CloseBar;
use regimetrader::domain::error::RegimetraderError;
use regimetrader::ports::data_port::DataPort;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Daily bars from 2024-01-01, one close per entry.
pub fn make_bars(closes: &[f64]) -> Vec<CloseBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| CloseBar {
            date: date(2024, 1, 1) + chrono::Duration::days(i as i64),
            close,
        })
        .collect()
}

pub fn flat_series(len: usize, close: f64) -> Vec<CloseBar> {
    make_bars(&vec![close; len])
}

/// Closes 100, 101, 102, ... rising one point per bar.
pub fn rising_series(len: usize) -> Vec<CloseBar> {
    make_bars(&(0..len).map(|i| 100.0 + i as f64).collect::<Vec<_>>())
}

/// Thirty rising bars, then five bars each losing 20%.
pub fn crash_series() -> Vec<CloseBar> {
    let mut closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
    let mut last = 129.0;
    for _ in 0..5 {
        last *= 0.8;
        closes.push(last);
    }
    make_bars(&closes)
}

pub struct MockDataPort {
    bars: Vec<CloseBar>,
    error: Option<String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            bars: Vec::new(),
            error: None,
        }
    }

    pub fn with_bars(mut self, bars: Vec<CloseBar>) -> Self {
        self.bars = bars;
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_closes(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CloseBar>, RegimetraderError> {
        if let Some(reason) = &self.error {
            return Err(RegimetraderError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self
            .bars
            .iter()
            .filter(|bar| start_date.is_none_or(|s| bar.date >= s))
            .filter(|bar| end_date.is_none_or(|e| bar.date <= e))
            .copied()
            .collect())
    }
}
