//! Daily close-price bar and input-series validation.

use chrono::NaiveDate;

use crate::domain::error::RegimetraderError;

/// One trading day's closing price. Calendar gaps are absent rows, not
/// explicit entities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloseBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl CloseBar {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Checks the input contract the pipeline assumes: strictly increasing dates
/// (no duplicates, no out-of-order rows) and finite positive closes. Adapters
/// call this before handing a series to the core.
pub fn validate_series(bars: &[CloseBar]) -> Result<(), RegimetraderError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(RegimetraderError::Data {
                reason: format!("bad close {} on {}", bar.close, bar.date),
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(RegimetraderError::Data {
                reason: format!(
                    "dates not strictly increasing: {} follows {}",
                    bar.date,
                    bars[i - 1].date
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> CloseBar {
        CloseBar::new(NaiveDate::from_ymd_opt(2024, 1, day).unwrap(), close)
    }

    #[test]
    fn valid_series_passes() {
        let bars = vec![bar(1, 100.0), bar(2, 101.5), bar(5, 99.0)];
        assert!(validate_series(&bars).is_ok());
    }

    #[test]
    fn empty_series_passes() {
        assert!(validate_series(&[]).is_ok());
    }

    #[test]
    fn gap_in_dates_is_fine() {
        // weekend gap: Fri 5th then Mon 8th
        let bars = vec![bar(5, 100.0), bar(8, 101.0)];
        assert!(validate_series(&bars).is_ok());
    }

    #[test]
    fn duplicate_date_rejected() {
        let bars = vec![bar(1, 100.0), bar(1, 101.0)];
        let err = validate_series(&bars).unwrap_err();
        assert!(matches!(err, RegimetraderError::Data { .. }));
    }

    #[test]
    fn out_of_order_rejected() {
        let bars = vec![bar(2, 100.0), bar(1, 101.0)];
        assert!(validate_series(&bars).is_err());
    }

    #[test]
    fn nan_close_rejected() {
        let bars = vec![bar(1, f64::NAN)];
        assert!(validate_series(&bars).is_err());
    }

    #[test]
    fn infinite_close_rejected() {
        let bars = vec![bar(1, f64::INFINITY)];
        assert!(validate_series(&bars).is_err());
    }

    #[test]
    fn non_positive_close_rejected() {
        assert!(validate_series(&[bar(1, 0.0)]).is_err());
        assert!(validate_series(&[bar(1, -3.0)]).is_err());
    }
}
