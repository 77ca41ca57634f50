//! Price data access port trait.

use chrono::NaiveDate;

use crate::domain::bar::CloseBar;
use crate::domain::error::RegimetraderError;

/// Source of the close-price series for the one instrument under test.
/// Implementations validate the series contract (strictly increasing dates,
/// finite positive closes) before returning it.
pub trait DataPort {
    /// The close series, optionally restricted to an inclusive date range.
    fn fetch_closes(
        &self,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<CloseBar>, RegimetraderError>;
}
