//! Utility functions for the salescast crate

use chrono::{Duration, NaiveDate};

/// Build the forecast horizon: `horizon` consecutive days after `last_date`
///
/// The range starts the day after `last_date` and is contiguous, so it never
/// overlaps the historical series.
pub fn future_dates(last_date: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|offset| last_date + Duration::days(offset))
        .collect()
}
