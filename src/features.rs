//! Calendar feature derivation for regression inputs

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// Number of calendar features derived per date
pub const FEATURE_COUNT: usize = 5;

/// Calendar-derived features for one date
///
/// The same derivation is applied to historical and future dates so the
/// trained model sees an identical feature distribution at prediction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureRow {
    /// Calendar year
    pub year: i32,
    /// Month of year (1-12)
    pub month: u32,
    /// Day of month (1-31)
    pub day: u32,
    /// Day of week, Monday = 0 through Sunday = 6
    pub weekday: u32,
    /// Day of year (1-366)
    pub day_of_year: u32,
}

impl FeatureRow {
    /// Flatten into the fixed-width numeric input consumed by regressors
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.year as f64,
            self.month as f64,
            self.day as f64,
            self.weekday as f64,
            self.day_of_year as f64,
        ]
    }
}

/// Derive the calendar features for a single date
pub fn derive_features(date: NaiveDate) -> FeatureRow {
    FeatureRow {
        year: date.year(),
        month: date.month(),
        day: date.day(),
        weekday: date.weekday().num_days_from_monday(),
        day_of_year: date.ordinal(),
    }
}

/// Derive calendar features for a sequence of dates, preserving order
pub fn derive_features_batch(dates: &[NaiveDate]) -> Vec<FeatureRow> {
    dates.iter().map(|&date| derive_features(date)).collect()
}
