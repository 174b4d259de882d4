//! Raw sales table handling and daily aggregation

use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Date-only formats accepted in string date columns
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Datetime formats accepted in string date columns; time-of-day is discarded
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Raw uploaded sales data with named columns
///
/// Thin wrapper around a polars DataFrame. Column selection happens outside
/// the pipeline; this type only resolves the two selected columns and turns
/// them into a [`DailySeries`].
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
}

/// Data loader for raw sales tables
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a sales table from a CSV file with a header row
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<SalesTable> {
        let file = File::open(path)?;
        let df = CsvReader::new(file)
            .infer_schema(None)
            .has_header(true)
            .finish()?;

        Ok(SalesTable { df })
    }

    /// Wrap an existing DataFrame as a sales table
    pub fn from_dataframe(df: DataFrame) -> SalesTable {
        SalesTable { df }
    }
}

impl SalesTable {
    /// Number of raw records
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Names of all columns, in table order
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Aggregate raw records into a daily series
    ///
    /// Dates are truncated to calendar days and target values summed per day.
    /// The result is sorted ascending and unique by date. Any row whose date
    /// or target value cannot be interpreted fails the whole call; there is
    /// no per-row skip policy.
    pub fn aggregate(&self, date_column: &str, target_column: &str) -> Result<DailySeries> {
        let dates = self.column_as_dates(date_column)?;
        let targets = self.column_as_f64(target_column)?;

        let mut grouped: BTreeMap<NaiveDate, f64> = BTreeMap::new();
        for (date, value) in dates.into_iter().zip(targets) {
            *grouped.entry(date).or_insert(0.0) += value;
        }

        Ok(DailySeries {
            points: grouped
                .into_iter()
                .map(|(date, value)| DailyPoint { date, value })
                .collect(),
        })
    }

    fn column(&self, name: &str) -> Result<&Series> {
        self.df.column(name).map_err(|_| {
            ForecastError::DataError(format!("column '{}' not found in the data", name))
        })
    }

    /// Extract a column as calendar days, truncating any time-of-day part
    fn column_as_dates(&self, name: &str) -> Result<Vec<NaiveDate>> {
        let col = self.column(name)?;

        match col.dtype() {
            DataType::Date => col
                .date()?
                .into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let days = opt.ok_or_else(|| missing_value(name, row))?;
                    date_from_epoch_days(days)
                })
                .collect(),
            DataType::Datetime(unit, _) => {
                let per_second: i64 = match unit {
                    TimeUnit::Nanoseconds => 1_000_000_000,
                    TimeUnit::Microseconds => 1_000_000,
                    TimeUnit::Milliseconds => 1_000,
                };
                col.datetime()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, opt)| {
                        let ticks = opt.ok_or_else(|| missing_value(name, row))?;
                        date_from_epoch_seconds(ticks.div_euclid(per_second))
                    })
                    .collect()
            }
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let raw = opt.ok_or_else(|| missing_value(name, row))?;
                    parse_date(raw)
                })
                .collect(),
            other => Err(ForecastError::DataError(format!(
                "column '{}' has type {} and cannot be interpreted as dates",
                name, other
            ))),
        }
    }

    /// Extract a column as real numbers
    fn column_as_f64(&self, name: &str) -> Result<Vec<f64>> {
        let col = self.column(name)?;

        match col.dtype() {
            DataType::Utf8 => col
                .utf8()?
                .into_iter()
                .enumerate()
                .map(|(row, opt)| {
                    let raw = opt.ok_or_else(|| missing_value(name, row))?;
                    raw.trim().parse::<f64>().map_err(|_| {
                        ForecastError::DataError(format!(
                            "cannot parse '{}' in column '{}' as a number",
                            raw, name
                        ))
                    })
                })
                .collect(),
            dtype if dtype.is_numeric() => {
                let casted = col.cast(&DataType::Float64)?;
                casted
                    .f64()?
                    .into_iter()
                    .enumerate()
                    .map(|(row, opt)| opt.ok_or_else(|| missing_value(name, row)))
                    .collect()
            }
            other => Err(ForecastError::DataError(format!(
                "column '{}' has non-numeric type {}",
                name, other
            ))),
        }
    }
}

fn missing_value(column: &str, row: usize) -> ForecastError {
    ForecastError::DataError(format!(
        "column '{}' has a missing value at row {}",
        column, row
    ))
}

fn date_from_epoch_days(days: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(1970, 1, 1)
        .and_then(|epoch| epoch.checked_add_signed(Duration::days(days as i64)))
        .ok_or_else(|| ForecastError::DataError(format!("date value {} out of range", days)))
}

fn date_from_epoch_seconds(seconds: i64) -> Result<NaiveDate> {
    chrono::DateTime::from_timestamp(seconds, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| {
            ForecastError::DataError(format!("timestamp value {} out of range", seconds))
        })
}

/// Parse a string as a calendar day, trying the supported formats in order
fn parse_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime.date());
        }
    }

    Err(ForecastError::DataError(format!(
        "cannot parse '{}' as a date",
        raw
    )))
}

/// One aggregated observation: a calendar day and its summed target value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Date-aggregated historical series, sorted ascending and unique by date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySeries {
    points: Vec<DailyPoint>,
}

impl DailySeries {
    /// Build a series from points, enforcing the sorted-unique invariant
    pub fn new(mut points: Vec<DailyPoint>) -> Result<Self> {
        points.sort_by_key(|point| point.date);
        for pair in points.windows(2) {
            if pair[0].date == pair[1].date {
                return Err(ForecastError::ValidationError(format!(
                    "duplicate date {} in daily series",
                    pair[0].date
                )));
            }
        }
        Ok(Self { points })
    }

    /// The aggregated points in date order
    pub fn points(&self) -> &[DailyPoint] {
        &self.points
    }

    /// The dates in ascending order
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|point| point.date).collect()
    }

    /// The target values, in the same order as [`dates`](Self::dates)
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }

    /// Last (most recent) date in the series, if any
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|point| point.date)
    }

    /// First and last date of the series, if any
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date)),
            _ => None,
        }
    }

    /// Sum of all aggregated values
    pub fn total_value(&self) -> f64 {
        self.points.iter().map(|point| point.value).sum()
    }

    /// Number of distinct days
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check whether the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
