//! Forecast report assembly and export

use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use crate::features::derive_features_batch;
use crate::models::{Regressor, TrainedRegressor, TrainingSet};
use crate::utils::future_dates;
use chrono::NaiveDate;
use serde::Serialize;

/// Column name used for predicted values in exports
pub const PREDICTED_COLUMN: &str = "Predicted_Sales";

/// ISO calendar date format used in exports
const EXPORT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One forecast observation: a future calendar day and its predicted value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    /// Predicted target value, unclamped (negative predictions are possible)
    pub predicted: f64,
}

/// A point labeled with the series it belongs to, for combined plotting
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabeledPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub series: &'static str,
}

/// Historical series paired with its forecast, ready for export
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    date_column: String,
    historical: DailySeries,
    forecast: Vec<ForecastRow>,
}

impl ForecastReport {
    /// Fit the model on the series and forecast the requested horizon
    ///
    /// The future range is `horizon_days` consecutive days starting the day
    /// after the series' last date. The model is refit from scratch on every
    /// call; nothing is cached across invocations.
    pub fn assemble<M: Regressor>(
        series: &DailySeries,
        date_column: &str,
        horizon_days: usize,
        model: &M,
    ) -> Result<Self> {
        if horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "Horizon must be at least 1 day".to_string(),
            ));
        }
        let last_date = series.last_date().ok_or_else(|| {
            ForecastError::DataError("no usable rows after aggregation".to_string())
        })?;

        let trained = model.fit(&TrainingSet::from_series(series))?;

        let dates = future_dates(last_date, horizon_days);
        let predictions = trained.predict(&derive_features_batch(&dates))?;

        Ok(Self {
            date_column: date_column.to_string(),
            historical: series.clone(),
            forecast: dates
                .into_iter()
                .zip(predictions)
                .map(|(date, predicted)| ForecastRow { date, predicted })
                .collect(),
        })
    }

    /// The caller-supplied date column name, reused verbatim in exports
    pub fn date_column(&self) -> &str {
        &self.date_column
    }

    /// The historical daily series
    pub fn historical(&self) -> &DailySeries {
        &self.historical
    }

    /// The forecast rows, one per horizon day, in date order
    pub fn forecast(&self) -> &[ForecastRow] {
        &self.forecast
    }

    /// Historical and forecast points concatenated, each labeled with its
    /// series, for charting collaborators
    pub fn labeled_points(&self) -> Vec<LabeledPoint> {
        let mut points: Vec<LabeledPoint> = self
            .historical
            .points()
            .iter()
            .map(|point| LabeledPoint {
                date: point.date,
                value: point.value,
                series: "historical",
            })
            .collect();
        points.extend(self.forecast.iter().map(|row| LabeledPoint {
            date: row.date,
            value: row.predicted,
            series: "forecast",
        }));
        points
    }

    /// Export the forecast rows as CSV
    ///
    /// Header is `<date_column>,Predicted_Sales`, followed by one
    /// `YYYY-MM-DD,<value>` row per forecast day.
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record([self.date_column.as_str(), PREDICTED_COLUMN])?;
        for row in &self.forecast {
            writer.write_record([
                row.date.format(EXPORT_DATE_FORMAT).to_string(),
                row.predicted.to_string(),
            ])?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|err| ForecastError::CsvError(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| ForecastError::CsvError(err.to_string()))
    }

    /// Export the full report (historical and forecast) as JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
