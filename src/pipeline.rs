//! End-to-end forecast pipeline with a single error boundary

use crate::data::SalesTable;
use crate::error::Result;
use crate::models::random_forest::RandomForest;
use crate::report::ForecastReport;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Guidance shown alongside every pipeline failure
pub const DATA_HINT: &str =
    "Ensure your data has at least one valid date column and one numeric sales column.";

/// Request-scoped configuration for one forecast run
///
/// Replaces page-level UI state (column selectors and horizon slider) with an
/// explicit value passed into the pipeline. The recommended horizon range is
/// 7-365 days, but any positive horizon is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Name of the column holding dates
    pub date_column: String,
    /// Name of the column holding the target (sales) values
    pub target_column: String,
    /// Number of future days to forecast
    pub horizon_days: usize,
}

impl ForecastConfig {
    /// Create a forecast configuration
    pub fn new(
        date_column: impl Into<String>,
        target_column: impl Into<String>,
        horizon_days: usize,
    ) -> Self {
        Self {
            date_column: date_column.into(),
            target_column: target_column.into(),
            horizon_days,
        }
    }
}

/// User-facing pipeline failure
///
/// Carries the exact text of the underlying error plus a fixed actionable
/// hint. Internal error types never cross this boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineFailure {
    /// Exact text of the error that stopped the pipeline
    pub message: String,
    /// Actionable guidance for the user
    pub hint: &'static str,
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.hint)
    }
}

impl std::error::Error for PipelineFailure {}

impl From<crate::error::ForecastError> for PipelineFailure {
    fn from(err: crate::error::ForecastError) -> Self {
        Self {
            message: err.to_string(),
            hint: DATA_HINT,
        }
    }
}

/// Run the whole pipeline: aggregate, derive features, fit, predict, assemble
///
/// Every error raised anywhere in the pipeline is converted into a single
/// [`PipelineFailure`] here. No retries, no partial results.
pub fn run_forecast(
    table: &SalesTable,
    config: &ForecastConfig,
) -> std::result::Result<ForecastReport, PipelineFailure> {
    run_inner(table, config).map_err(PipelineFailure::from)
}

fn run_inner(table: &SalesTable, config: &ForecastConfig) -> Result<ForecastReport> {
    let series = table.aggregate(&config.date_column, &config.target_column)?;
    let model = RandomForest::new();
    ForecastReport::assemble(&series, &config.date_column, config.horizon_days, &model)
}
