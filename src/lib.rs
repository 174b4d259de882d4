//! # Salescast
//!
//! A Rust library for turning historical sales records into short-horizon
//! forecasts with a random forest regressor trained on calendar features.
//!
//! ## Pipeline
//!
//! 1. Load a raw table (CSV file or polars DataFrame) with [`data::DataLoader`]
//! 2. Aggregate it into a daily series, summing the target per calendar day
//! 3. Derive calendar features (year, month, day, weekday, day-of-year)
//! 4. Fit a fixed-seed random forest and predict the requested horizon
//! 5. Assemble a [`report::ForecastReport`] exportable as CSV or JSON
//!
//! The whole run is synchronous and stateless: every forecast request refits
//! the model from the raw input, and every error surfaces once, at the
//! pipeline boundary, as a [`pipeline::PipelineFailure`] with an actionable
//! hint.
//!
//! ## Quick Start
//!
//! ```rust
//! use polars::prelude::*;
//! use salescast::data::DataLoader;
//! use salescast::pipeline::{run_forecast, ForecastConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let df = DataFrame::new(vec![
//!         Series::new("order_date", &["2024-01-01", "2024-01-01", "2024-01-02"]),
//!         Series::new("sales", &[120.0, 35.5, 80.0]),
//!     ])?;
//!
//!     let table = DataLoader::from_dataframe(df);
//!     let config = ForecastConfig::new("order_date", "sales", 7);
//!     let report = run_forecast(&table, &config)?;
//!
//!     assert_eq!(report.forecast().len(), 7);
//!     println!("{}", report.to_csv()?);
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use crate::data::{DailySeries, DataLoader, SalesTable};
pub use crate::error::ForecastError;
pub use crate::features::{derive_features, derive_features_batch, FeatureRow};
pub use crate::models::random_forest::RandomForest;
pub use crate::models::{Regressor, TrainedRegressor, TrainingSet};
pub use crate::pipeline::{run_forecast, ForecastConfig, PipelineFailure};
pub use crate::report::{ForecastReport, ForecastRow};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
