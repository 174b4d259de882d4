//! Regression model interfaces for calendar-feature forecasting

use crate::data::DailySeries;
use crate::error::{ForecastError, Result};
use crate::features::{derive_features_batch, FeatureRow};
use std::fmt::Debug;

/// Feature/target pairs used for one training invocation
#[derive(Debug, Clone)]
pub struct TrainingSet {
    features: Vec<FeatureRow>,
    targets: Vec<f64>,
}

impl TrainingSet {
    /// Create a training set from parallel feature and target sequences
    pub fn new(features: Vec<FeatureRow>, targets: Vec<f64>) -> Result<Self> {
        if features.len() != targets.len() {
            return Err(ForecastError::ValidationError(format!(
                "Features length ({}) doesn't match targets length ({})",
                features.len(),
                targets.len()
            )));
        }

        Ok(Self { features, targets })
    }

    /// Derive a training set from an aggregated daily series
    pub fn from_series(series: &DailySeries) -> Self {
        Self {
            features: derive_features_batch(&series.dates()),
            targets: series.values(),
        }
    }

    /// The feature rows, one per observation
    pub fn features(&self) -> &[FeatureRow] {
        &self.features
    }

    /// The target values, parallel to [`features`](Self::features)
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    /// Check whether the training set has no observations
    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// A fitted regression model
pub trait TrainedRegressor: Debug {
    /// Predict one value per feature row, preserving order
    fn predict(&self, features: &[FeatureRow]) -> Result<Vec<f64>>;

    /// Name of the model
    fn name(&self) -> &str;
}

/// Regression model that can be fit on feature/target pairs
pub trait Regressor: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedRegressor;

    /// Fit the model on a training set
    fn fit(&self, training: &TrainingSet) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

pub mod random_forest;
