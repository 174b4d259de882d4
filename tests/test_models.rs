use chrono::{Duration, NaiveDate};
use salescast::data::{DailyPoint, DailySeries};
use salescast::features::derive_features_batch;
use salescast::models::random_forest::RandomForest;
use salescast::models::{Regressor, TrainedRegressor, TrainingSet};
use salescast::utils::future_dates;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Sixty days of sales with a weekly pattern
fn weekly_pattern_series() -> DailySeries {
    let start = date(2024, 1, 1);
    let points = (0..60)
        .map(|offset| DailyPoint {
            date: start + Duration::days(offset),
            value: 100.0 + (offset % 7) as f64 * 10.0,
        })
        .collect();
    DailySeries::new(points).unwrap()
}

fn constant_series(value: f64, days: i64) -> DailySeries {
    let start = date(2024, 1, 1);
    let points = (0..days)
        .map(|offset| DailyPoint {
            date: start + Duration::days(offset),
            value,
        })
        .collect();
    DailySeries::new(points).unwrap()
}

#[test]
fn repeated_fits_are_bit_for_bit_identical() {
    let series = weekly_pattern_series();
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 14));

    let model = RandomForest::new();
    let first = model.fit(&training).unwrap().predict(&horizon).unwrap();
    let second = model.fit(&training).unwrap().predict(&horizon).unwrap();

    assert_eq!(first, second);
}

#[test]
fn custom_seed_is_also_reproducible() {
    let series = weekly_pattern_series();
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 7));

    let model = RandomForest::with_params(25, 7).unwrap();
    let first = model.fit(&training).unwrap().predict(&horizon).unwrap();
    let second = model.fit(&training).unwrap().predict(&horizon).unwrap();

    assert_eq!(first, second);
}

#[test]
fn constant_series_predicts_the_constant() {
    let series = constant_series(42.0, 30);
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 10));

    let trained = RandomForest::new().fit(&training).unwrap();
    let predictions = trained.predict(&horizon).unwrap();

    assert_eq!(predictions, vec![42.0; 10]);
}

#[test]
fn single_point_series_is_fittable() {
    let series = constant_series(99.0, 1);
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 3));

    let trained = RandomForest::new().fit(&training).unwrap();
    let predictions = trained.predict(&horizon).unwrap();

    assert_eq!(predictions, vec![99.0; 3]);
}

#[test]
fn one_prediction_per_feature_row() {
    let series = weekly_pattern_series();
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 21));

    let trained = RandomForest::new().fit(&training).unwrap();
    let predictions = trained.predict(&horizon).unwrap();

    assert_eq!(predictions.len(), 21);
}

#[test]
fn predictions_stay_within_target_range() {
    // Tree leaves are means of observed targets, so the ensemble average can
    // never leave the observed range.
    let series = weekly_pattern_series();
    let training = TrainingSet::from_series(&series);
    let horizon = derive_features_batch(&future_dates(series.last_date().unwrap(), 30));

    let trained = RandomForest::new().fit(&training).unwrap();
    for value in trained.predict(&horizon).unwrap() {
        assert!((100.0..=160.0).contains(&value), "out of range: {}", value);
    }
}

#[test]
fn zero_trees_is_rejected() {
    assert!(RandomForest::with_params(0, 42).is_err());
}

#[test]
fn empty_training_set_is_rejected() {
    let training = TrainingSet::new(Vec::new(), Vec::new()).unwrap();
    assert!(RandomForest::new().fit(&training).is_err());
}

#[test]
fn mismatched_training_lengths_are_rejected() {
    let features = derive_features_batch(&[date(2024, 1, 1), date(2024, 1, 2)]);
    assert!(TrainingSet::new(features, vec![1.0]).is_err());
}

#[test]
fn model_name_reflects_parameters() {
    let model = RandomForest::with_params(50, 7).unwrap();
    assert!(model.name().contains("50"));

    let series = constant_series(1.0, 5);
    let trained = model.fit(&TrainingSet::from_series(&series)).unwrap();
    assert_eq!(trained.name(), model.name());
}
