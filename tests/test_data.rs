use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use polars::prelude::*;
use pretty_assertions::assert_eq;
use salescast::data::{DailyPoint, DailySeries, DataLoader, SalesTable};
use std::io::Write;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sales_table(dates: &[&str], values: &[f64]) -> SalesTable {
    let df = DataFrame::new(vec![
        Series::new("order_date", dates),
        Series::new("sales", values),
    ])
    .unwrap();
    DataLoader::from_dataframe(df)
}

#[test]
fn aggregate_sums_values_per_day() {
    let table = sales_table(
        &["2024-01-01", "2024-01-01", "2024-01-02"],
        &[10.0, 5.0, 7.0],
    );

    let series = table.aggregate("order_date", "sales").unwrap();

    assert_eq!(
        series.points(),
        &[
            DailyPoint {
                date: date(2024, 1, 1),
                value: 15.0
            },
            DailyPoint {
                date: date(2024, 1, 2),
                value: 7.0
            },
        ]
    );
}

#[test]
fn aggregate_is_deterministic() {
    let table = sales_table(
        &["2024-03-05", "2024-03-01", "2024-03-05"],
        &[1.5, 2.5, 3.5],
    );

    let first = table.aggregate("order_date", "sales").unwrap();
    let second = table.aggregate("order_date", "sales").unwrap();

    assert_eq!(first, second);
}

#[test]
fn aggregate_sorts_ascending_with_unique_dates() {
    let table = sales_table(
        &["2024-02-10", "2024-01-03", "2024-02-10", "2024-01-01"],
        &[4.0, 3.0, 2.0, 1.0],
    );

    let series = table.aggregate("order_date", "sales").unwrap();
    let dates = series.dates();

    for pair in dates.windows(2) {
        assert!(pair[0] < pair[1], "dates must be strictly increasing");
    }
    assert_eq!(series.len(), 3);
}

#[test]
fn timestamps_on_same_day_are_merged() {
    let table = sales_table(
        &["2024-01-01 09:30:00", "2024-01-01 17:45:00", "2024-01-02 08:00:00"],
        &[100.0, 50.0, 70.0],
    );

    let series = table.aggregate("order_date", "sales").unwrap();

    assert_eq!(series.len(), 2);
    assert_eq!(series.points()[0].value, 150.0);
    assert_eq!(series.points()[0].date, date(2024, 1, 1));
}

#[test]
fn integer_target_column_aggregates() {
    let df = DataFrame::new(vec![
        Series::new("order_date", &["2024-01-01", "2024-01-02"]),
        Series::new("units", &[10i64, 7]),
    ])
    .unwrap();
    let table = DataLoader::from_dataframe(df);

    let series = table.aggregate("order_date", "units").unwrap();

    assert_eq!(series.values(), vec![10.0, 7.0]);
}

#[test]
fn non_numeric_target_fails() {
    let df = DataFrame::new(vec![
        Series::new("order_date", &["2024-01-01", "2024-01-02"]),
        Series::new("sales", &["10", "not-a-number"]),
    ])
    .unwrap();
    let table = DataLoader::from_dataframe(df);

    assert!(table.aggregate("order_date", "sales").is_err());
}

#[test]
fn null_target_fails() {
    let df = DataFrame::new(vec![
        Series::new("order_date", &["2024-01-01", "2024-01-02"]),
        Series::new("sales", &[Some(10.0f64), None]),
    ])
    .unwrap();
    let table = DataLoader::from_dataframe(df);

    assert!(table.aggregate("order_date", "sales").is_err());
}

#[test]
fn unparseable_date_fails() {
    let table = sales_table(&["2024-01-01", "last tuesday"], &[1.0, 2.0]);

    assert!(table.aggregate("order_date", "sales").is_err());
}

#[test]
fn missing_columns_fail() {
    let table = sales_table(&["2024-01-01"], &[1.0]);

    assert!(table.aggregate("shipped_at", "sales").is_err());
    assert!(table.aggregate("order_date", "revenue").is_err());
}

#[test]
fn daily_series_rejects_duplicate_dates() {
    let points = vec![
        DailyPoint {
            date: date(2024, 1, 1),
            value: 1.0,
        },
        DailyPoint {
            date: date(2024, 1, 1),
            value: 2.0,
        },
    ];

    assert!(DailySeries::new(points).is_err());
}

#[test]
fn daily_series_overview_metrics() {
    let table = sales_table(
        &["2024-01-01", "2024-01-03", "2024-01-02"],
        &[10.0, 30.0, 20.0],
    );

    let series = table.aggregate("order_date", "sales").unwrap();

    assert_eq!(series.total_value(), 60.0);
    assert_eq!(
        series.date_range(),
        Some((date(2024, 1, 1), date(2024, 1, 3)))
    );
    assert_eq!(series.last_date(), Some(date(2024, 1, 3)));
}

#[test]
fn loads_and_aggregates_csv_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "order_date,region,sales").unwrap();
    writeln!(file, "2024-01-01,EU,10.5").unwrap();
    writeln!(file, "2024-01-01,US,4.5").unwrap();
    writeln!(file, "2024-01-02,EU,7.0").unwrap();
    file.flush().unwrap();

    let table = DataLoader::from_csv(file.path()).unwrap();
    assert_eq!(table.height(), 3);
    assert!(table.column_names().contains(&"region".to_string()));

    let series = table.aggregate("order_date", "sales").unwrap();
    assert_approx_eq!(series.values()[0], 15.0);
    assert_approx_eq!(series.values()[1], 7.0);
}
