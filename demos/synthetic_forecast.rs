use chrono::{Datelike, Duration, NaiveDate};
use polars::prelude::*;
use salescast::data::DataLoader;
use salescast::pipeline::{run_forecast, ForecastConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Salescast: Synthetic Forecasting Example");
    println!("========================================\n");

    println!("Creating sample data...");
    let table = DataLoader::from_dataframe(create_sample_sales()?);
    println!("Sample data created: {} records\n", table.height());

    let config = ForecastConfig::new("order_date", "sales", 14);
    let report = run_forecast(&table, &config)?;

    println!("Historical days: {}", report.historical().len());
    println!("Forecast:");
    for row in report.forecast() {
        println!("  {}  {:.2}", row.date, row.predicted);
    }

    println!("\nCSV export:\n{}", report.to_csv()?);
    Ok(())
}

/// Four months of daily sales with a weekly pattern and a mild upward trend
fn create_sample_sales() -> Result<DataFrame, PolarsError> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut dates = Vec::new();
    let mut sales = Vec::new();

    for offset in 0..120 {
        let date = start + Duration::days(offset);
        // Weekends sell more; slow growth over time
        let weekday_boost = match date.weekday().num_days_from_monday() {
            5 | 6 => 60.0,
            _ => 0.0,
        };
        dates.push(date.format("%Y-%m-%d").to_string());
        sales.push(200.0 + weekday_boost + offset as f64 * 0.5);
    }

    DataFrame::new(vec![
        Series::new("order_date", dates),
        Series::new("sales", sales),
    ])
}
