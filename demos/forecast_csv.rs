use salescast::data::DataLoader;
use salescast::pipeline::{run_forecast, ForecastConfig};
use std::env;

/// Default forecast horizon in days when none is given on the command line
const DEFAULT_HORIZON: usize = 30;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <csv-path> <date-column> <target-column> [horizon-days]",
            args[0]
        );
        std::process::exit(2);
    }

    let horizon: usize = match args.get(4) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_HORIZON,
    };

    println!("Salescast: CSV Forecasting");
    println!("==========================\n");

    let table = DataLoader::from_csv(&args[1])?;
    println!(
        "Loaded {} records with columns {:?}\n",
        table.height(),
        table.column_names()
    );

    let config = ForecastConfig::new(args[2].clone(), args[3].clone(), horizon);
    match run_forecast(&table, &config) {
        Ok(report) => {
            let series = report.historical();
            if let Some((first, last)) = series.date_range() {
                println!("Dataset timeframe: {} to {}", first, last);
            }
            println!("Distinct days:     {}", series.len());
            println!("Total volume:      {:.2}\n", series.total_value());

            std::fs::write("sales_forecast.csv", report.to_csv()?)?;
            println!(
                "Forecast for {} days written to sales_forecast.csv",
                horizon
            );
        }
        Err(failure) => {
            eprintln!("An error occurred: {}", failure.message);
            eprintln!("{}", failure.hint);
            std::process::exit(1);
        }
    }

    Ok(())
}
