//! Basic example demonstrating a groundwater forecast
//!
//! Run with: cargo run --example basic -p forecast-facade

use chrono::{Duration, NaiveDate};
use forecast_facade::{
    ForecastConfigBuilder, ForecastEngine, ObservationSeries, Result, SequencePredictor,
};

/// Mean of the target column over the window
struct WindowMean;

impl SequencePredictor for WindowMean {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        Ok(window.iter().map(|row| row[0]).sum::<f64>() / window.len() as f64)
    }

    fn name(&self) -> &str {
        "window_mean"
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== hydrocast basic forecast ===\n");

    let levels = [
        42.1, 41.8, 41.2, 40.9, 41.5, 42.6, 43.4, 43.0, 42.4, 41.9, 41.6, 41.7,
    ];
    let start = NaiveDate::from_ymd_opt(2023, 1, 31).ok_or("invalid start date")?;
    let series = ObservationSeries::univariate(
        "level",
        levels
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + Duration::days(30 * i as i64), v)),
    )?;

    println!("History: {} readings, last on {:?}\n", series.len(), series.last_date());

    let config = ForecastConfigBuilder::new()
        .time_steps(3)
        .horizon(6)
        .build()?;
    let report = ForecastEngine::new(config)?.forecast(&series, &WindowMean)?;

    println!("{:>4}  {:10}  {:>8}  {:>8}  {:>8}", "step", "date", "level", "lower", "upper");
    for point in &report.points {
        let (lower, upper) = point.interval().unwrap_or((point.value, point.value));
        println!(
            "{:>4}  {}  {:>8.2}  {:>8.2}  {:>8.2}",
            point.step, point.date, point.value, lower, upper
        );
    }

    if let Some(diag) = report.diagnostics {
        println!(
            "\nstd_err={:.4} t={:.3} df={} rmse={:.4} mae={:.4}",
            diag.std_err, diag.t_critical, diag.degrees_of_freedom, diag.rmse, diag.mae
        );
    }

    Ok(())
}
