//! # hydrocast
//!
//! Command-line interface for forecasting and analysing groundwater levels
//! from a CSV or JSON file.

use analysis::AnalysisReport;
use clap::{Parser, Subcommand, ValueEnum};
use data_facade::{load_path, Dataset, LoadOptions, LoadOptionsBuilder};
use forecast_facade::{ForecastConfigBuilder, ForecastEngine, ForecastReport, SequencePredictor};
use predictor_core::{load_model, LastValuePredictor, WindowMeanPredictor};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "hydrocast")]
#[command(about = "Groundwater level forecasting CLI", long_about = None)]
struct Cli {
    /// Log progress to stderr (repeat for more detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast future groundwater levels
    Forecast {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Exported model weights (JSON); a baseline is used when omitted
        #[arg(short, long)]
        model: Option<PathBuf>,

        /// Baseline predictor used without --model
        #[arg(short, long, value_enum, default_value_t = Baseline::WindowMean)]
        baseline: Baseline,

        /// Number of months to forecast
        #[arg(long, default_value = "12")]
        months: usize,

        /// Window length fed to the predictor (defaults to the model's)
        #[arg(short, long)]
        time_steps: Option<usize>,

        /// Two-sided confidence level of the bands
        #[arg(long, default_value = "0.95")]
        confidence: f64,

        /// Skip confidence bands
        #[arg(long)]
        no_confidence: bool,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Output format for stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file for JSON results (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Summarise a dataset: statistics, trend and seasonality
    Analyze {
        /// Input file (CSV or JSON)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        columns: ColumnArgs,

        /// Output format for stdout
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,

        /// Output file for JSON results (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
struct ColumnArgs {
    /// Name of the date column
    #[arg(long, default_value = "date")]
    date_column: String,

    /// Name of the level column
    #[arg(long, default_value = "level")]
    level_column: String,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Baseline {
    WindowMean,
    LastValue,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

/// Load a dataset, inferring the format from the file extension
fn load_dataset(path: &Path, columns: &ColumnArgs) -> CliResult<Dataset> {
    let format = LoadOptions::for_path(path).map_err(|e| e.to_string())?.format;
    let options = LoadOptionsBuilder::new()
        .format(format)
        .date_column(&columns.date_column)
        .level_column(&columns.level_column)
        .build()
        .map_err(|e| e.to_string())?;
    load_path(path, Some(&options)).map_err(|e| format!("Failed to load {:?}: {}", path, e))
}

fn select_predictor(
    model: Option<&Path>,
    baseline: Baseline,
) -> CliResult<Box<dyn SequencePredictor>> {
    match model {
        Some(path) => {
            let model = load_model(path).map_err(|e| e.to_string())?;
            debug!(
                time_steps = model.time_steps(),
                features = model.feature_count(),
                "Model loaded"
            );
            Ok(Box::new(model))
        }
        None => Ok(match baseline {
            Baseline::WindowMean => Box::new(WindowMeanPredictor::new(0)),
            Baseline::LastValue => Box::new(LastValuePredictor::new(0)),
        }),
    }
}

/// Write JSON results to a file
fn write_json<T: Serialize>(value: &T, path: &Path) -> CliResult<()> {
    let mut file = File::create(path).map_err(|e| format!("Failed to create output: {}", e))?;
    serde_json::to_writer_pretty(&mut file, value)
        .map_err(|e| format!("Failed to write JSON: {}", e))?;
    info!(path = ?path, "Results written");
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| format!("Failed to serialize: {}", e))
}

fn forecast_table(report: &ForecastReport) -> String {
    let mut out = format!("{:<12}{:>12}{:>12}{:>12}\n", "Date", "Level", "Lower", "Upper");
    for point in &report.points {
        let (lower, upper) = match point.interval() {
            Some((l, u)) => (format!("{:.3}", l), format!("{:.3}", u)),
            None => ("-".to_string(), "-".to_string()),
        };
        out.push_str(&format!(
            "{:<12}{:>12.3}{:>12}{:>12}\n",
            point.date.to_string(),
            point.value,
            lower,
            upper
        ));
    }
    if let Some(d) = &report.diagnostics {
        out.push_str(&format!(
            "\nResiduals: {}  std err: {:.4}{}  t: {:.3}  RMSE: {:.4}  MAE: {:.4}  MAPE: {:.2}%\n",
            d.residual_count,
            d.std_err,
            if d.std_err_is_fallback { " (fallback)" } else { "" },
            d.t_critical,
            d.rmse,
            d.mae,
            d.mape
        ));
    }
    out
}

fn analysis_table(report: &AnalysisReport) -> String {
    let stats = &report.stats;
    let std_dev = stats
        .std_dev
        .map(|s| format!("{:.3}", s))
        .unwrap_or_else(|| "-".into());
    format!(
        "Period:      {} to {}\n\
         Readings:    {}\n\
         Mean:        {:.3}\n\
         Median:      {:.3}\n\
         Min / Max:   {:.3} / {:.3}\n\
         Std dev:     {}\n\
         Trend:       {}\n\
         Seasonality: {}\n\n\
         {}\n",
        stats.start_date,
        stats.end_date,
        stats.data_points,
        stats.mean_level,
        stats.median_level,
        stats.min_level,
        stats.max_level,
        std_dev,
        report.trend.description,
        report.seasonality.description,
        report.insights
    )
}

/// Run forecast command
#[allow(clippy::too_many_arguments)]
fn run_forecast(
    input: PathBuf,
    model: Option<PathBuf>,
    baseline: Baseline,
    months: usize,
    time_steps: Option<usize>,
    confidence: f64,
    no_confidence: bool,
    columns: ColumnArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let dataset = load_dataset(&input, &columns)?;
    info!(
        records = dataset.len(),
        dropped = dataset.dropped_rows(),
        "Loaded {:?}",
        input.file_name().unwrap_or_default()
    );

    let predictor = select_predictor(model.as_deref(), baseline)?;
    let time_steps = time_steps
        .or_else(|| predictor.expected_time_steps())
        .unwrap_or(1);
    let config = ForecastConfigBuilder::new()
        .horizon(months)
        .time_steps(time_steps)
        .confidence_level(confidence)
        .with_confidence(!no_confidence)
        .build()
        .map_err(|e| e.to_string())?;

    let series = dataset.to_series().map_err(|e| e.to_string())?;
    let report = ForecastEngine::new(config)
        .and_then(|engine| engine.forecast(&series, predictor.as_ref()))
        .map_err(|e| e.to_string())?;

    match format {
        OutputFormat::Table => {
            println!("Predictor: {}", predictor.name());
            print!("{}", forecast_table(&report));
        }
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    if let Some(path) = output {
        write_json(&report, &path)?;
    }
    Ok(())
}

/// Run analyze command
fn run_analyze(
    input: PathBuf,
    columns: ColumnArgs,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> CliResult<()> {
    let dataset = load_dataset(&input, &columns)?;
    let report = analysis::analyze(&dataset);

    match format {
        OutputFormat::Table => print!("{}", analysis_table(&report)),
        OutputFormat::Json => println!("{}", to_json(&report)?),
    }
    if let Some(path) = output {
        write_json(&report, &path)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Forecast {
            input,
            model,
            baseline,
            months,
            time_steps,
            confidence,
            no_confidence,
            columns,
            format,
            output,
        } => run_forecast(
            input,
            model,
            baseline,
            months,
            time_steps,
            confidence,
            no_confidence,
            columns,
            format,
            output,
        ),

        Commands::Analyze {
            input,
            columns,
            format,
            output,
        } => run_analyze(input, columns, format, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
