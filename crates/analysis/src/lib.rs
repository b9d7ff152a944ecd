//! Dataset Analysis
//!
//! Descriptive statistics, a linear trend classification and a rough
//! seasonality check for an uploaded groundwater dataset, plus a short
//! plain-language summary of the findings.

pub mod insights;
pub mod seasonality;
pub mod stats;
pub mod trend;

pub use insights::insights;
pub use seasonality::{
    Seasonality, SeasonalityVerdict, DEFAULT_MIN_SEASONAL_POINTS, DEFAULT_SEASONAL_RATIO,
};
pub use stats::SummaryStats;
pub use trend::{Trend, TrendDirection, DEFAULT_TREND_THRESHOLD};

use data_spi::Dataset;
use serde::{Deserialize, Serialize};

/// Thresholds for the trend and seasonality checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Slope per day separating a trend from stable levels
    pub trend_threshold: f64,
    /// Seasonality is only checked with more readings than this
    pub min_seasonal_points: usize,
    /// Fraction of overall std dev the monthly spread must exceed
    pub seasonal_ratio: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend_threshold: DEFAULT_TREND_THRESHOLD,
            min_seasonal_points: DEFAULT_MIN_SEASONAL_POINTS,
            seasonal_ratio: DEFAULT_SEASONAL_RATIO,
        }
    }
}

/// Full analysis of one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub stats: SummaryStats,
    pub trend: Trend,
    pub seasonality: Seasonality,
    pub insights: String,
}

/// Analyze a dataset with default thresholds.
pub fn analyze(dataset: &Dataset) -> AnalysisReport {
    analyze_with(dataset, &AnalysisConfig::default())
}

pub fn analyze_with(dataset: &Dataset, config: &AnalysisConfig) -> AnalysisReport {
    let trend = Trend::detect(dataset, config.trend_threshold);
    let seasonality =
        Seasonality::detect(dataset, config.min_seasonal_points, config.seasonal_ratio);
    AnalysisReport {
        stats: SummaryStats::from_dataset(dataset),
        insights: insights(trend.direction, seasonality.verdict),
        trend,
        seasonality,
    }
}
