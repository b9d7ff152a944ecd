//! Rough seasonality check.
//!
//! Averages readings per calendar month of each year, then measures how much
//! the same calendar month varies from year to year. A large spread relative
//! to the overall variability is flagged as a possible seasonal pattern.

use crate::stats::{mean, sample_std_dev};
use chrono::Datelike;
use data_spi::Dataset;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Readings required before the check runs
pub const DEFAULT_MIN_SEASONAL_POINTS: usize = 24;

/// Fraction of the overall std dev the monthly spread must exceed
pub const DEFAULT_SEASONAL_RATIO: f64 = 0.5;

/// Outcome of the seasonality check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalityVerdict {
    PossibleSeasonal,
    NoneDetected,
}

impl SeasonalityVerdict {
    pub fn description(&self) -> &'static str {
        match self {
            SeasonalityVerdict::PossibleSeasonal => {
                "Possible seasonal pattern detected (e.g., yearly cycles)."
            }
            SeasonalityVerdict::NoneDetected => {
                "No obvious strong seasonality detected (requires more advanced analysis)."
            }
        }
    }
}

/// Seasonality verdict with the statistics behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub verdict: SeasonalityVerdict,
    /// Mean over calendar months of the std dev of that month's yearly means
    pub monthly_spread: Option<f64>,
    /// Spread the data had to exceed
    pub threshold: Option<f64>,
    pub description: String,
}

impl Seasonality {
    pub fn detect(dataset: &Dataset, min_points: usize, ratio: f64) -> Self {
        let (monthly_spread, threshold) = if dataset.len() > min_points {
            let overall = sample_std_dev(&dataset.levels());
            (monthly_spread(dataset), overall.map(|s| ratio * s))
        } else {
            (None, None)
        };

        let verdict = match (monthly_spread, threshold) {
            (Some(spread), Some(limit)) if spread > limit => SeasonalityVerdict::PossibleSeasonal,
            _ => SeasonalityVerdict::NoneDetected,
        };

        Self {
            verdict,
            monthly_spread,
            threshold,
            description: verdict.description().to_string(),
        }
    }
}

fn monthly_spread(dataset: &Dataset) -> Option<f64> {
    let mut buckets: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for record in dataset.records() {
        buckets
            .entry((record.date.year(), record.date.month()))
            .or_default()
            .push(record.level);
    }

    let mut by_month: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for ((_, month), levels) in &buckets {
        by_month.entry(*month).or_default().push(mean(levels));
    }

    // Months seen in only one year have no spread and are skipped
    let spreads: Vec<f64> = by_month
        .values()
        .filter_map(|means| sample_std_dev(means))
        .collect();
    if spreads.is_empty() {
        None
    } else {
        Some(mean(&spreads))
    }
}
