//! Summary statistics.

use chrono::NaiveDate;
use data_spi::Dataset;
use serde::{Deserialize, Serialize};

/// Descriptive statistics of the level column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean_level: f64,
    pub median_level: f64,
    pub min_level: f64,
    pub max_level: f64,
    /// Sample standard deviation; `None` for a single reading
    pub std_dev: Option<f64>,
    pub data_points: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SummaryStats {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let levels = dataset.levels();
        Self {
            mean_level: mean(&levels),
            median_level: median(&levels),
            min_level: levels.iter().cloned().fold(f64::INFINITY, f64::min),
            max_level: levels.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            std_dev: sample_std_dev(&levels),
            data_points: levels.len(),
            start_date: dataset.first_date(),
            end_date: dataset.last_date(),
        }
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Standard deviation with one delta degree of freedom
pub(crate) fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let ss: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}
