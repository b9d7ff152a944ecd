//! Linear trend detection.

use crate::stats::mean;
use data_spi::Dataset;
use serde::{Deserialize, Serialize};

/// Slope magnitude, in level units per day, below which levels count as stable
pub const DEFAULT_TREND_THRESHOLD: f64 = 0.01;

/// Direction of the fitted trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Upward,
    Downward,
    Stable,
    /// Fewer than two readings
    Insufficient,
}

impl TrendDirection {
    pub fn description(&self) -> &'static str {
        match self {
            TrendDirection::Upward => "Upward trend",
            TrendDirection::Downward => "Downward trend",
            TrendDirection::Stable => "Relatively stable trend",
            TrendDirection::Insufficient => "Not enough data for trend analysis.",
        }
    }
}

/// Trend classification with the fitted slope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub direction: TrendDirection,
    /// Least-squares slope of level against days since the first reading
    pub slope_per_day: Option<f64>,
    pub description: String,
}

impl Trend {
    pub fn detect(dataset: &Dataset, threshold: f64) -> Self {
        let first = dataset.first_date();
        let days: Vec<f64> = dataset
            .dates()
            .iter()
            .map(|d| (*d - first).num_days() as f64)
            .collect();
        let slope = least_squares_slope(&days, &dataset.levels());

        let direction = match slope {
            None => TrendDirection::Insufficient,
            Some(s) if s > threshold => TrendDirection::Upward,
            Some(s) if s < -threshold => TrendDirection::Downward,
            Some(_) => TrendDirection::Stable,
        };

        Self {
            direction,
            slope_per_day: slope,
            description: direction.description().to_string(),
        }
    }
}

fn least_squares_slope(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }
    let mx = mean(x);
    let my = mean(y);
    let sxx: f64 = x.iter().map(|xi| (xi - mx).powi(2)).sum();
    if sxx == 0.0 {
        return None;
    }
    let sxy: f64 = x.iter().zip(y).map(|(xi, yi)| (xi - mx) * (yi - my)).sum();
    Some(sxy / sxx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use data_spi::GroundwaterRecord;

    fn daily(levels: &[f64]) -> Dataset {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        Dataset::from_records(
            levels
                .iter()
                .enumerate()
                .map(|(i, &l)| GroundwaterRecord::new(start + chrono::Duration::days(i as i64), l))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_slope_exact() {
        assert_eq!(least_squares_slope(&[0.0, 1.0, 2.0], &[1.0, 3.0, 5.0]), Some(2.0));
        assert_eq!(least_squares_slope(&[1.0], &[1.0]), None);
    }

    #[test]
    fn test_directions() {
        let up = Trend::detect(&daily(&[1.0, 1.5, 2.0]), DEFAULT_TREND_THRESHOLD);
        assert_eq!(up.direction, TrendDirection::Upward);
        assert_eq!(up.description, "Upward trend");

        let down = Trend::detect(&daily(&[2.0, 1.5, 1.0]), DEFAULT_TREND_THRESHOLD);
        assert_eq!(down.direction, TrendDirection::Downward);

        let flat = Trend::detect(&daily(&[1.0, 1.005, 1.0]), DEFAULT_TREND_THRESHOLD);
        assert_eq!(flat.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_threshold_is_per_day() {
        // 0.3 over 30 days is 0.01 per day
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let dataset = Dataset::from_records(vec![
            GroundwaterRecord::new(start, 10.0),
            GroundwaterRecord::new(start + chrono::Duration::days(30), 10.3),
        ])
        .unwrap();
        let trend = Trend::detect(&dataset, 0.02);
        assert_eq!(trend.direction, TrendDirection::Stable);
    }

    #[test]
    fn test_single_point() {
        let trend = Trend::detect(&daily(&[1.0]), DEFAULT_TREND_THRESHOLD);
        assert_eq!(trend.direction, TrendDirection::Insufficient);
        assert_eq!(trend.slope_per_day, None);
    }
}
