//! Forecast point model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One step of an assembled forecast, in original units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Step index, starting at 1
    pub step: usize,
    /// Forecast date
    pub date: NaiveDate,
    /// Point forecast
    pub value: f64,
    /// Lower confidence bound
    pub lower: Option<f64>,
    /// Upper confidence bound
    pub upper: Option<f64>,
}

impl ForecastPoint {
    /// Bounds as a pair, when both are present
    pub fn interval(&self) -> Option<(f64, f64)> {
        match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => Some((lower, upper)),
            _ => None,
        }
    }

    /// Width of the confidence band
    pub fn interval_width(&self) -> Option<f64> {
        self.interval().map(|(lower, upper)| upper - lower)
    }
}
