//! Groundwater reading type.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single water-level reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterRecord {
    /// Reading date
    pub date: NaiveDate,
    /// Water level
    pub level: f64,
}

impl GroundwaterRecord {
    /// Create a new record.
    pub fn new(date: NaiveDate, level: f64) -> Self {
        Self { date, level }
    }
}
