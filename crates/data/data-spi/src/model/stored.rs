//! Stored upload and forecast types.

use super::Dataset;
use chrono::{DateTime, Utc};
use forecast_spi::{ForecastDiagnostics, ForecastPoint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Handle returned when a dataset is uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetId(Uuid);

impl DatasetId {
    /// Generate a fresh random handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for DatasetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DatasetId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

/// The most recent forecast computed for a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredForecast {
    pub points: Vec<ForecastPoint>,
    pub diagnostics: Option<ForecastDiagnostics>,
    pub created_at: DateTime<Utc>,
}

impl StoredForecast {
    pub fn new(points: Vec<ForecastPoint>, diagnostics: Option<ForecastDiagnostics>) -> Self {
        Self {
            points,
            diagnostics,
            created_at: Utc::now(),
        }
    }
}

/// An uploaded dataset and what has been derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDataset {
    pub id: DatasetId,
    pub dataset: Dataset,
    pub uploaded_at: DateTime<Utc>,
    pub last_forecast: Option<StoredForecast>,
}
