//! Observation series model

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated feature vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Observation date
    pub date: NaiveDate,
    /// Feature values, one per series column
    pub features: Vec<f64>,
}

impl Observation {
    pub fn new(date: NaiveDate, features: Vec<f64>) -> Self {
        Self { date, features }
    }
}

/// Chronologically ordered observations sharing one feature layout.
///
/// Construction enforces strictly increasing dates and a uniform row width,
/// so downstream components can index rows and columns without re-checking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationSeries {
    feature_names: Vec<String>,
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Build a series from named columns and already-sorted observations
    pub fn new(feature_names: Vec<String>, observations: Vec<Observation>) -> Result<Self> {
        if feature_names.is_empty() {
            return Err(ForecastError::invalid_parameter(
                "feature_names",
                "series needs at least one feature column",
            ));
        }

        let width = feature_names.len();
        for (i, obs) in observations.iter().enumerate() {
            if obs.features.len() != width {
                return Err(ForecastError::invalid_parameter(
                    "observations",
                    format!(
                        "row {} has {} features, expected {}",
                        i,
                        obs.features.len(),
                        width
                    ),
                ));
            }
        }

        if let Some(pair) = observations.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(ForecastError::invalid_parameter(
                "observations",
                format!(
                    "dates must be strictly increasing, found {} after {}",
                    pair[1].date, pair[0].date
                ),
            ));
        }

        Ok(Self {
            feature_names,
            observations,
        })
    }

    /// Build a single-feature series from (date, value) pairs
    pub fn univariate<I>(name: &str, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let observations = points
            .into_iter()
            .map(|(date, value)| Observation::new(date, vec![value]))
            .collect();
        Self::new(vec![name.to_string()], observations)
    }

    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of feature columns
    pub fn feature_count(&self) -> usize {
        self.feature_names.len()
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Index of the named feature column
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.feature_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| {
                ForecastError::InvalidColumn(format!(
                    "'{}' not found, available columns: {}",
                    name,
                    self.feature_names.join(", ")
                ))
            })
    }

    /// Feature values as a row-major matrix
    pub fn matrix(&self) -> Vec<Vec<f64>> {
        self.observations.iter().map(|o| o.features.clone()).collect()
    }

    /// Values of a single column
    pub fn column(&self, index: usize) -> Result<Vec<f64>> {
        if index >= self.feature_count() {
            return Err(ForecastError::InvalidColumn(format!(
                "index {} out of range for {} columns",
                index,
                self.feature_count()
            )));
        }
        Ok(self.observations.iter().map(|o| o.features[index]).collect())
    }

    /// Date of the most recent observation
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }
}
