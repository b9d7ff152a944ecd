//! Linear window model
//!
//! A trained sequence model exported as plain weights: one weight per
//! (time step, feature) cell of the input window plus a bias. The file
//! format is JSON:
//!
//! ```json
//! {"time_steps": 2, "feature_count": 1, "weights": [0.3, 0.7], "bias": 0.01}
//! ```
//!
//! Weights are stored row-major, oldest time step first.

use forecast_spi::{ForecastError, Result, SequencePredictor};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Linear model over a fixed-shape window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearWindowModel {
    time_steps: usize,
    feature_count: usize,
    weights: Vec<f64>,
    bias: f64,
}

impl LinearWindowModel {
    pub fn new(time_steps: usize, feature_count: usize, weights: Vec<f64>, bias: f64) -> Result<Self> {
        let model = Self {
            time_steps,
            feature_count,
            weights,
            bias,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate an exported model.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)
            .map_err(|e| ForecastError::PredictorUnavailable(format!("malformed model: {}", e)))?;
        model.validate()?;
        Ok(model)
    }

    fn validate(&self) -> Result<()> {
        if self.time_steps == 0 || self.feature_count == 0 {
            return Err(ForecastError::PredictorUnavailable(
                "model window must have at least one step and one feature".to_string(),
            ));
        }
        let expected = self.time_steps * self.feature_count;
        if self.weights.len() != expected {
            return Err(ForecastError::PredictorUnavailable(format!(
                "expected {} weights for a {}x{} window, found {}",
                expected,
                self.time_steps,
                self.feature_count,
                self.weights.len()
            )));
        }
        if !self.bias.is_finite() || self.weights.iter().any(|w| !w.is_finite()) {
            return Err(ForecastError::PredictorUnavailable(
                "model parameters must be finite".to_string(),
            ));
        }
        Ok(())
    }

    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }
}

impl SequencePredictor for LinearWindowModel {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        if window.len() != self.time_steps {
            return Err(ForecastError::Prediction(format!(
                "model expects {} time steps, got {}",
                self.time_steps,
                window.len()
            )));
        }
        let mut sum = self.bias;
        for (row, weights) in window.iter().zip(self.weights.chunks(self.feature_count)) {
            if row.len() != self.feature_count {
                return Err(ForecastError::Prediction(format!(
                    "model expects {} features, got {}",
                    self.feature_count,
                    row.len()
                )));
            }
            sum += row.iter().zip(weights).map(|(x, w)| x * w).sum::<f64>();
        }
        Ok(sum)
    }

    fn expected_time_steps(&self) -> Option<usize> {
        Some(self.time_steps)
    }

    fn expected_feature_count(&self) -> Option<usize> {
        Some(self.feature_count)
    }

    fn name(&self) -> &str {
        "linear_window"
    }
}

/// Load an exported model file.
///
/// Any failure, missing file included, is reported as
/// [`ForecastError::PredictorUnavailable`].
pub fn load_model(path: &Path) -> Result<LinearWindowModel> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        ForecastError::PredictorUnavailable(format!("cannot read {}: {}", path.display(), e))
    })?;
    LinearWindowModel::from_json_str(&json)
}
