//! Forecast configuration types.

use forecast_core::{DEFAULT_CADENCE_DAYS, DEFAULT_CONFIDENCE_LEVEL, DEFAULT_STD_ERR};
use forecast_spi::{FillPolicy, ForecastError, MarginScaling, Result};
use serde::{Deserialize, Serialize};

/// Longest accepted horizon: one hundred years of monthly steps
pub const MAX_HORIZON: usize = 1200;

/// Configuration for a single forecast request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Window length fed to the predictor
    pub time_steps: usize,
    /// Number of steps to forecast
    pub horizon: usize,
    /// Days between consecutive forecast dates
    pub cadence_days: u32,
    /// Two-sided confidence level of the bands
    pub confidence_level: f64,
    /// Whether to run the residual pass and attach bands
    pub with_confidence: bool,
    /// Fill policy for auxiliary columns of reinjected rows
    pub fill_policy: FillPolicy,
    /// Margin growth across steps
    pub margin_scaling: MarginScaling,
    /// Standard error used when history is too short for residuals
    pub fallback_std_err: f64,
    /// Name of the column the predictor forecasts
    pub target_column: String,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            time_steps: 1,
            horizon: 12,
            cadence_days: DEFAULT_CADENCE_DAYS,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            with_confidence: true,
            fill_policy: FillPolicy::default(),
            margin_scaling: MarginScaling::default(),
            fallback_std_err: DEFAULT_STD_ERR,
            target_column: "level".to_string(),
        }
    }
}

impl ForecastConfig {
    /// Default configuration with a given horizon.
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    /// Check every field, reporting the first invalid one.
    pub fn validate(&self) -> Result<()> {
        if self.time_steps == 0 {
            return Err(ForecastError::invalid_parameter("time_steps", "must be positive"));
        }
        if self.horizon == 0 {
            return Err(ForecastError::invalid_parameter("horizon", "must be positive"));
        }
        if self.horizon > MAX_HORIZON {
            return Err(ForecastError::invalid_parameter(
                "horizon",
                format!("must be at most {}, got {}", MAX_HORIZON, self.horizon),
            ));
        }
        if self.cadence_days == 0 {
            return Err(ForecastError::invalid_parameter("cadence_days", "must be positive"));
        }
        if !(self.confidence_level > 0.0 && self.confidence_level < 1.0) {
            return Err(ForecastError::invalid_parameter(
                "confidence_level",
                format!("must be in (0, 1), got {}", self.confidence_level),
            ));
        }
        if !(self.fallback_std_err >= 0.0 && self.fallback_std_err.is_finite()) {
            return Err(ForecastError::invalid_parameter(
                "fallback_std_err",
                "must be finite and non-negative",
            ));
        }
        if self.target_column.trim().is_empty() {
            return Err(ForecastError::invalid_parameter(
                "target_column",
                "must not be empty",
            ));
        }
        Ok(())
    }
}

/// Builder for ForecastConfig.
#[derive(Debug, Default)]
pub struct ForecastConfigBuilder {
    time_steps: Option<usize>,
    horizon: Option<usize>,
    cadence_days: Option<u32>,
    confidence_level: Option<f64>,
    with_confidence: Option<bool>,
    fill_policy: Option<FillPolicy>,
    margin_scaling: Option<MarginScaling>,
    fallback_std_err: Option<f64>,
    target_column: Option<String>,
}

impl ForecastConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_steps(mut self, time_steps: usize) -> Self {
        self.time_steps = Some(time_steps);
        self
    }

    pub fn horizon(mut self, horizon: usize) -> Self {
        self.horizon = Some(horizon);
        self
    }

    pub fn cadence_days(mut self, cadence_days: u32) -> Self {
        self.cadence_days = Some(cadence_days);
        self
    }

    pub fn confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = Some(confidence_level);
        self
    }

    pub fn with_confidence(mut self, with_confidence: bool) -> Self {
        self.with_confidence = Some(with_confidence);
        self
    }

    pub fn fill_policy(mut self, fill_policy: FillPolicy) -> Self {
        self.fill_policy = Some(fill_policy);
        self
    }

    pub fn margin_scaling(mut self, margin_scaling: MarginScaling) -> Self {
        self.margin_scaling = Some(margin_scaling);
        self
    }

    pub fn fallback_std_err(mut self, fallback_std_err: f64) -> Self {
        self.fallback_std_err = Some(fallback_std_err);
        self
    }

    pub fn target_column(mut self, target_column: &str) -> Self {
        self.target_column = Some(target_column.to_string());
        self
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ForecastConfig> {
        let defaults = ForecastConfig::default();
        let config = ForecastConfig {
            time_steps: self.time_steps.unwrap_or(defaults.time_steps),
            horizon: self.horizon.unwrap_or(defaults.horizon),
            cadence_days: self.cadence_days.unwrap_or(defaults.cadence_days),
            confidence_level: self.confidence_level.unwrap_or(defaults.confidence_level),
            with_confidence: self.with_confidence.unwrap_or(defaults.with_confidence),
            fill_policy: self.fill_policy.unwrap_or(defaults.fill_policy),
            margin_scaling: self.margin_scaling.unwrap_or(defaults.margin_scaling),
            fallback_std_err: self.fallback_std_err.unwrap_or(defaults.fallback_std_err),
            target_column: self.target_column.unwrap_or(defaults.target_column),
        };
        config.validate()?;
        Ok(config)
    }
}
