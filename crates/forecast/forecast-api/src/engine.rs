//! Forecast orchestration.
//!
//! Runs the full control flow for one request: fit the scaler on the
//! supplied history, replay residuals, predict autoregressively, and
//! assemble dated points. Nothing is cached between calls.

use crate::config::ForecastConfig;
use forecast_core::{
    AutoregressiveForecaster, FeatureScaler, ForecastResultAssembler, ResidualConfidenceEstimator,
};
use forecast_spi::{
    ForecastDiagnostics, ForecastError, ForecastPoint, ObservationSeries, Result,
    SequencePredictor,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Output of a forecast request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Forecast points, step 1 first
    pub points: Vec<ForecastPoint>,
    /// Residual statistics, present when confidence bands were requested
    pub diagnostics: Option<ForecastDiagnostics>,
}

/// Forecast runner bound to one validated configuration
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    config: ForecastConfig,
}

impl ForecastEngine {
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast `horizon` steps past the end of `series`.
    pub fn forecast<P>(&self, series: &ObservationSeries, predictor: &P) -> Result<ForecastReport>
    where
        P: SequencePredictor + ?Sized,
    {
        let config = &self.config;

        if let Some(expected) = predictor.expected_time_steps() {
            if expected != config.time_steps {
                return Err(ForecastError::invalid_parameter(
                    "time_steps",
                    format!(
                        "{} expects windows of {} steps, got {}",
                        predictor.name(),
                        expected,
                        config.time_steps
                    ),
                ));
            }
        }

        if let Some(expected) = predictor.expected_feature_count() {
            if expected != series.feature_count() {
                return Err(ForecastError::PredictorUnavailable(format!(
                    "{} was trained on {} features, series has {}",
                    predictor.name(),
                    expected,
                    series.feature_count()
                )));
            }
        }

        let target = series.column_index(&config.target_column)?;
        let required = config.time_steps.max(2);
        if series.len() < required {
            return Err(ForecastError::InsufficientData {
                required,
                actual: series.len(),
            });
        }
        let last_date = series.last_date().ok_or(ForecastError::InsufficientData {
            required,
            actual: 0,
        })?;

        let assembler = ForecastResultAssembler::new(target, config.cadence_days);
        assembler.date_for_step(last_date, config.horizon)?;

        debug!(
            predictor = predictor.name(),
            rows = series.len(),
            features = series.feature_count(),
            time_steps = config.time_steps,
            horizon = config.horizon,
            "Starting forecast"
        );

        let matrix = series.matrix();
        let scaler = FeatureScaler::fit(&matrix)?;
        let scaled = scaler.transform(&matrix)?;

        let estimate = if config.with_confidence {
            let estimate = ResidualConfidenceEstimator::new(config.time_steps)
                .with_target_index(target)
                .with_confidence_level(config.confidence_level)
                .with_margin_scaling(config.margin_scaling)
                .with_fallback_std_err(config.fallback_std_err)
                .estimate(&scaled, predictor)?;
            if estimate.std_err_is_fallback {
                warn!(
                    residuals = estimate.residual_count,
                    std_err = estimate.std_err,
                    "History too short for residual estimate, using fallback standard error"
                );
            }
            debug!(
                residuals = estimate.residual_count,
                std_err = estimate.std_err,
                t_critical = estimate.t_critical,
                dof = estimate.degrees_of_freedom,
                "Residual pass complete"
            );
            Some(estimate)
        } else {
            None
        };

        let predictions = AutoregressiveForecaster::new(config.time_steps, config.horizon)
            .with_target_index(target)
            .with_fill_policy(config.fill_policy)
            .run(&scaled, predictor)?;

        let intervals = estimate.as_ref().map(|e| e.intervals(&predictions));
        let points = assembler.assemble(
            &predictions,
            intervals.as_deref(),
            &scaler,
            last_date,
        )?;

        info!(
            predictor = predictor.name(),
            steps = points.len(),
            last_date = %last_date,
            "Forecast generated"
        );

        Ok(ForecastReport {
            points,
            diagnostics: estimate.map(|e| e.diagnostics()),
        })
    }
}
