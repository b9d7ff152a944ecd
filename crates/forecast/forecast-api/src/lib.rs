//! Forecast Consumer API
//!
//! Request configuration and the orchestrating [`ForecastEngine`].
//!
//! This crate provides:
//! - [`ForecastConfig`] with serde defaults and a builder
//! - [`ForecastEngine`], which runs scaling, residual estimation,
//!   autoregressive prediction and assembly for one request
//! - Re-exports from SPI and core for convenience

pub mod config;
pub mod engine;

pub use config::{ForecastConfig, ForecastConfigBuilder, MAX_HORIZON};
pub use engine::{ForecastEngine, ForecastReport};

// Re-export from core
pub use forecast_core::{
    metrics, t_critical, AutoregressiveForecaster, ConfidenceEstimate, FeatureScaler,
    ForecastResultAssembler, ResidualConfidenceEstimator, WindowBuffer, DEFAULT_CADENCE_DAYS,
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_STD_ERR,
};

// Re-export traits and models from SPI
pub use forecast_spi::{
    FillPolicy, ForecastDiagnostics, ForecastError, ForecastPoint, MarginScaling, Observation,
    ObservationSeries, Result, SequencePredictor,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ForecastConfig, ForecastConfigBuilder, ForecastEngine, ForecastReport};
    pub use forecast_spi::{
        FillPolicy, ForecastError, ForecastPoint, MarginScaling, ObservationSeries, Result,
        SequencePredictor,
    };
}
