//! Forecast Core
//!
//! The autoregressive forecasting procedure: min-max feature scaling, the
//! sliding input window, multi-step prediction with reinjection, residual
//! confidence bands, and assembly of dated forecast points.
//!
//! Nothing here logs or retries; errors propagate to the caller as
//! [`ForecastError`].

pub mod assembler;
pub mod autoregressive;
pub mod metrics;
pub mod residual;
pub mod scaler;
pub mod window;

// Re-export SPI types for implementations
pub use forecast_spi::{
    FillPolicy, ForecastDiagnostics, ForecastError, ForecastPoint, MarginScaling, Observation,
    ObservationSeries, Result, SequencePredictor,
};

// Re-export main types
pub use assembler::{ForecastResultAssembler, DEFAULT_CADENCE_DAYS};
pub use autoregressive::AutoregressiveForecaster;
pub use residual::{
    t_critical, ConfidenceEstimate, ResidualConfidenceEstimator, DEFAULT_CONFIDENCE_LEVEL,
    DEFAULT_STD_ERR,
};
pub use scaler::FeatureScaler;
pub use window::WindowBuffer;
