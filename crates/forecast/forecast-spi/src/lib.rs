//! Forecast Service Provider Interface
//!
//! Defines the sequence predictor contract, the observation and forecast
//! models, and the error type shared by the forecasting stack.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::SequencePredictor;
pub use error::{ForecastError, Result};
pub use model::{
    FillPolicy, ForecastDiagnostics, ForecastPoint, MarginScaling, Observation,
    ObservationSeries,
};
