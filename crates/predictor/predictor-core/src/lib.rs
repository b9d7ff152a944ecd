//! Predictor Core
//!
//! [`SequencePredictor`] implementations: deterministic baselines and a
//! linear window model loaded from exported weights.

pub mod baseline;
pub mod linear;

pub use baseline::{LastValuePredictor, WindowMeanPredictor};
pub use linear::{load_model, LinearWindowModel};

/// Re-export the trait implemented here
pub use forecast_spi::SequencePredictor;
