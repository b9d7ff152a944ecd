//! Forecast error types

use thiserror::Error;

/// Errors that can occur during forecasting operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Fewer historical rows than the operation needs
    #[error("Insufficient data: need at least {required} points, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A feature column has zero range in the fit data
    #[error("Degenerate feature: column {column} has identical min and max, scaling is undefined")]
    DegenerateFeature { column: usize },

    /// The sequence predictor is absent or failed to initialise
    #[error("Predictor unavailable: {0}")]
    PredictorUnavailable(String),

    /// A requested feature column is not part of the series
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The injected predictor returned an error for a window
    #[error("Prediction failed: {0}")]
    Prediction(String),
}

impl ForecastError {
    /// Shorthand for [`ForecastError::InvalidParameter`].
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than by the
    /// predictor or the surrounding infrastructure.
    pub fn is_client_error(&self) -> bool {
        match self {
            ForecastError::InsufficientData { .. }
            | ForecastError::DegenerateFeature { .. }
            | ForecastError::InvalidColumn(_)
            | ForecastError::InvalidParameter { .. } => true,
            ForecastError::PredictorUnavailable(_) | ForecastError::Prediction(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_insufficient_data_error_message() {
        let error = ForecastError::InsufficientData {
            required: 12,
            actual: 3,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient data: need at least 12 points, got 3"
        );
    }

    #[test]
    fn test_degenerate_feature_error_message() {
        let error = ForecastError::DegenerateFeature { column: 0 };
        assert_eq!(
            error.to_string(),
            "Degenerate feature: column 0 has identical min and max, scaling is undefined"
        );
    }

    #[test]
    fn test_invalid_parameter_helper() {
        let error = ForecastError::invalid_parameter("time_steps", "must be positive");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'time_steps': must be positive"
        );
    }

    #[test]
    fn test_invalid_column_error_message() {
        let error = ForecastError::InvalidColumn("rainfall".to_string());
        assert_eq!(error.to_string(), "Invalid column: rainfall");
    }

    #[test]
    fn test_client_errors() {
        assert!(ForecastError::InsufficientData {
            required: 2,
            actual: 1
        }
        .is_client_error());
        assert!(ForecastError::DegenerateFeature { column: 1 }.is_client_error());
        assert!(ForecastError::InvalidColumn("x".into()).is_client_error());
        assert!(ForecastError::invalid_parameter("horizon", "zero").is_client_error());
    }

    #[test]
    fn test_infrastructure_errors() {
        assert!(!ForecastError::PredictorUnavailable("no model".into()).is_client_error());
        assert!(!ForecastError::Prediction("nan output".into()).is_client_error());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn Error> = Box::new(ForecastError::Prediction("boom".into()));
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ForecastError>();
    }
}
