//! Forecast diagnostics model

use serde::{Deserialize, Serialize};

/// Residual-pass statistics behind a forecast's confidence band.
///
/// `std_err`, `rmse` and `mae` are in scaled units. `mape` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDiagnostics {
    /// Number of one-step residuals replayed from history
    pub residual_count: usize,
    /// Standard error of the one-step prediction
    pub std_err: f64,
    /// True when `std_err` is the fixed fallback rather than a measurement
    pub std_err_is_fallback: bool,
    /// Degrees of freedom used for the t distribution
    pub degrees_of_freedom: usize,
    /// Two-sided critical value at `confidence_level`
    pub t_critical: f64,
    /// Confidence level, e.g. 0.95
    pub confidence_level: f64,
    /// Root mean squared residual
    pub rmse: f64,
    /// Mean absolute residual
    pub mae: f64,
    /// Mean absolute percentage residual
    pub mape: f64,
}
