//! Strategy enums for the autoregressive loop and interval construction

use serde::{Deserialize, Serialize};

/// How auxiliary feature slots are filled when a prediction is reinjected
/// into the window.
///
/// The predictor only emits the target feature, so every synthesized row
/// needs values for the remaining columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Repeat the most recent row's auxiliary values
    #[default]
    CarryForward,
    /// Set auxiliary values to 0.0 in scaled space
    Zero,
}

/// How the confidence margin evolves with the forecast step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginScaling {
    /// Same margin for every step
    #[default]
    Constant,
    /// Margin grows with the square root of the step
    SqrtStep,
}

impl MarginScaling {
    /// Multiplier applied to `t_critical * std_err` at a 1-based step
    pub fn factor(&self, step: usize) -> f64 {
        match self {
            MarginScaling::Constant => 1.0,
            MarginScaling::SqrtStep => (step.max(1) as f64).sqrt(),
        }
    }
}
