//! Baseline predictors
//!
//! Deterministic predictors that need no trained weights. Useful as a
//! reference point for trained models and as a fallback in tooling.

use forecast_spi::{ForecastError, Result, SequencePredictor};
use serde::{Deserialize, Serialize};

fn target_values<'a>(
    window: &'a [Vec<f64>],
    target_index: usize,
) -> Result<impl Iterator<Item = f64> + 'a> {
    if window.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }
    if let Some(row) = window.iter().find(|row| row.len() <= target_index) {
        return Err(ForecastError::InvalidColumn(format!(
            "target index {} out of range for {} columns",
            target_index,
            row.len()
        )));
    }
    Ok(window.iter().map(move |row| row[target_index]))
}

/// Window Mean
///
/// Predicts the mean of the target column across the window.
///
/// @algorithm WindowMean
/// @category Baseline
/// @complexity O(w) predict
/// @thread_safe true
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowMeanPredictor {
    target_index: usize,
}

impl WindowMeanPredictor {
    pub fn new(target_index: usize) -> Self {
        Self { target_index }
    }
}

impl SequencePredictor for WindowMeanPredictor {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        let values = target_values(window, self.target_index)?;
        Ok(values.sum::<f64>() / window.len() as f64)
    }

    fn name(&self) -> &str {
        "window_mean"
    }
}

/// Last Value (naive)
///
/// Predicts the most recent target value.
///
/// @algorithm Naive
/// @category Baseline
/// @complexity O(1) predict
/// @thread_safe true
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastValuePredictor {
    target_index: usize,
}

impl LastValuePredictor {
    pub fn new(target_index: usize) -> Self {
        Self { target_index }
    }
}

impl SequencePredictor for LastValuePredictor {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        target_values(window, self.target_index)?
            .last()
            .ok_or(ForecastError::InsufficientData {
                required: 1,
                actual: 0,
            })
    }

    fn name(&self) -> &str {
        "last_value"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window() -> Vec<Vec<f64>> {
        vec![vec![0.2, 9.0], vec![0.4, 8.0], vec![0.9, 7.0]]
    }

    #[test]
    fn test_window_mean() {
        let p = WindowMeanPredictor::default();
        assert!((p.predict(&window()).unwrap() - 0.5).abs() < 1e-12);
        let p = WindowMeanPredictor::new(1);
        assert!((p.predict(&window()).unwrap() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn test_last_value() {
        assert_eq!(LastValuePredictor::default().predict(&window()).unwrap(), 0.9);
        assert_eq!(LastValuePredictor::new(1).predict(&window()).unwrap(), 7.0);
    }

    #[test]
    fn test_empty_window() {
        assert!(matches!(
            WindowMeanPredictor::default().predict(&[]),
            Err(ForecastError::InsufficientData { .. })
        ));
        assert!(LastValuePredictor::default().predict(&[]).is_err());
    }

    #[test]
    fn test_target_out_of_range() {
        assert!(matches!(
            WindowMeanPredictor::new(2).predict(&window()),
            Err(ForecastError::InvalidColumn(_))
        ));
    }

    #[test]
    fn test_no_fixed_window_length() {
        assert_eq!(WindowMeanPredictor::default().expected_time_steps(), None);
        assert_eq!(LastValuePredictor::default().expected_time_steps(), None);
    }
}
