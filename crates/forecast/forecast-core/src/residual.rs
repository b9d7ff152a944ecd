//! Residual-based confidence bands
//!
//! Replays the predictor over every historical (window, next value) pair,
//! takes the spread of the one-step residuals as the prediction standard
//! error, and scales it by a Student-t critical value. By default the margin
//! is the same at every step; [`MarginScaling::SqrtStep`] widens it with the
//! horizon instead.

use crate::metrics::{mae, mape, rmse, std_dev};
use forecast_spi::{ForecastDiagnostics, ForecastError, MarginScaling, Result, SequencePredictor};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// Standard error used when fewer than two residuals are available.
///
/// A heuristic in scaled units, not a statistically derived value.
pub const DEFAULT_STD_ERR: f64 = 0.05;

/// Two-sided confidence level used unless configured otherwise
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Two-sided Student-t critical value, e.g. `t(0.975, df)` for a 95% band
pub fn t_critical(confidence_level: f64, degrees_of_freedom: usize) -> Result<f64> {
    validate_level(confidence_level)?;
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom.max(1) as f64)
        .map_err(|e| ForecastError::invalid_parameter("degrees_of_freedom", e.to_string()))?;
    Ok(dist.inverse_cdf(1.0 - (1.0 - confidence_level) / 2.0))
}

fn validate_level(confidence_level: f64) -> Result<()> {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(ForecastError::invalid_parameter(
            "confidence_level",
            format!("must be in (0, 1), got {}", confidence_level),
        ));
    }
    Ok(())
}

/// Estimates a predictive standard error from historical residuals
#[derive(Debug, Clone, PartialEq)]
pub struct ResidualConfidenceEstimator {
    time_steps: usize,
    target_index: usize,
    confidence_level: f64,
    margin_scaling: MarginScaling,
    fallback_std_err: f64,
}

impl ResidualConfidenceEstimator {
    /// Estimator for the first column at the default confidence level
    pub fn new(time_steps: usize) -> Self {
        Self {
            time_steps,
            target_index: 0,
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            margin_scaling: MarginScaling::default(),
            fallback_std_err: DEFAULT_STD_ERR,
        }
    }

    /// Column whose residuals are measured
    pub fn with_target_index(mut self, target_index: usize) -> Self {
        self.target_index = target_index;
        self
    }

    /// Two-sided level of the bands
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Margin growth across forecast steps
    pub fn with_margin_scaling(mut self, margin_scaling: MarginScaling) -> Self {
        self.margin_scaling = margin_scaling;
        self
    }

    /// Override [`DEFAULT_STD_ERR`]
    pub fn with_fallback_std_err(mut self, fallback_std_err: f64) -> Self {
        self.fallback_std_err = fallback_std_err;
        self
    }

    /// Replay the predictor over the history and derive the error model.
    ///
    /// Issues one predictor call per index in `time_steps..len`. A history
    /// too short for two residuals falls back to the fixed standard error
    /// instead of failing.
    pub fn estimate<P>(&self, scaled_history: &[Vec<f64>], predictor: &P) -> Result<ConfidenceEstimate>
    where
        P: SequencePredictor + ?Sized,
    {
        if self.time_steps == 0 {
            return Err(ForecastError::invalid_parameter("time_steps", "must be positive"));
        }
        validate_level(self.confidence_level)?;
        if !(self.fallback_std_err >= 0.0 && self.fallback_std_err.is_finite()) {
            return Err(ForecastError::invalid_parameter(
                "fallback_std_err",
                "must be finite and non-negative",
            ));
        }

        let mut actuals = Vec::new();
        let mut predicted = Vec::new();
        for i in self.time_steps..scaled_history.len() {
            let actual = scaled_history[i]
                .get(self.target_index)
                .copied()
                .ok_or_else(|| {
                    ForecastError::InvalidColumn(format!(
                        "target index {} out of range for {} columns",
                        self.target_index,
                        scaled_history[i].len()
                    ))
                })?;
            let window = &scaled_history[i - self.time_steps..i];
            predicted.push(predictor.predict(window)?);
            actuals.push(actual);
        }

        let residuals: Vec<f64> = actuals
            .iter()
            .zip(&predicted)
            .map(|(a, p)| a - p)
            .collect();

        let (std_err, std_err_is_fallback) = if residuals.len() < 2 {
            (self.fallback_std_err, true)
        } else {
            (std_dev(&residuals), false)
        };

        let degrees_of_freedom = scaled_history
            .len()
            .saturating_sub(self.time_steps + 1)
            .max(1);
        let t_critical = t_critical(self.confidence_level, degrees_of_freedom)?;

        let (rmse, mae, mape) = if residuals.is_empty() {
            (0.0, 0.0, 0.0)
        } else {
            (
                rmse(&actuals, &predicted),
                mae(&actuals, &predicted),
                mape(&actuals, &predicted),
            )
        };

        Ok(ConfidenceEstimate {
            residual_count: residuals.len(),
            std_err,
            std_err_is_fallback,
            degrees_of_freedom,
            t_critical,
            confidence_level: self.confidence_level,
            margin_scaling: self.margin_scaling,
            rmse,
            mae,
            mape,
        })
    }
}

/// Fitted error model for one forecast request
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceEstimate {
    pub residual_count: usize,
    pub std_err: f64,
    pub std_err_is_fallback: bool,
    pub degrees_of_freedom: usize,
    pub t_critical: f64,
    pub confidence_level: f64,
    pub margin_scaling: MarginScaling,
    pub rmse: f64,
    pub mae: f64,
    pub mape: f64,
}

impl ConfidenceEstimate {
    /// Half-width of the band at a 1-based step, in scaled units
    pub fn margin(&self, step: usize) -> f64 {
        self.t_critical * self.std_err * self.margin_scaling.factor(step)
    }

    /// `(lower, upper)` around a scaled prediction
    pub fn interval(&self, step: usize, predicted_scaled: f64) -> (f64, f64) {
        let margin = self.margin(step);
        (predicted_scaled - margin, predicted_scaled + margin)
    }

    /// Bands for consecutive predictions, step 1 first
    pub fn intervals(&self, predictions: &[f64]) -> Vec<(f64, f64)> {
        predictions
            .iter()
            .enumerate()
            .map(|(i, &p)| self.interval(i + 1, p))
            .collect()
    }

    pub fn diagnostics(&self) -> ForecastDiagnostics {
        ForecastDiagnostics {
            residual_count: self.residual_count,
            std_err: self.std_err,
            std_err_is_fallback: self.std_err_is_fallback,
            degrees_of_freedom: self.degrees_of_freedom,
            t_critical: self.t_critical,
            confidence_level: self.confidence_level,
            rmse: self.rmse,
            mae: self.mae,
            mape: self.mape,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MeanPredictor {
        calls: AtomicUsize,
    }

    impl SequencePredictor for MeanPredictor {
        fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(window.iter().map(|r| r[0]).sum::<f64>() / window.len() as f64)
        }

        fn name(&self) -> &str {
            "mean"
        }
    }

    /// Looks each window up in the history it was built from and returns the
    /// exact next value, so every residual is zero.
    struct ReplayPredictor {
        history: Vec<Vec<f64>>,
    }

    impl SequencePredictor for ReplayPredictor {
        fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
            let n = window.len();
            let hit = (n..self.history.len()).find(|&i| self.history[i - n..i] == *window);
            Ok(match hit {
                Some(i) => self.history[i][0],
                None => window[n - 1][0],
            })
        }

        fn name(&self) -> &str {
            "replay"
        }
    }

    fn mean_predictor() -> MeanPredictor {
        MeanPredictor {
            calls: AtomicUsize::new(0),
        }
    }

    fn scaled(values: &[f64]) -> Vec<Vec<f64>> {
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        values.iter().map(|v| vec![(v - lo) / (hi - lo)]).collect()
    }

    fn monthly_levels() -> Vec<Vec<f64>> {
        scaled(&[10.0, 11.0, 9.0, 12.0, 13.0, 11.0, 14.0, 15.0, 13.0, 16.0, 17.0, 15.0])
    }

    #[test]
    fn test_t_critical_values() {
        assert!((t_critical(0.95, 1).unwrap() - 12.706).abs() < 1e-3);
        assert!((t_critical(0.95, 8).unwrap() - 2.306).abs() < 1e-3);
        assert!((t_critical(0.90, 30).unwrap() - 1.697).abs() < 1e-3);
    }

    #[test]
    fn test_t_critical_rejects_bad_level() {
        assert!(t_critical(1.0, 5).is_err());
        assert!(t_critical(0.0, 5).is_err());
        assert!(t_critical(f64::NAN, 5).is_err());
    }

    #[test]
    fn test_one_call_per_historical_pair() {
        let predictor = mean_predictor();
        let estimate = ResidualConfidenceEstimator::new(3)
            .estimate(&monthly_levels(), &predictor)
            .unwrap();

        assert_eq!(estimate.residual_count, 9);
        assert_eq!(predictor.calls.load(Ordering::SeqCst), 9);
        assert_eq!(estimate.degrees_of_freedom, 8);
        assert!(!estimate.std_err_is_fallback);
        assert!(estimate.std_err > 0.0);
        assert!(estimate.rmse >= estimate.mae);
    }

    #[test]
    fn test_fallback_with_single_residual() {
        let history = scaled(&[1.0, 2.0, 3.0]);
        let estimate = ResidualConfidenceEstimator::new(2)
            .estimate(&history, &mean_predictor())
            .unwrap();

        assert_eq!(estimate.residual_count, 1);
        assert!(estimate.std_err_is_fallback);
        assert_eq!(estimate.std_err, DEFAULT_STD_ERR);
        assert_eq!(estimate.degrees_of_freedom, 1);
    }

    #[test]
    fn test_fallback_without_residuals() {
        let history = scaled(&[1.0, 2.0]);
        let estimate = ResidualConfidenceEstimator::new(2)
            .with_fallback_std_err(0.1)
            .estimate(&history, &mean_predictor())
            .unwrap();

        assert_eq!(estimate.residual_count, 0);
        assert_eq!(estimate.std_err, 0.1);
        assert_eq!(estimate.rmse, 0.0);
        assert_eq!(estimate.mae, 0.0);
        assert_eq!(estimate.mape, 0.0);
    }

    #[test]
    fn test_zero_variance_residuals_collapse_interval() {
        let history = monthly_levels();
        let predictor = ReplayPredictor {
            history: history.clone(),
        };
        let estimate = ResidualConfidenceEstimator::new(3)
            .estimate(&history, &predictor)
            .unwrap();

        assert_eq!(estimate.std_err, 0.0);
        assert!(!estimate.std_err_is_fallback);
        for step in 1..=5 {
            let (lower, upper) = estimate.interval(step, 0.42);
            assert_eq!(lower, 0.42);
            assert_eq!(upper, 0.42);
        }
    }

    #[test]
    fn test_constant_margin_does_not_widen() {
        let estimate = ResidualConfidenceEstimator::new(3)
            .estimate(&monthly_levels(), &mean_predictor())
            .unwrap();

        let first = estimate.interval(1, 0.5);
        let later = estimate.interval(12, 0.5);
        assert!(((first.1 - first.0) - (later.1 - later.0)).abs() < 1e-15);
        assert!((estimate.margin(1) - estimate.t_critical * estimate.std_err).abs() < 1e-15);
    }

    #[test]
    fn test_sqrt_step_margin_widens() {
        let estimate = ResidualConfidenceEstimator::new(3)
            .with_margin_scaling(MarginScaling::SqrtStep)
            .estimate(&monthly_levels(), &mean_predictor())
            .unwrap();

        let widths: Vec<f64> = estimate
            .intervals(&[0.5, 0.5, 0.5, 0.5])
            .iter()
            .map(|(l, u)| u - l)
            .collect();
        assert!(widths.windows(2).all(|w| w[1] > w[0]));
        assert!((widths[3] / widths[0] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_interval_ordering() {
        let estimate = ResidualConfidenceEstimator::new(2)
            .estimate(&monthly_levels(), &mean_predictor())
            .unwrap();
        for (i, p) in [-0.3, 0.0, 0.5, 1.7].iter().enumerate() {
            let (lower, upper) = estimate.interval(i + 1, *p);
            assert!(lower <= *p && *p <= upper);
        }
    }

    #[test]
    fn test_diagnostics_mirror_estimate() {
        let estimate = ResidualConfidenceEstimator::new(3)
            .with_confidence_level(0.9)
            .estimate(&monthly_levels(), &mean_predictor())
            .unwrap();
        let diagnostics = estimate.diagnostics();

        assert_eq!(diagnostics.residual_count, estimate.residual_count);
        assert_eq!(diagnostics.t_critical, estimate.t_critical);
        assert_eq!(diagnostics.confidence_level, 0.9);
    }

    #[test]
    fn test_invalid_configuration() {
        let history = monthly_levels();
        assert!(ResidualConfidenceEstimator::new(0)
            .estimate(&history, &mean_predictor())
            .is_err());
        assert!(ResidualConfidenceEstimator::new(2)
            .with_confidence_level(1.5)
            .estimate(&history, &mean_predictor())
            .is_err());
        assert!(ResidualConfidenceEstimator::new(2)
            .with_fallback_std_err(-1.0)
            .estimate(&history, &mean_predictor())
            .is_err());
        assert!(matches!(
            ResidualConfidenceEstimator::new(2)
                .with_target_index(3)
                .estimate(&history, &mean_predictor()),
            Err(ForecastError::InvalidColumn(_))
        ));
    }
}
