//! Autoregressive multi-step forecasting
//!
//! Extends a one-step [`SequencePredictor`] to an arbitrary horizon by
//! feeding each prediction back into the window as the newest row. Errors
//! compound across steps because every later input contains earlier
//! predictions.

use crate::window::WindowBuffer;
use forecast_spi::{FillPolicy, ForecastError, Result, SequencePredictor};

/// Repeated single-step prediction with reinjection
#[derive(Debug, Clone, PartialEq)]
pub struct AutoregressiveForecaster {
    time_steps: usize,
    horizon: usize,
    target_index: usize,
    fill_policy: FillPolicy,
}

impl AutoregressiveForecaster {
    /// Forecaster for the first column with the default fill policy
    pub fn new(time_steps: usize, horizon: usize) -> Self {
        Self {
            time_steps,
            horizon,
            target_index: 0,
            fill_policy: FillPolicy::default(),
        }
    }

    /// Column the predictor emits
    pub fn with_target_index(mut self, target_index: usize) -> Self {
        self.target_index = target_index;
        self
    }

    /// Policy for the non-target columns of synthesized rows
    pub fn with_fill_policy(mut self, fill_policy: FillPolicy) -> Self {
        self.fill_policy = fill_policy;
        self
    }

    /// Rows per input window
    pub fn time_steps(&self) -> usize {
        self.time_steps
    }

    /// Number of steps produced by [`run`](Self::run)
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Column the predictor emits
    pub fn target_index(&self) -> usize {
        self.target_index
    }

    /// Policy for the non-target columns of synthesized rows
    pub fn fill_policy(&self) -> FillPolicy {
        self.fill_policy
    }

    /// Produce `horizon` scaled predictions, step 1 first.
    ///
    /// Nothing is returned unless every step succeeds: a short history or a
    /// failing predictor call aborts the whole run.
    pub fn run<P>(&self, scaled_history: &[Vec<f64>], predictor: &P) -> Result<Vec<f64>>
    where
        P: SequencePredictor + ?Sized,
    {
        if self.horizon == 0 {
            return Err(ForecastError::invalid_parameter("horizon", "must be positive"));
        }

        let mut window = WindowBuffer::from_history(scaled_history, self.time_steps)?;
        if self.target_index >= window.feature_count() {
            return Err(ForecastError::InvalidColumn(format!(
                "target index {} out of range for {} columns",
                self.target_index,
                window.feature_count()
            )));
        }

        let mut predictions = Vec::new();
        for step in 1..=self.horizon {
            let prediction = predictor.predict(window.rows())?;
            if !prediction.is_finite() {
                return Err(ForecastError::Prediction(format!(
                    "{} returned {} at step {}",
                    predictor.name(),
                    prediction,
                    step
                )));
            }
            predictions.push(prediction);

            let next_row = self.next_row(window.last_row(), prediction);
            window.shift(next_row)?;
        }

        Ok(predictions)
    }

    fn next_row(&self, last_row: &[f64], prediction: f64) -> Vec<f64> {
        let mut row = match self.fill_policy {
            FillPolicy::CarryForward => last_row.to_vec(),
            FillPolicy::Zero => vec![0.0; last_row.len()],
        };
        row[self.target_index] = prediction;
        row
    }
}
