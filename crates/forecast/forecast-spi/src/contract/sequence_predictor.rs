//! Sequence predictor trait

use crate::error::Result;
use std::sync::Arc;

/// One-step-ahead sequence model.
///
/// Receives a window of `time_steps` scaled rows (oldest first), each with
/// `feature_count` columns, and returns the next value of the target feature
/// in scaled units. Implementations are invoked concurrently from multiple
/// requests and must not mutate internal state while predicting.
pub trait SequencePredictor: Send + Sync {
    /// Predict the next scaled target value for the given window
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64>;

    /// Window length the model was trained on, if it is fixed
    fn expected_time_steps(&self) -> Option<usize> {
        None
    }

    /// Number of columns each window row must have, if it is fixed
    fn expected_feature_count(&self) -> Option<usize> {
        None
    }

    /// Name of this predictor
    fn name(&self) -> &str;
}

impl<P: SequencePredictor + ?Sized> SequencePredictor for &P {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        (**self).predict(window)
    }

    fn expected_time_steps(&self) -> Option<usize> {
        (**self).expected_time_steps()
    }

    fn expected_feature_count(&self) -> Option<usize> {
        (**self).expected_feature_count()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: SequencePredictor + ?Sized> SequencePredictor for Box<P> {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        (**self).predict(window)
    }

    fn expected_time_steps(&self) -> Option<usize> {
        (**self).expected_time_steps()
    }

    fn expected_feature_count(&self) -> Option<usize> {
        (**self).expected_feature_count()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<P: SequencePredictor + ?Sized> SequencePredictor for Arc<P> {
    fn predict(&self, window: &[Vec<f64>]) -> Result<f64> {
        (**self).predict(window)
    }

    fn expected_time_steps(&self) -> Option<usize> {
        (**self).expected_time_steps()
    }

    fn expected_feature_count(&self) -> Option<usize> {
        (**self).expected_feature_count()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
