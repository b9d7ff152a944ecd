//! Fixed-length sliding window of scaled rows

use forecast_spi::{ForecastError, Result};

/// Sliding window holding the `time_steps` most recent rows, oldest first.
///
/// Rows are kept contiguous so the window can be handed to a
/// [`SequencePredictor`](forecast_spi::SequencePredictor) without copying.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowBuffer {
    rows: Vec<Vec<f64>>,
    feature_count: usize,
}

impl WindowBuffer {
    /// Create a window from explicit rows
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let feature_count = rows
            .first()
            .map(|r| r.len())
            .ok_or_else(|| ForecastError::invalid_parameter("time_steps", "must be positive"))?;
        if feature_count == 0 {
            return Err(ForecastError::invalid_parameter(
                "window",
                "rows must have at least one column",
            ));
        }
        if let Some(i) = rows.iter().position(|r| r.len() != feature_count) {
            return Err(ForecastError::invalid_parameter(
                "window",
                format!(
                    "row {} has {} columns, expected {}",
                    i,
                    rows[i].len(),
                    feature_count
                ),
            ));
        }
        Ok(Self {
            rows,
            feature_count,
        })
    }

    /// Initial window: the last `time_steps` rows of the history
    pub fn from_history(history: &[Vec<f64>], time_steps: usize) -> Result<Self> {
        if time_steps == 0 {
            return Err(ForecastError::invalid_parameter(
                "time_steps",
                "must be positive",
            ));
        }
        if history.len() < time_steps {
            return Err(ForecastError::InsufficientData {
                required: time_steps,
                actual: history.len(),
            });
        }
        Self::new(history[history.len() - time_steps..].to_vec())
    }

    /// Number of rows held (the window length)
    pub fn time_steps(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns per row
    pub fn feature_count(&self) -> usize {
        self.feature_count
    }

    /// Rows, oldest first
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Most recent row
    pub fn last_row(&self) -> &[f64] {
        // Construction guarantees at least one row.
        &self.rows[self.rows.len() - 1]
    }

    /// Drop the oldest row and append `new_row` at the end
    pub fn shift(&mut self, new_row: Vec<f64>) -> Result<()> {
        if new_row.len() != self.feature_count {
            return Err(ForecastError::invalid_parameter(
                "new_row",
                format!(
                    "has {} columns, window holds {}",
                    new_row.len(),
                    self.feature_count
                ),
            ));
        }
        self.rows.rotate_left(1);
        let last = self.rows.len() - 1;
        self.rows[last] = new_row;
        Ok(())
    }

    /// Non-mutating form of [`shift`](Self::shift)
    pub fn shifted(&self, new_row: Vec<f64>) -> Result<Self> {
        let mut next = self.clone();
        next.shift(new_row)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> Vec<Vec<f64>> {
        (0..6).map(|i| vec![i as f64, 10.0 + i as f64]).collect()
    }

    #[test]
    fn test_from_history_takes_tail() {
        let window = WindowBuffer::from_history(&history(), 3).unwrap();
        assert_eq!(window.time_steps(), 3);
        assert_eq!(window.feature_count(), 2);
        assert_eq!(
            window.rows(),
            &[vec![3.0, 13.0], vec![4.0, 14.0], vec![5.0, 15.0]]
        );
        assert_eq!(window.last_row(), &[5.0, 15.0]);
    }

    #[test]
    fn test_from_history_exact_length() {
        let window = WindowBuffer::from_history(&history(), 6).unwrap();
        assert_eq!(window.rows(), history().as_slice());
    }

    #[test]
    fn test_insufficient_history() {
        let err = WindowBuffer::from_history(&history(), 7).unwrap_err();
        assert_eq!(
            err,
            ForecastError::InsufficientData {
                required: 7,
                actual: 6
            }
        );
    }

    #[test]
    fn test_zero_time_steps() {
        let err = WindowBuffer::from_history(&history(), 0).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_shift_invariant() {
        let mut window = WindowBuffer::from_history(&history(), 4).unwrap();
        let before = window.rows().to_vec();

        window.shift(vec![-1.0, -2.0]).unwrap();

        assert_eq!(window.time_steps(), 4);
        assert_eq!(window.last_row(), &[-1.0, -2.0]);
        assert!(!window.rows().contains(&before[0]));
        assert_eq!(&window.rows()[..3], &before[1..]);
    }

    #[test]
    fn test_repeated_shift_keeps_length() {
        let mut window = WindowBuffer::from_history(&history(), 2).unwrap();
        for i in 0..10 {
            window.shift(vec![i as f64, 0.0]).unwrap();
            assert_eq!(window.time_steps(), 2);
        }
        assert_eq!(window.rows(), &[vec![8.0, 0.0], vec![9.0, 0.0]]);
    }

    #[test]
    fn test_single_row_window() {
        let mut window = WindowBuffer::from_history(&history(), 1).unwrap();
        window.shift(vec![7.0, 7.0]).unwrap();
        assert_eq!(window.rows(), &[vec![7.0, 7.0]]);
    }

    #[test]
    fn test_shifted_leaves_original() {
        let window = WindowBuffer::from_history(&history(), 2).unwrap();
        let next = window.shifted(vec![0.5, 0.5]).unwrap();
        assert_eq!(window.last_row(), &[5.0, 15.0]);
        assert_eq!(next.rows(), &[vec![5.0, 15.0], vec![0.5, 0.5]]);
    }

    #[test]
    fn test_shift_rejects_wrong_width() {
        let mut window = WindowBuffer::from_history(&history(), 2).unwrap();
        assert!(window.shift(vec![1.0]).is_err());
        assert_eq!(window.last_row(), &[5.0, 15.0]);
    }

    #[test]
    fn test_new_rejects_ragged_rows() {
        assert!(WindowBuffer::new(vec![vec![1.0, 2.0], vec![1.0]]).is_err());
        assert!(WindowBuffer::new(vec![]).is_err());
    }
}
