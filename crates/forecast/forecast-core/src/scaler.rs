//! Per-column min-max scaling
//!
//! Maps each feature column to `(x - min) / (max - min)` using bounds learned
//! once from a fit matrix. Values outside the fit range are not clamped, so
//! the transform stays an exact algebraic inverse pair.

use forecast_spi::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Reversible per-column linear scaler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl FeatureScaler {
    /// Learn per-column bounds from a row-major matrix.
    ///
    /// A column whose max equals its min cannot be scaled and is rejected
    /// with [`ForecastError::DegenerateFeature`] rather than mapped to a
    /// constant.
    pub fn fit(matrix: &[Vec<f64>]) -> Result<Self> {
        let first = matrix.first().ok_or(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        })?;
        let width = first.len();
        if width == 0 {
            return Err(ForecastError::invalid_parameter(
                "matrix",
                "rows must have at least one column",
            ));
        }

        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];

        for (i, row) in matrix.iter().enumerate() {
            if row.len() != width {
                return Err(ForecastError::invalid_parameter(
                    "matrix",
                    format!("row {} has {} columns, expected {}", i, row.len(), width),
                ));
            }
            for (c, &x) in row.iter().enumerate() {
                if !x.is_finite() {
                    return Err(ForecastError::invalid_parameter(
                        "matrix",
                        format!("non-finite value {} at row {}, column {}", x, i, c),
                    ));
                }
                min[c] = min[c].min(x);
                max[c] = max[c].max(x);
            }
        }

        if let Some(column) = (0..width).find(|&c| max[c] == min[c]) {
            return Err(ForecastError::DegenerateFeature { column });
        }

        Ok(Self { min, max })
    }

    /// Number of columns the scaler was fit on
    pub fn feature_count(&self) -> usize {
        self.min.len()
    }

    /// Per-column minimum
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Per-column maximum
    pub fn max(&self) -> &[f64] {
        &self.max
    }

    /// Scale a single row
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_width(row)?;
        Ok(row
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&x, (&lo, &hi))| (x - lo) / (hi - lo))
            .collect())
    }

    /// Scale every row of a matrix
    pub fn transform(&self, matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        matrix.iter().map(|row| self.transform_row(row)).collect()
    }

    /// Undo [`transform_row`](Self::transform_row)
    pub fn inverse_transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        self.check_width(row)?;
        Ok(row
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&x, (&lo, &hi))| x * (hi - lo) + lo)
            .collect())
    }

    /// Undo [`transform`](Self::transform)
    pub fn inverse_transform(&self, matrix: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        matrix
            .iter()
            .map(|row| self.inverse_transform_row(row))
            .collect()
    }

    /// Invert a single scaled target value.
    ///
    /// The value is placed at `target` inside a zero-filled row of full
    /// width, which is how the scaler was fit, and read back after inversion.
    pub fn inverse_target(&self, value: f64, target: usize) -> Result<f64> {
        if target >= self.feature_count() {
            return Err(ForecastError::InvalidColumn(format!(
                "target index {} out of range for {} columns",
                target,
                self.feature_count()
            )));
        }
        let mut row = vec![0.0; self.feature_count()];
        row[target] = value;
        Ok(self.inverse_transform_row(&row)?[target])
    }

    fn check_width(&self, row: &[f64]) -> Result<()> {
        if row.len() != self.feature_count() {
            return Err(ForecastError::invalid_parameter(
                "row",
                format!(
                    "has {} columns, scaler was fit on {}",
                    row.len(),
                    self.feature_count()
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels() -> Vec<Vec<f64>> {
        vec![vec![10.0], vec![11.0], vec![9.0], vec![12.0], vec![15.0]]
    }

    #[test]
    fn test_fit_bounds() {
        let scaler = FeatureScaler::fit(&levels()).unwrap();
        assert_eq!(scaler.min(), &[9.0]);
        assert_eq!(scaler.max(), &[15.0]);
        assert_eq!(scaler.feature_count(), 1);
    }

    #[test]
    fn test_transform_unit_range() {
        let data = levels();
        let scaler = FeatureScaler::fit(&data).unwrap();
        let scaled = scaler.transform(&data).unwrap();

        assert_eq!(scaled[2], vec![0.0]);
        assert_eq!(scaled[4], vec![1.0]);
        for row in &scaled {
            assert!(row[0] >= 0.0 && row[0] <= 1.0);
        }
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        let scaler = FeatureScaler::fit(&levels()).unwrap();
        let high = scaler.transform_row(&[21.0]).unwrap();
        let low = scaler.transform_row(&[3.0]).unwrap();
        assert!((high[0] - 2.0).abs() < 1e-12);
        assert!((low[0] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_round_trip_within_and_outside_range() {
        let matrix = vec![
            vec![10.0, -3.5, 1000.0],
            vec![12.5, 4.0, 1250.0],
            vec![7.25, 0.0, 990.0],
        ];
        let scaler = FeatureScaler::fit(&matrix).unwrap();

        let probes = vec![
            vec![10.0, -3.5, 1000.0],
            vec![8.0, 2.0, 1100.0],
            vec![-50.0, 99.0, 1e6],
            vec![1e-9, -1e-9, 0.0],
        ];
        for row in probes {
            let back = scaler
                .inverse_transform_row(&scaler.transform_row(&row).unwrap())
                .unwrap();
            for (a, b) in row.iter().zip(&back) {
                assert!((a - b).abs() <= 1e-9 * a.abs().max(1.0), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_degenerate_column_rejected() {
        let matrix = vec![vec![1.0, 5.0], vec![2.0, 5.0], vec![3.0, 5.0]];
        let err = FeatureScaler::fit(&matrix).unwrap_err();
        assert_eq!(err, ForecastError::DegenerateFeature { column: 1 });
    }

    #[test]
    fn test_single_row_is_degenerate() {
        let err = FeatureScaler::fit(&[vec![4.0]]).unwrap_err();
        assert_eq!(err, ForecastError::DegenerateFeature { column: 0 });
    }

    #[test]
    fn test_empty_matrix() {
        let err = FeatureScaler::fit(&[]).unwrap_err();
        assert!(matches!(err, ForecastError::InsufficientData { .. }));
    }

    #[test]
    fn test_ragged_matrix() {
        let err = FeatureScaler::fit(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = FeatureScaler::fit(&[vec![1.0], vec![f64::NAN]]).unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_width_mismatch_on_transform() {
        let scaler = FeatureScaler::fit(&levels()).unwrap();
        assert!(scaler.transform_row(&[1.0, 2.0]).is_err());
        assert!(scaler.inverse_transform_row(&[]).is_err());
    }

    #[test]
    fn test_inverse_target_uses_target_column() {
        let matrix = vec![vec![0.0, 100.0], vec![10.0, 200.0]];
        let scaler = FeatureScaler::fit(&matrix).unwrap();

        assert!((scaler.inverse_target(0.5, 1).unwrap() - 150.0).abs() < 1e-12);
        assert!((scaler.inverse_target(0.5, 0).unwrap() - 5.0).abs() < 1e-12);
        assert!(matches!(
            scaler.inverse_target(0.5, 2),
            Err(ForecastError::InvalidColumn(_))
        ));
    }
}
