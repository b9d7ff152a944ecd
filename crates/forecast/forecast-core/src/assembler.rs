//! Maps scaled predictions back to dated forecast points

use crate::scaler::FeatureScaler;
use chrono::{Duration, NaiveDate};
use forecast_spi::{ForecastError, ForecastPoint, Result};

/// Spacing between forecast dates when none is configured.
///
/// A fixed 30-day step approximating monthly readings; calendar months of
/// other lengths drift against it.
pub const DEFAULT_CADENCE_DAYS: u32 = 30;

/// Inverts scaling and attaches dates to forecast steps
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastResultAssembler {
    target_index: usize,
    cadence_days: u32,
}

impl Default for ForecastResultAssembler {
    fn default() -> Self {
        Self::new(0, DEFAULT_CADENCE_DAYS)
    }
}

impl ForecastResultAssembler {
    pub fn new(target_index: usize, cadence_days: u32) -> Self {
        Self {
            target_index,
            cadence_days,
        }
    }

    /// Build one [`ForecastPoint`] per scaled prediction.
    ///
    /// `intervals`, when given, must hold one scaled `(lower, upper)` pair
    /// per prediction. Step `k` is dated `last_known_date + k * cadence_days`.
    pub fn assemble(
        &self,
        scaled_predictions: &[f64],
        intervals: Option<&[(f64, f64)]>,
        scaler: &FeatureScaler,
        last_known_date: NaiveDate,
    ) -> Result<Vec<ForecastPoint>> {
        if self.cadence_days == 0 {
            return Err(ForecastError::invalid_parameter(
                "cadence_days",
                "must be positive",
            ));
        }
        if let Some(bands) = intervals {
            if bands.len() != scaled_predictions.len() {
                return Err(ForecastError::invalid_parameter(
                    "intervals",
                    format!(
                        "got {} intervals for {} predictions",
                        bands.len(),
                        scaled_predictions.len()
                    ),
                ));
            }
        }

        scaled_predictions
            .iter()
            .enumerate()
            .map(|(i, &scaled)| {
                let step = i + 1;
                let value = scaler.inverse_target(scaled, self.target_index)?;
                let (lower, upper) = match intervals {
                    Some(bands) => {
                        let (lo, hi) = bands[i];
                        (
                            Some(scaler.inverse_target(lo, self.target_index)?),
                            Some(scaler.inverse_target(hi, self.target_index)?),
                        )
                    }
                    None => (None, None),
                };
                Ok(ForecastPoint {
                    step,
                    date: self.date_for_step(last_known_date, step)?,
                    value,
                    lower,
                    upper,
                })
            })
            .collect()
    }

    /// Date of forecast `step`, failing when it is not representable
    pub fn date_for_step(&self, last_known_date: NaiveDate, step: usize) -> Result<NaiveDate> {
        i64::try_from(step)
            .ok()
            .and_then(|s| s.checked_mul(self.cadence_days as i64))
            .and_then(Duration::try_days)
            .and_then(|d| last_known_date.checked_add_signed(d))
            .ok_or_else(|| {
                ForecastError::invalid_parameter(
                    "horizon",
                    format!("step {} lands outside the supported date range", step),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scaler() -> FeatureScaler {
        FeatureScaler::fit(&[vec![10.0, 0.0], vec![20.0, 4.0]]).unwrap()
    }

    fn last_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_values_in_original_units() {
        let points = ForecastResultAssembler::default()
            .assemble(&[0.0, 0.5, 1.2], None, &scaler(), last_date())
            .unwrap();

        let values: Vec<f64> = points.iter().map(|p| p.value).collect();
        assert!((values[0] - 10.0).abs() < 1e-12);
        assert!((values[1] - 15.0).abs() < 1e-12);
        assert!((values[2] - 22.0).abs() < 1e-12);
        assert!(points.iter().all(|p| p.interval().is_none()));
    }

    #[test]
    fn test_dates_use_fixed_cadence() {
        let points = ForecastResultAssembler::default()
            .assemble(&[0.1, 0.2, 0.3], None, &scaler(), last_date())
            .unwrap();

        assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());
        assert_eq!(points[2].date, NaiveDate::from_ymd_opt(2024, 4, 30).unwrap());
        assert_eq!(
            points.iter().map(|p| p.step).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_custom_cadence() {
        let points = ForecastResultAssembler::new(0, 7)
            .assemble(&[0.1, 0.2], None, &scaler(), last_date())
            .unwrap();
        assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2024, 2, 14).unwrap());
    }

    #[test]
    fn test_intervals_inverted_with_target_column() {
        let points = ForecastResultAssembler::new(1, 30)
            .assemble(&[0.5], Some(&[(0.25, 0.75)]), &scaler(), last_date())
            .unwrap();

        assert!((points[0].value - 2.0).abs() < 1e-12);
        assert_eq!(points[0].lower, Some(1.0));
        assert_eq!(points[0].upper, Some(3.0));
    }

    #[test]
    fn test_interval_length_mismatch() {
        let err = ForecastResultAssembler::default()
            .assemble(&[0.5, 0.6], Some(&[(0.4, 0.6)]), &scaler(), last_date())
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_date_for_step_bounds() {
        let assembler = ForecastResultAssembler::new(0, 30);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            assembler.date_for_step(start, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
        );

        let near_end = NaiveDate::MAX - Duration::days(45);
        assert!(assembler.date_for_step(near_end, 1).is_ok());
        assert!(assembler.date_for_step(near_end, 2).is_err());
        assert!(assembler.date_for_step(start, usize::MAX).is_err());
    }

    #[test]
    fn test_zero_cadence_rejected() {
        assert!(ForecastResultAssembler::new(0, 0)
            .assemble(&[0.5], None, &scaler(), last_date())
            .is_err());
    }

    #[test]
    fn test_empty_predictions() {
        let points = ForecastResultAssembler::default()
            .assemble(&[], None, &scaler(), last_date())
            .unwrap();
        assert!(points.is_empty());
    }
}
