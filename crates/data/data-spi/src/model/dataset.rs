//! Cleaned groundwater dataset.

use super::GroundwaterRecord;
use crate::error::{DataError, Result};
use chrono::NaiveDate;
use forecast_spi::ObservationSeries;
use serde::Serialize;

/// Name of the single feature in series built from a dataset
pub const LEVEL_FEATURE: &str = "level";

/// Readings sorted by date with at most one reading per date.
///
/// Never empty. Rows with a non-finite level are dropped, and when two rows
/// share a date the later one in input order wins.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<GroundwaterRecord>,
    dropped_rows: usize,
}

impl Dataset {
    /// Clean and order raw records.
    pub fn from_records(records: Vec<GroundwaterRecord>) -> Result<Self> {
        let total = records.len();
        let mut kept: Vec<GroundwaterRecord> =
            records.into_iter().filter(|r| r.level.is_finite()).collect();

        // Stable sort keeps input order within a date
        kept.sort_by_key(|r| r.date);
        let mut deduped: Vec<GroundwaterRecord> = Vec::with_capacity(kept.len());
        for record in kept {
            match deduped.last_mut() {
                Some(last) if last.date == record.date => *last = record,
                _ => deduped.push(record),
            }
        }

        if deduped.is_empty() {
            return Err(DataError::NoData);
        }

        Ok(Self {
            dropped_rows: total - deduped.len(),
            records: deduped,
        })
    }

    /// Add rows that were discarded before reaching `from_records`.
    pub fn with_dropped_rows(mut self, dropped: usize) -> Self {
        self.dropped_rows += dropped;
        self
    }

    pub fn records(&self) -> &[GroundwaterRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Input rows that did not make it into the dataset
    pub fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    pub fn levels(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.level).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.records.iter().map(|r| r.date).collect()
    }

    /// One-feature series named [`LEVEL_FEATURE`].
    pub fn to_series(&self) -> forecast_spi::Result<ObservationSeries> {
        ObservationSeries::univariate(LEVEL_FEATURE, self.records.iter().map(|r| (r.date, r.level)))
    }
}
