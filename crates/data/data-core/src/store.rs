//! In-memory dataset store
//!
//! Holds every uploaded dataset under its [`DatasetId`] together with the
//! last forecast computed for it. Readers never block each other; a
//! forecast write only locks for the swap.

use chrono::Utc;
use data_spi::{DataError, Dataset, DatasetId, Result, StoredDataset, StoredForecast};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe registry of uploads
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: RwLock<HashMap<DatasetId, StoredDataset>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a dataset under a fresh id.
    pub fn insert(&self, dataset: Dataset) -> DatasetId {
        let id = DatasetId::new();
        let stored = StoredDataset {
            id,
            dataset,
            uploaded_at: Utc::now(),
            last_forecast: None,
        };
        self.datasets.write().insert(id, stored);
        id
    }

    pub fn get(&self, id: &DatasetId) -> Result<StoredDataset> {
        self.datasets
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| DataError::NotFound(id.to_string()))
    }

    pub fn dataset(&self, id: &DatasetId) -> Result<Dataset> {
        self.datasets
            .read()
            .get(id)
            .map(|stored| stored.dataset.clone())
            .ok_or_else(|| DataError::NotFound(id.to_string()))
    }

    /// Replace the dataset's last forecast.
    pub fn record_forecast(&self, id: &DatasetId, forecast: StoredForecast) -> Result<()> {
        let mut datasets = self.datasets.write();
        let stored = datasets
            .get_mut(id)
            .ok_or_else(|| DataError::NotFound(id.to_string()))?;
        stored.last_forecast = Some(forecast);
        Ok(())
    }

    pub fn last_forecast(&self, id: &DatasetId) -> Result<Option<StoredForecast>> {
        self.datasets
            .read()
            .get(id)
            .map(|stored| stored.last_forecast.clone())
            .ok_or_else(|| DataError::NotFound(id.to_string()))
    }

    pub fn remove(&self, id: &DatasetId) -> Option<StoredDataset> {
        self.datasets.write().remove(id)
    }

    pub fn len(&self) -> usize {
        self.datasets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.read().is_empty()
    }

    pub fn ids(&self) -> Vec<DatasetId> {
        self.datasets.read().keys().copied().collect()
    }
}
