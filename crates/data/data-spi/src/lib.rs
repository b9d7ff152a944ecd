//! Data Ingest Service Provider Interface
//!
//! Defines the loader contract, dataset models and errors for uploaded
//! groundwater readings.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::DatasetLoader;
pub use error::{DataError, Result};
pub use model::{
    parse_date, ColumnMapping, DataFormat, Dataset, DatasetId, GroundwaterRecord, StoredDataset,
    StoredForecast, LEVEL_FEATURE,
};
