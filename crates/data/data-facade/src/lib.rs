//! Data Ingest Facade
//!
//! Unified re-exports for the data module.
//!
//! This facade provides a single entry point for all dataset functionality:
//! - `data_spi` - Models, the loader contract and errors
//! - `data_api` - Load options, builders and loading entry points
//! - `data_core` - CSV and JSON loaders and the dataset store
//!
//! # Example
//!
//! ```rust,ignore
//! use data_facade::{load_bytes, DatasetStore, LoadOptions};
//!
//! let dataset = load_bytes(b"date,level\n2024-01-01,12.3\n", &LoadOptions::csv())?;
//! let store = DatasetStore::new();
//! let id = store.insert(dataset);
//! println!("stored {}", id);
//! ```

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
