//! Error types for data ingest.

mod data_error;

pub use data_error::{DataError, Result};
