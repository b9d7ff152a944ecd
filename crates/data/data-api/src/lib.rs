//! Data Ingest Consumer API
//!
//! Load options, builders and the `load_bytes` / `load_path` entry points.

pub mod config;
pub mod loader;

pub use config::{LoadOptions, LoadOptionsBuilder};
pub use loader::{load_bytes, load_path};
