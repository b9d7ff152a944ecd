//! Dataset loading entry points.

use crate::config::LoadOptions;
use data_core::loader_for;
use data_spi::{Dataset, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Parse an in-memory payload.
pub fn load_bytes(payload: &[u8], options: &LoadOptions) -> Result<Dataset> {
    let loader = loader_for(options.format);
    debug!(
        loader = loader.name(),
        bytes = payload.len(),
        date_column = %options.columns.date,
        level_column = %options.columns.level,
        "Loading dataset"
    );

    let dataset = loader.load(payload, &options.columns)?;
    if dataset.dropped_rows() > 0 {
        warn!(
            dropped = dataset.dropped_rows(),
            kept = dataset.len(),
            "Discarded unusable rows"
        );
    }
    info!(
        records = dataset.len(),
        start = %dataset.first_date(),
        end = %dataset.last_date(),
        "Dataset loaded"
    );
    Ok(dataset)
}

/// Read and parse a file, inferring the format from its extension
/// unless `options` is given.
pub fn load_path(path: &Path, options: Option<&LoadOptions>) -> Result<Dataset> {
    let inferred;
    let options = match options {
        Some(options) => options,
        None => {
            inferred = LoadOptions::for_path(path)?;
            &inferred
        }
    };
    let payload = std::fs::read(path)?;
    load_bytes(&payload, options)
}
