//! Data Ingest Core
//!
//! Loader implementations and the dataset store.

pub mod csv_loader;
pub mod json_loader;
pub mod store;

pub use csv_loader::CsvLoader;
pub use json_loader::JsonLoader;
pub use store::DatasetStore;

use data_spi::{DataFormat, DatasetLoader};

/// Loader for a payload format.
pub fn loader_for(format: DataFormat) -> Box<dyn DatasetLoader> {
    match format {
        DataFormat::Csv => Box::new(CsvLoader::new()),
        DataFormat::Json => Box::new(JsonLoader::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_for_matches_format() {
        for format in [DataFormat::Csv, DataFormat::Json] {
            let loader = loader_for(format);
            assert_eq!(loader.format(), format);
            assert_eq!(loader.name(), format.as_str());
        }
    }
}
