//! Data models for groundwater readings.

mod columns;
mod dataset;
mod date;
mod format;
mod record;
mod stored;

pub use columns::ColumnMapping;
pub use dataset::{Dataset, LEVEL_FEATURE};
pub use date::parse_date;
pub use format::DataFormat;
pub use record::GroundwaterRecord;
pub use stored::{DatasetId, StoredDataset, StoredForecast};
