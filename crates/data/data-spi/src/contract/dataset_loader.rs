//! Dataset loader trait definition.

use crate::error::Result;
use crate::model::{ColumnMapping, DataFormat, Dataset};

/// Trait for parsers that turn an uploaded payload into a [`Dataset`].
///
/// Rows whose date or level cannot be parsed are dropped and counted;
/// a missing date or level column fails the whole load.
pub trait DatasetLoader: Send + Sync {
    /// Loader name.
    fn name(&self) -> &str;

    /// Format this loader reads.
    fn format(&self) -> DataFormat;

    /// Parse a complete payload.
    fn load(&self, payload: &[u8], columns: &ColumnMapping) -> Result<Dataset>;
}
