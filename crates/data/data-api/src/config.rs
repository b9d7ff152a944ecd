//! Load configuration types.

use data_spi::{ColumnMapping, DataError, DataFormat, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How to interpret an uploaded payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Payload encoding
    pub format: DataFormat,
    /// Names of the date and level columns
    pub columns: ColumnMapping,
}

impl LoadOptions {
    /// Create load options for a format with default column names.
    pub fn new(format: DataFormat) -> Self {
        Self {
            format,
            columns: ColumnMapping::default(),
        }
    }

    /// CSV with `date` and `level` columns.
    pub fn csv() -> Self {
        Self::new(DataFormat::Csv)
    }

    /// JSON records with `date` and `level` keys.
    pub fn json() -> Self {
        Self::new(DataFormat::Json)
    }

    /// Infer the format from a file extension.
    pub fn for_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| DataError::UnsupportedFormat(path.display().to_string()))?;
        Ok(Self::new(ext.parse()?))
    }
}

/// Builder for LoadOptions.
#[derive(Debug, Default)]
pub struct LoadOptionsBuilder {
    format: Option<DataFormat>,
    date_column: Option<String>,
    level_column: Option<String>,
}

impl LoadOptionsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the payload format.
    pub fn format(mut self, format: DataFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the date column name.
    pub fn date_column(mut self, name: &str) -> Self {
        self.date_column = Some(name.to_string());
        self
    }

    /// Set the level column name.
    pub fn level_column(mut self, name: &str) -> Self {
        self.level_column = Some(name.to_string());
        self
    }

    /// Build the options.
    pub fn build(self) -> Result<LoadOptions> {
        let defaults = ColumnMapping::default();
        let date = self.date_column.unwrap_or(defaults.date);
        let level = self.level_column.unwrap_or(defaults.level);
        if date.trim().is_empty() || level.trim().is_empty() {
            return Err(DataError::ParseError(
                "column names must not be empty".to_string(),
            ));
        }
        if date.trim().eq_ignore_ascii_case(level.trim()) {
            return Err(DataError::ParseError(format!(
                "date and level columns must differ, both are '{}'",
                date
            )));
        }
        Ok(LoadOptions {
            format: self.format.unwrap_or_default(),
            columns: ColumnMapping { date, level },
        })
    }
}
