//! Upload payload formats.

use crate::error::DataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Encoding of an uploaded dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// JSON array of record objects
    Json,
}

impl DataFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataFormat::Csv => "csv",
            DataFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        ext.parse().ok()
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(DataFormat::Csv),
            "json" => Ok(DataFormat::Json),
            other => Err(DataError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("csv".parse::<DataFormat>().unwrap(), DataFormat::Csv);
        assert_eq!("JSON".parse::<DataFormat>().unwrap(), DataFormat::Json);
        assert!(matches!(
            "xlsx".parse::<DataFormat>(),
            Err(DataError::UnsupportedFormat(ref f)) if f == "xlsx"
        ));
    }

    #[test]
    fn test_from_extension() {
        assert_eq!(DataFormat::from_extension("csv"), Some(DataFormat::Csv));
        assert_eq!(DataFormat::from_extension("txt"), None);
    }

    #[test]
    fn test_display_roundtrips() {
        for format in [DataFormat::Csv, DataFormat::Json] {
            assert_eq!(format.to_string().parse::<DataFormat>().unwrap(), format);
        }
    }
}
