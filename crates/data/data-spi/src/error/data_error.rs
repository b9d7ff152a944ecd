//! Data error types.

use thiserror::Error;

/// Dataset ingest and storage errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Reading the source failed
    #[error("I/O error: {0}")]
    Io(String),

    /// Failed to parse the payload
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid date format
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A required column is absent
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// No usable rows remained after cleaning
    #[error("No data returned")]
    NoData,

    /// Unknown dataset handle
    #[error("Dataset not found: {0}")]
    NotFound(String),

    /// Payload format not supported
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl DataError {
    /// True when the caller supplied bad input, as opposed to an I/O fault
    pub fn is_client_error(&self) -> bool {
        !matches!(self, DataError::Io(_))
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        DataError::Io(err.to_string())
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
