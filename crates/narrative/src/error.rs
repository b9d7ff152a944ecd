//! Narrative error types.

use thiserror::Error;

/// Errors from report generation and chat.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NarrativeError {
    /// No API key configured for the provider
    #[error("LLM API key is not configured")]
    MissingApiKey,

    /// Transport failure talking to the provider
    #[error("LLM request failed: {0}")]
    Request(String),

    /// Provider answered with a non-success status
    #[error("LLM API error [{status}]: {body}")]
    Api { status: u16, body: String },

    /// Provider answered without any text
    #[error("LLM response contained no text")]
    EmptyResponse,

    /// Generated report lacks an expected section
    #[error("Malformed report: missing section '{0}'")]
    MalformedReport(String),

    /// Caller-supplied chat or report input is unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl NarrativeError {
    /// True when the caller can fix the problem by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, NarrativeError::InvalidInput(_))
    }
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Request(err.to_string())
    }
}

/// Result type for narrative operations.
pub type Result<T> = std::result::Result<T, NarrativeError>;
