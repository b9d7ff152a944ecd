//! Column naming for tabular uploads.

use serde::{Deserialize, Serialize};

/// Names of the date and level columns in an upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub date: String,
    pub level: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date: "date".to_string(),
            level: "level".to_string(),
        }
    }
}

impl ColumnMapping {
    pub fn new(date: &str, level: &str) -> Self {
        Self {
            date: date.to_string(),
            level: level.to_string(),
        }
    }

    /// Position of `wanted` among `headers`, ignoring case and surrounding space
    pub fn find(headers: &[&str], wanted: &str) -> Option<usize> {
        let wanted = wanted.trim();
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }
}
