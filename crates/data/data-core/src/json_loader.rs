//! JSON dataset loader
//!
//! Accepts an array of objects, one per reading. Keys are matched without
//! regard to case; levels may be numbers or numeric strings.

use crate::csv_loader::parse_level;
use data_spi::{
    parse_date, ColumnMapping, DataError, DataFormat, Dataset, DatasetLoader, GroundwaterRecord,
    Result,
};
use serde_json::{Map, Value};

/// Loader for JSON record arrays
#[derive(Debug, Clone, Default)]
pub struct JsonLoader;

impl JsonLoader {
    pub fn new() -> Self {
        Self
    }
}

fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object
        .iter()
        .find(|(key, _)| key.trim().eq_ignore_ascii_case(name.trim()))
        .map(|(_, value)| value)
}

impl DatasetLoader for JsonLoader {
    fn name(&self) -> &str {
        "json"
    }

    fn format(&self) -> DataFormat {
        DataFormat::Json
    }

    fn load(&self, payload: &[u8], columns: &ColumnMapping) -> Result<Dataset> {
        let value: Value =
            serde_json::from_slice(payload).map_err(|e| DataError::ParseError(e.to_string()))?;
        let rows = value.as_array().ok_or_else(|| {
            DataError::ParseError("expected a JSON array of records".to_string())
        })?;
        if rows.is_empty() {
            return Err(DataError::NoData);
        }

        let mut seen_date = false;
        let mut seen_level = false;
        let mut records = Vec::new();
        let mut dropped = 0;

        for row in rows {
            let Some(object) = row.as_object() else {
                dropped += 1;
                continue;
            };
            let date_value = field(object, &columns.date);
            let level_value = field(object, &columns.level);
            seen_date |= date_value.is_some();
            seen_level |= level_value.is_some();

            let date = date_value
                .and_then(Value::as_str)
                .and_then(|raw| parse_date(raw).ok());
            let level = level_value.and_then(|v| match v {
                Value::Number(n) => n.as_f64().filter(|x| x.is_finite()),
                Value::String(s) => parse_level(s),
                _ => None,
            });

            match (date, level) {
                (Some(date), Some(level)) => records.push(GroundwaterRecord::new(date, level)),
                _ => dropped += 1,
            }
        }

        if !seen_date {
            return Err(DataError::MissingColumn(columns.date.clone()));
        }
        if !seen_level {
            return Err(DataError::MissingColumn(columns.level.clone()));
        }

        Ok(Dataset::from_records(records)?.with_dropped_rows(dropped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(payload: &str) -> Result<Dataset> {
        JsonLoader::new().load(payload.as_bytes(), &ColumnMapping::default())
    }

    #[test]
    fn test_records_array() {
        let dataset = load(
            r#"[{"date": "2024-02-01", "level": 9.5},
                {"Date": "2024-01-01T00:00:00", "LEVEL": "10.0"}]"#,
        )
        .unwrap();
        assert_eq!(dataset.levels(), vec![10.0, 9.5]);
    }

    #[test]
    fn test_bad_rows_dropped() {
        let dataset = load(
            r#"[{"date": "2024-01-01", "level": 1.0},
                {"date": "2024-01-02", "level": null},
                {"date": 20240103, "level": 3.0},
                "junk"]"#,
        )
        .unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.dropped_rows(), 3);
    }

    #[test]
    fn test_missing_column() {
        assert_eq!(
            load(r#"[{"date": "2024-01-01", "depth": 1.0}]"#).unwrap_err(),
            DataError::MissingColumn("level".to_string())
        );
    }

    #[test]
    fn test_not_an_array() {
        assert!(matches!(
            load(r#"{"date": "2024-01-01"}"#),
            Err(DataError::ParseError(_))
        ));
        assert!(matches!(load("{"), Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_empty_array() {
        assert_eq!(load("[]").unwrap_err(), DataError::NoData);
    }
}
