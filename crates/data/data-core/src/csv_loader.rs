//! CSV dataset loader
//!
//! Reads a header row, locates the date and level columns by name and parses
//! every following row. Rows with an unparseable date or level are counted
//! and skipped, as are rows too short to reach either column.

use data_spi::{
    parse_date, ColumnMapping, DataError, DataFormat, Dataset, DatasetLoader, GroundwaterRecord,
    Result,
};

/// Loader for delimited text uploads
#[derive(Debug, Clone)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different field delimiter, e.g. `b';'`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

impl DatasetLoader for CsvLoader {
    fn name(&self) -> &str {
        "csv"
    }

    fn format(&self) -> DataFormat {
        DataFormat::Csv
    }

    fn load(&self, payload: &[u8], columns: &ColumnMapping) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(payload);

        let headers = reader
            .headers()
            .map_err(|e| DataError::ParseError(e.to_string()))?
            .clone();
        let names: Vec<&str> = headers.iter().collect();
        let date_idx = ColumnMapping::find(&names, &columns.date)
            .ok_or_else(|| DataError::MissingColumn(columns.date.clone()))?;
        let level_idx = ColumnMapping::find(&names, &columns.level)
            .ok_or_else(|| DataError::MissingColumn(columns.level.clone()))?;

        let mut records = Vec::new();
        let mut dropped = 0;
        for row in reader.records() {
            let row = row.map_err(|e| DataError::ParseError(e.to_string()))?;
            let date = row.get(date_idx).and_then(|raw| parse_date(raw).ok());
            let level = row.get(level_idx).and_then(parse_level);
            match (date, level) {
                (Some(date), Some(level)) => records.push(GroundwaterRecord::new(date, level)),
                _ => dropped += 1,
            }
        }

        Ok(Dataset::from_records(records)?.with_dropped_rows(dropped))
    }
}

pub(crate) fn parse_level(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
