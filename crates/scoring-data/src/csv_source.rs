//! CSV price history.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use csv::ReaderBuilder;
use scoring_core::{Bar, DataError, PriceSeries};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// CSV record format.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "date", alias = "timestamp", alias = "Timestamp")]
    date: String,
    #[serde(alias = "Open", alias = "open")]
    open: f64,
    #[serde(alias = "High", alias = "high")]
    high: f64,
    #[serde(alias = "Low", alias = "low")]
    low: f64,
    #[serde(alias = "Close", alias = "close", alias = "Adj Close")]
    close: f64,
    #[serde(alias = "Volume", alias = "volume", default)]
    volume: f64,
}

/// OHLCV history stored as CSV, one bar per row.
#[derive(Debug, Clone)]
pub struct CsvDataSource {
    path: PathBuf,
}

impl CsvDataSource {
    /// Create a source for an existing file.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NoDataAvailable(path.display().to_string()));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every row, sorted by timestamp.
    pub fn load_bars(&self) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&self.path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for (row, result) in reader.deserialize().enumerate() {
            let record: CsvRecord = result
                .map_err(|e| DataError::ParseError(format!("row {}: {e}", row + 1)))?;

            let timestamp = parse_timestamp(&record.date)?;

            bars.push(Bar::new(
                timestamp,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable(self.path.display().to_string()));
        }

        // Files are often newest first
        bars.sort_by_key(|b| b.timestamp);

        debug!(path = %self.path.display(), bars = bars.len(), "Loaded CSV history");
        Ok(bars)
    }

    /// Load and validate the history. Duplicate timestamps are rejected.
    pub fn load(&self) -> Result<PriceSeries, DataError> {
        Ok(PriceSeries::new(self.load_bars()?)?)
    }
}

/// Parse various timestamp formats into Unix milliseconds.
pub fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    let formats = [
        "%Y-%m-%d",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%d-%m-%Y",
    ];

    for format in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
        if let Ok(d) = NaiveDate::parse_from_str(date_str, format) {
            return Ok(d.and_time(NaiveTime::MIN).and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds if more than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoring_core::InputError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("2024-01-15").unwrap(), 1_705_276_800_000);
        assert_eq!(
            parse_timestamp("2024-01-15 10:30:00").unwrap(),
            1_705_276_800_000 + 37_800_000
        );
        assert_eq!(
            parse_timestamp("2024-01-15T10:30:00Z").unwrap(),
            1_705_276_800_000 + 37_800_000
        );
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000);
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_load_sorts_rows() {
        let file = csv_file(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,102,104,101,103,1500\n\
             2024-01-01,100,101,99,100.5,1000\n\
             2024-01-02,100.5,103,100,102,1200\n",
        );

        let series = CsvDataSource::new(file.path()).unwrap().load().unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![100.5, 102.0, 103.0]);
        assert_eq!(series.volumes(), vec![1000.0, 1200.0, 1500.0]);
    }

    #[test]
    fn test_lowercase_headers_and_missing_volume() {
        let file = csv_file(
            "timestamp,open,high,low,close\n\
             1705312800,10,11,9,10.5\n\
             1705399200,10.5,12,10,11\n",
        );

        let series = CsvDataSource::new(file.path()).unwrap().load().unwrap();
        assert_eq!(series.volumes(), vec![0.0, 0.0]);
        assert_eq!(series.last().close, 11.0);
    }

    #[test]
    fn test_duplicate_timestamps_rejected() {
        let file = csv_file(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-01,100,101,99,100,10\n\
             2024-01-01,100,101,99,100,10\n",
        );

        let err = CsvDataSource::new(file.path()).unwrap().load().unwrap_err();
        assert!(matches!(
            err,
            DataError::Input(InputError::Unordered { index: 1, .. })
        ));
    }

    #[test]
    fn test_bad_row_names_the_row() {
        let file = csv_file(
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-01,100,101,99,100,10\n\
             2024-01-02,100,101,99,abc,10\n",
        );

        let err = CsvDataSource::new(file.path()).unwrap().load().unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_empty_and_missing_files() {
        let file = csv_file("Date,Open,High,Low,Close,Volume\n");
        let err = CsvDataSource::new(file.path()).unwrap().load().unwrap_err();
        assert!(matches!(err, DataError::NoDataAvailable(_)));

        assert!(matches!(
            CsvDataSource::new("/nonexistent/prices.csv"),
            Err(DataError::NoDataAvailable(_))
        ));
    }
}
