use crate::record::TemperatureRecord;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use log::info;
use std::{fs::File, io::Read, path::Path};
use thiserror::Error;

/// Timestamp formats accepted in history CSVs.
const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Bare-date fallback format; parsed dates map to midnight.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors that can occur while reading a history CSV.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read history file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),
    #[error("unparseable timestamp {value:?} on line {line}")]
    Timestamp { value: String, line: u64 },
    #[error("unparseable temperature {value:?} on line {line}")]
    Temperature { value: String, line: u64 },
}

/// Parse a timestamp in any accepted format.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Read temperature records from CSV data.
///
/// The header row must contain `timestamp`, `city` and `temperature`
/// columns in any order; extra columns are ignored.
pub fn records_from_reader<R: Read>(reader: R) -> Result<Vec<TemperatureRecord>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = rdr.headers()?.clone();
    let column = |name: &'static str| {
        headers
            .iter()
            .position(|header| header.trim().eq_ignore_ascii_case(name))
            .ok_or(IngestError::MissingColumn(name))
    };
    let timestamp_idx = column("timestamp")?;
    let city_idx = column("city")?;
    let temperature_idx = column("temperature")?;

    let mut records = Vec::new();
    for row in rdr.records() {
        let row = row?;
        let line = row.position().map_or(0, |position| position.line());
        let raw_timestamp = row.get(timestamp_idx).unwrap_or("");
        let timestamp = parse_timestamp(raw_timestamp).ok_or_else(|| IngestError::Timestamp {
            value: raw_timestamp.to_string(),
            line,
        })?;
        let city = row.get(city_idx).unwrap_or("").trim().to_string();
        let raw_temperature = row.get(temperature_idx).unwrap_or("");
        let temperature =
            raw_temperature
                .trim()
                .parse::<f64>()
                .map_err(|_| IngestError::Temperature {
                    value: raw_temperature.to_string(),
                    line,
                })?;
        records.push(TemperatureRecord {
            city,
            timestamp,
            temperature,
        });
    }
    Ok(records)
}

/// Read temperature records from a CSV file on disk.
pub fn records_from_path(path: &Path) -> Result<Vec<TemperatureRecord>, IngestError> {
    let file = File::open(path)?;
    let records = records_from_reader(file)?;
    info!("parsed {} records from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{parse_timestamp, records_from_reader, IngestError};
    use chrono::{NaiveDate, Timelike};

    const STR_RESULT: &str = "\
timestamp,city,temperature
2023-01-01 00:00:00,Moscow,-7.3
2023-01-02 00:00:00,Moscow,-6.1
2023-01-01 00:00:00,Berlin,2.4
";

    #[test]
    fn test_records_from_reader() {
        let records = records_from_reader(STR_RESULT.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].city, "Moscow");
        assert!((records[0].temperature - (-7.3)).abs() < f64::EPSILON);
        assert_eq!(
            records[0].timestamp.date(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_header_order_independent_and_extra_columns_ignored() {
        let csv_data = "\
station,temperature,city,timestamp
A1,15.5,Madrid,2022-07-04T12:00:00
A1,16.0,Madrid,2022-07-05T12:00:00
";
        let records = records_from_reader(csv_data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].city, "Madrid");
        assert!((records[0].temperature - 15.5).abs() < f64::EPSILON);
        assert_eq!(records[0].timestamp.hour(), 12);
    }

    #[test]
    fn test_bare_date_maps_to_midnight() {
        let parsed = parse_timestamp("2021-03-15").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2021, 3, 15).unwrap());
        assert_eq!(parsed.hour(), 0);
    }

    #[test]
    fn test_missing_column() {
        let csv_data = "timestamp,temperature\n2023-01-01,3.0\n";
        let err = records_from_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn("city")));
    }

    #[test]
    fn test_bad_timestamp() {
        let csv_data = "timestamp,city,temperature\nnot-a-date,Oslo,1.0\n";
        let err = records_from_reader(csv_data.as_bytes()).unwrap_err();
        match err {
            IngestError::Timestamp { value, line } => {
                assert_eq!(value, "not-a-date");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_bad_temperature() {
        let csv_data = "timestamp,city,temperature\n2023-01-01,Oslo,warm\n";
        let err = records_from_reader(csv_data.as_bytes()).unwrap_err();
        assert!(matches!(err, IngestError::Temperature { .. }));
    }
}
