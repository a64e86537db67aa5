//! CSV Loader
//!
//! Parses the accident CSV into [`Record`]s.
//!
//! Columns are located by header name, so extra columns and any column order
//! are accepted. Field coercion never aborts the load:
//!
//! - a fatality count that is not a non-negative whole number becomes `0`
//! - a crash date in no known format becomes `None`
//! - a blank condition or gender becomes `"Unknown"`
//! - a row the CSV reader cannot decode is skipped and counted as failed

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::io::Read;
use std::path::Path;

use super::error::{DatasetError, DatasetResult};
use super::record::{Dataset, LoadReport, Record, UNKNOWN};

pub const CONDITION_COLUMN: &str = "Atmospheric_Condition";
pub const FATALITIES_COLUMN: &str = "Fatalities_in_Crash";
pub const DATE_COLUMN: &str = "Crash_Date";
pub const GENDER_COLUMN: &str = "Gender";

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// Error messages kept in the report before truncation
const MAX_REPORTED_ERRORS: usize = 100;

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct Columns {
    condition: usize,
    fatalities: usize,
    date: usize,
    gender: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> DatasetResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            condition: find(CONDITION_COLUMN)?,
            fatalities: find(FATALITIES_COLUMN)?,
            date: find(DATE_COLUMN)?,
            gender: find(GENDER_COLUMN)?,
        })
    }
}

/// CSV loader with configurable date formats
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    /// Extra formats tried before the built-in ones
    date_formats: Vec<String>,
}

impl Default for DatasetLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetLoader {
    pub fn new() -> Self {
        Self {
            date_formats: Vec::new(),
        }
    }

    /// Try `format` before the built-in date formats
    pub fn with_date_format(mut self, format: &str) -> Self {
        self.date_formats.push(format.to_string());
        self
    }

    /// Load the dataset from a file
    pub fn load_path(&self, path: &Path) -> DatasetResult<Dataset> {
        let file = std::fs::File::open(path)?;
        let dataset = self.load_reader(file)?;

        tracing::debug!(
            path = %path.display(),
            records = dataset.len(),
            "Loaded dataset from file"
        );
        Ok(dataset)
    }

    /// Load the dataset from CSV text
    pub fn load_str(&self, text: &str) -> DatasetResult<Dataset> {
        self.load_reader(text.as_bytes())
    }

    /// Load the dataset from any reader
    pub fn load_reader<R: Read>(&self, reader: R) -> DatasetResult<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::resolve(reader.headers()?)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for (line_num, result) in reader.records().enumerate() {
            // Header occupies line 1
            let line = line_num + 2;

            let row = match result {
                Ok(row) => row,
                Err(e) => {
                    report.rows_failed += 1;
                    push_error(&mut report, format!("Line {}: {}", line, e));
                    continue;
                }
            };

            let raw_fatalities = row.get(columns.fatalities).unwrap_or("");
            let fatalities = match parse_fatalities(raw_fatalities) {
                Some(value) => value,
                None => {
                    report.values_coerced += 1;
                    push_error(
                        &mut report,
                        format!("Line {}: fatalities {:?} counted as 0", line, raw_fatalities),
                    );
                    0
                }
            };

            let raw_date = row.get(columns.date).unwrap_or("");
            let crash_date = self.parse_date(raw_date);
            if crash_date.is_none() {
                report.dates_missing += 1;
                push_error(
                    &mut report,
                    format!("Line {}: unparseable crash date {:?}", line, raw_date),
                );
            }

            records.push(Record::new(
                category(row.get(columns.condition)),
                fatalities,
                crash_date,
                category(row.get(columns.gender)),
            ));
        }

        report.rows_read = records.len();

        if report.errors.len() >= MAX_REPORTED_ERRORS {
            tracing::warn!(
                rows_failed = report.rows_failed,
                values_coerced = report.values_coerced,
                dates_missing = report.dates_missing,
                "Dataset has many malformed rows, error list truncated"
            );
        }

        Ok(Dataset::new(records, report))
    }

    /// Parse a crash date using the configured, then built-in formats
    pub fn parse_date(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let custom = self.date_formats.iter().map(String::as_str);
        for format in custom.chain(DATE_FORMATS) {
            if let Ok(date) = NaiveDate::parse_from_str(text, format) {
                return Some(date);
            }
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt.date());
            }
        }

        for format in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(dt.date());
            }
        }

        DateTime::parse_from_rfc3339(text)
            .ok()
            .map(|dt| dt.date_naive())
    }
}

/// Parse a fatality count.
///
/// Accepts whole numbers written as integers or floats ("2", "2.0").
/// Returns `None` for anything that would not be a valid non-negative count.
pub fn parse_fatalities(text: &str) -> Option<u32> {
    let text = text.trim();
    if let Ok(value) = text.parse::<u32>() {
        return Some(value);
    }

    let value = text.parse::<f64>().ok()?;
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn category(field: Option<&str>) -> String {
    match field.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

fn push_error(report: &mut LoadReport, message: String) {
    if report.errors.len() < MAX_REPORTED_ERRORS {
        report.errors.push(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
State,Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender
TX,Clear,2,2020-01-05,Male
TX,Clear,3,2020-01-20,Female
CA,Rain,1,2020-02-11,Not Reported";

    #[test]
    fn test_load_sample() {
        let dataset = DatasetLoader::new().load_str(SAMPLE).unwrap();

        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.report().rows_read, 3);
        assert_eq!(dataset.report().values_coerced, 0);

        let first = &dataset.records()[0];
        assert_eq!(first.atmospheric_condition, "Clear");
        assert_eq!(first.fatalities_in_crash, 2);
        assert_eq!(first.crash_date, NaiveDate::from_ymd_opt(2020, 1, 5));
        assert_eq!(first.gender, "Male");
    }

    #[test]
    fn test_columns_in_any_order() {
        let csv = "Gender,Crash_Date,Fatalities_in_Crash,Atmospheric_Condition\nFemale,01/15/2021,4,Snow";
        let dataset = DatasetLoader::new().load_str(csv).unwrap();

        let record = &dataset.records()[0];
        assert_eq!(record.atmospheric_condition, "Snow");
        assert_eq!(record.fatalities_in_crash, 4);
        assert_eq!(record.crash_date, NaiveDate::from_ymd_opt(2021, 1, 15));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Atmospheric_Condition,Fatalities_in_Crash,Crash_Date\nClear,1,2020-01-01";
        let err = DatasetLoader::new().load_str(csv).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == GENDER_COLUMN));
    }

    #[test]
    fn test_malformed_fatalities_coerced_to_zero() {
        let csv = "\
Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender
Clear,abc,2020-01-05,Male
Clear,,2020-01-06,Male
Clear,-1,2020-01-07,Male
Clear,1.5,2020-01-08,Male
Clear,2.0,2020-01-09,Male";

        let dataset = DatasetLoader::new().load_str(csv).unwrap();

        let counts: Vec<u32> = dataset
            .records()
            .iter()
            .map(|r| r.fatalities_in_crash)
            .collect();
        assert_eq!(counts, vec![0, 0, 0, 0, 2]);
        assert_eq!(dataset.report().values_coerced, 4);
    }

    #[test]
    fn test_unparseable_date_kept_without_month() {
        let csv = "\
Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender
Fog,3,not a date,Unknown";

        let dataset = DatasetLoader::new().load_str(csv).unwrap();

        assert_eq!(dataset.len(), 1);
        assert!(dataset.records()[0].crash_date.is_none());
        assert_eq!(dataset.report().dates_missing, 1);
    }

    #[test]
    fn test_blank_categories_become_unknown() {
        let csv = "\
Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender
,1,2020-03-01,";

        let dataset = DatasetLoader::new().load_str(csv).unwrap();
        let record = &dataset.records()[0];
        assert_eq!(record.atmospheric_condition, UNKNOWN);
        assert_eq!(record.gender, UNKNOWN);
    }

    #[test]
    fn test_short_row_does_not_abort() {
        let csv = "\
Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender
Clear,1
Rain,2,2020-05-05,Female";

        let dataset = DatasetLoader::new().load_str(csv).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[0].gender, UNKNOWN);
        assert_eq!(dataset.records()[0].fatalities_in_crash, 1);
    }

    #[test]
    fn test_date_formats() {
        let loader = DatasetLoader::new();
        let expected = NaiveDate::from_ymd_opt(2020, 7, 4);

        assert_eq!(loader.parse_date("2020-07-04"), expected);
        assert_eq!(loader.parse_date("07/04/2020"), expected);
        assert_eq!(loader.parse_date("2020/07/04"), expected);
        assert_eq!(loader.parse_date("2020-07-04 13:45:00"), expected);
        assert_eq!(loader.parse_date("07/04/2020 13:45"), expected);
        assert_eq!(loader.parse_date("2020-07-04T13:45:00Z"), expected);
        assert_eq!(loader.parse_date(""), None);
    }

    #[test]
    fn test_custom_date_format() {
        let loader = DatasetLoader::new().with_date_format("%d.%m.%Y");
        assert_eq!(loader.parse_date("04.07.2020"), NaiveDate::from_ymd_opt(2020, 7, 4));
    }

    #[test]
    fn test_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accidents.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let dataset = DatasetLoader::new().load_path(&path).unwrap();
        assert_eq!(dataset.len(), 3);

        let missing = DatasetLoader::new().load_path(&dir.path().join("missing.csv"));
        assert!(matches!(missing, Err(DatasetError::Io(_))));
    }
}
