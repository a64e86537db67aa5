//! Accident records
//!
//! The typed row model and the immutable [`Dataset`] that renderers hold.

use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

use crate::aggregate::Month;

/// Placeholder used when a categorical field is blank
pub const UNKNOWN: &str = "Unknown";

/// One parsed row of the accident dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Weather at the time of the crash (e.g. "Clear", "Rain")
    pub atmospheric_condition: String,
    /// Number of fatalities; malformed source values are stored as 0
    pub fatalities_in_crash: u32,
    /// Crash date, absent when the source text could not be parsed
    pub crash_date: Option<NaiveDate>,
    /// Reported gender ("Male", "Female", "Not Reported", "Unknown", ...)
    pub gender: String,
}

impl Record {
    pub fn new(
        atmospheric_condition: impl Into<String>,
        fatalities_in_crash: u32,
        crash_date: Option<NaiveDate>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            atmospheric_condition: atmospheric_condition.into(),
            fatalities_in_crash,
            crash_date,
            gender: gender.into(),
        }
    }

    /// Fatalities as a summable value
    pub fn fatalities(&self) -> f64 {
        f64::from(self.fatalities_in_crash)
    }

    /// Calendar month of the crash, if the date parsed
    pub fn month(&self) -> Option<Month> {
        self.crash_date.map(Month::from_date)
    }
}

/// Statistics gathered while parsing the CSV
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Rows turned into records
    pub rows_read: usize,
    /// Rows the CSV reader could not decode (skipped)
    pub rows_failed: usize,
    /// Fatality values coerced to zero
    pub values_coerced: usize,
    /// Records whose crash date could not be parsed
    pub dates_missing: usize,
    /// First error messages, truncated
    pub errors: Vec<String>,
}

/// An immutable, cheaply clonable record sequence
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[Record]>,
    report: Arc<LoadReport>,
}

impl Dataset {
    /// Wrap parsed records together with the report that produced them
    pub fn new(records: Vec<Record>, report: LoadReport) -> Self {
        Self {
            records: records.into(),
            report: Arc::new(report),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::new(Vec::new(), LoadReport::default())
    }
}

impl From<Vec<Record>> for Dataset {
    fn from(records: Vec<Record>) -> Self {
        let report = LoadReport {
            rows_read: records.len(),
            ..LoadReport::default()
        };
        Self::new(records, report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_month() {
        let date = NaiveDate::from_ymd_opt(2020, 1, 20);
        let record = Record::new("Clear", 2, date, "Male");
        assert_eq!(record.month().map(|m| m.to_string()).as_deref(), Some("2020-01"));

        let undated = Record::new("Clear", 2, None, "Male");
        assert!(undated.month().is_none());
    }

    #[test]
    fn test_dataset_clone_shares_records() {
        let dataset = Dataset::from(vec![Record::new("Rain", 1, None, "Female")]);
        let copy = dataset.clone();
        assert_eq!(copy.len(), 1);
        assert!(std::ptr::eq(dataset.records(), copy.records()));
        assert_eq!(copy.report().rows_read, 1);
    }
}
