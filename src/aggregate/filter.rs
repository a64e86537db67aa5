//! Line chart filter selection.

use serde::{Serialize, Serializer};
use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::dataset::Record;

/// Label of the "every gender" selection
pub const ALL_LABEL: &str = "All";

/// Button labels shown before any data is loaded
pub const FIXED_FILTERS: [&str; 5] = ["Male", "Female", "Not Reported", "Unknown", ALL_LABEL];

/// Which records feed the line chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Filter {
    /// Every record, drawn as one line per gender
    #[default]
    All,
    /// Only records whose gender equals the value
    Gender(String),
}

impl Filter {
    /// Parse a button label. `"All"` (any case) and blank select everything.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_LABEL) {
            Self::All
        } else {
            Self::Gender(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_LABEL,
            Self::Gender(gender) => gender,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::All => true,
            Self::Gender(gender) => record.gender == *gender,
        }
    }

    /// Records selected by this filter, in dataset order
    pub fn apply<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        records.iter().filter(move |r| self.matches(r))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Distinct gender values in first-seen order
pub fn distinct_genders<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut seen = HashSet::new();
    let mut genders = Vec::new();
    for record in records {
        if seen.insert(record.gender.as_str()) {
            genders.push(record.gender.clone());
        }
    }
    genders
}

/// Filter button labels for `records`: their genders followed by `All`
pub fn categories_for<'a, I>(records: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut labels = distinct_genders(records);
    labels.push(ALL_LABEL.to_string());
    labels
}
