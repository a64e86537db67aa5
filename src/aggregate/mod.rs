//! Aggregation
//!
//! Group-by-and-sum over an in-memory record sequence.
//!
//! Buckets come out in first-seen key order. Monthly aggregation sorts its
//! buckets chronologically afterwards, since a line is drawn point to point
//! in output order.
//!
//! Non-finite values contribute zero, so a single malformed row can never
//! turn a whole bucket into `NaN`.

pub mod filter;
pub mod month;

pub use filter::{categories_for, distinct_genders, Filter, ALL_LABEL, FIXED_FILTERS};
pub use month::{Month, ParseMonthError};

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

use crate::dataset::Record;

/// A group key paired with its summed total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub total: f64,
}

impl<K> Bucket<K> {
    pub fn new(key: K, total: f64) -> Self {
        Self { key, total }
    }
}

/// Sum `value_fn` per distinct `key_fn` result.
pub fn aggregate<'a, R, K, I, FK, FV>(records: I, mut key_fn: FK, value_fn: FV) -> Vec<Bucket<K>>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash + Clone,
    FK: FnMut(&R) -> K,
    FV: FnMut(&R) -> f64,
{
    aggregate_some(records, |r| Some(key_fn(r)), value_fn)
}

/// Like [`aggregate`], but records whose key is `None` are skipped.
pub fn aggregate_some<'a, R, K, I, FK, FV>(
    records: I,
    mut key_fn: FK,
    mut value_fn: FV,
) -> Vec<Bucket<K>>
where
    R: 'a,
    I: IntoIterator<Item = &'a R>,
    K: Eq + Hash + Clone,
    FK: FnMut(&R) -> Option<K>,
    FV: FnMut(&R) -> f64,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut buckets: Vec<Bucket<K>> = Vec::new();

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        let value = finite_or_zero(value_fn(record));

        match index.get(&key) {
            Some(&slot) => buckets[slot].total += value,
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push(Bucket::new(key, value));
            }
        }
    }

    buckets
}

/// Fatalities per atmospheric condition, first-seen order
pub fn by_condition<'a, I>(records: I) -> Vec<Bucket<String>>
where
    I: IntoIterator<Item = &'a Record>,
{
    aggregate(
        records,
        |r: &Record| r.atmospheric_condition.clone(),
        Record::fatalities,
    )
}

/// Fatalities per calendar month, chronological. Undated records are skipped
/// and months without records get no bucket.
pub fn by_month<'a, I>(records: I) -> Vec<Bucket<Month>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buckets = aggregate_some(records, Record::month, Record::fatalities);
    buckets.sort_by_key(|b| b.key);
    buckets
}

/// Sum of all bucket totals
pub fn total<K>(buckets: &[Bucket<K>]) -> f64 {
    buckets.iter().map(|b| b.total).sum()
}

/// Largest bucket total, `0.0` when there are no buckets
pub fn max_total<K>(buckets: &[Bucket<K>]) -> f64 {
    buckets.iter().map(|b| b.total).fold(0.0, f64::max)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
