//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use crate::aggregate::{Bucket, Filter, Month};
use crate::chart::LineSeries;
use crate::dataset::LoadReport;

/// Longest accepted filter label
pub const MAX_FILTER_LEN: usize = 64;

// ============================================
// QUERY PARAMETERS
// ============================================

/// `?filter=` query parameter
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    /// Gender label or `All`; missing means `All`
    #[serde(default)]
    pub filter: Option<String>,
}

impl FilterQuery {
    /// Validate and parse the filter label
    pub fn parse(&self) -> ApiResult<Filter> {
        let Some(label) = self.filter.as_deref() else {
            return Ok(Filter::All);
        };

        if label.chars().count() > MAX_FILTER_LEN {
            return Err(ApiError::Validation(format!(
                "filter must be at most {} characters",
                MAX_FILTER_LEN
            )));
        }
        if label.chars().any(char::is_control) {
            return Err(ApiError::Validation(
                "filter must not contain control characters".to_string(),
            ));
        }

        Ok(Filter::parse(label))
    }
}

// ============================================
// AGGREGATE DTOs
// ============================================

/// Bar chart data
#[derive(Debug, Serialize, Deserialize)]
pub struct ConditionsResponse {
    pub buckets: Vec<ConditionBucket>,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConditionBucket {
    pub condition: String,
    pub total: f64,
}

impl From<Bucket<String>> for ConditionBucket {
    fn from(bucket: Bucket<String>) -> Self {
        Self {
            condition: bucket.key,
            total: bucket.total,
        }
    }
}

/// Line chart data for one filter
#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyResponse {
    pub filter: String,
    /// Totals over the whole filtered subset
    pub combined: Vec<MonthlyPoint>,
    /// One entry per drawn line
    pub series: Vec<SeriesDto>,
    pub total: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MonthlyPoint {
    /// `YYYY-MM`
    pub month: Month,
    pub total: f64,
}

impl From<&Bucket<Month>> for MonthlyPoint {
    fn from(bucket: &Bucket<Month>) -> Self {
        Self {
            month: bucket.key,
            total: bucket.total,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SeriesDto {
    pub gender: String,
    pub color: String,
    pub points: Vec<MonthlyPoint>,
}

impl From<&LineSeries> for SeriesDto {
    fn from(series: &LineSeries) -> Self {
        Self {
            gender: series.key.clone(),
            color: series.color.to_string(),
            points: series.points.iter().map(MonthlyPoint::from).collect(),
        }
    }
}

/// Filter button labels
#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

// ============================================
// HEALTH DTOs
// ============================================

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "unhealthy"
    pub status: String,
    /// "ok" or "error"
    pub dataset: String,
    /// Loaded record count
    pub records: usize,
    /// Parse statistics of the startup load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_report: Option<LoadReport>,
    /// Why the dataset failed to load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub uptime_seconds: u64,
    pub version: String,
}
