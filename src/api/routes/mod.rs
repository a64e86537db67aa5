//! API Route Handlers

pub mod aggregates;
pub mod charts;
pub mod health;
pub mod page;

use crate::api::error::ApiError;

/// Dataset route when no local CSV file is published
pub async fn dataset_not_published() -> ApiError {
    ApiError::NotFound("dataset file is not published by this server".to_string())
}
