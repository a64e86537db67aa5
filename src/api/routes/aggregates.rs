//! Aggregate Routes
//!
//! Chart data as JSON, for clients that draw their own charts.
//!
//! - GET /api/v1/aggregates/conditions - Fatalities per atmospheric condition
//! - GET /api/v1/aggregates/monthly?filter= - Monthly fatalities, per gender for `All`
//! - GET /api/v1/categories - Filter button labels

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::aggregate::{by_condition, categories_for, total};
use crate::api::dto::{
    CategoriesResponse, ConditionBucket, ConditionsResponse, FilterQuery, MonthlyPoint,
    MonthlyResponse, SeriesDto,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::LineChart;

/// GET /api/v1/aggregates/conditions
pub async fn conditions(State(state): State<Arc<AppState>>) -> ApiResult<Json<ConditionsResponse>> {
    let dataset = state.dataset()?;
    let buckets = by_condition(dataset.records());

    Ok(Json(ConditionsResponse {
        total: total(&buckets),
        buckets: buckets.into_iter().map(ConditionBucket::from).collect(),
    }))
}

/// GET /api/v1/aggregates/monthly
pub async fn monthly(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Json<MonthlyResponse>> {
    let filter = query.parse()?;
    let dataset = state.dataset()?;
    let chart = LineChart::build(dataset.records(), &filter, state.charts.line.clone());

    Ok(Json(MonthlyResponse {
        filter: filter.label().to_string(),
        combined: chart.combined().iter().map(MonthlyPoint::from).collect(),
        series: chart.series().iter().map(SeriesDto::from).collect(),
        total: total(chart.combined()),
    }))
}

/// GET /api/v1/categories
pub async fn categories(State(state): State<Arc<AppState>>) -> ApiResult<Json<CategoriesResponse>> {
    let dataset = state.dataset()?;
    Ok(Json(CategoriesResponse {
        categories: categories_for(dataset.records()),
    }))
}
