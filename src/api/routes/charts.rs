//! Chart Routes
//!
//! Server-side rendered SVG. Each request draws into its own buffer.
//!
//! - GET /api/v1/charts/bar.svg
//! - GET /api/v1/charts/line.svg?filter=

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;

use crate::api::dto::FilterQuery;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::render::{BarRenderer, LineRenderer, SvgBuffer, BAR_TARGET_ID, LINE_TARGET_ID};

const SVG_CONTENT_TYPE: &str = "image/svg+xml";

fn svg_response(markup: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], markup)
}

/// GET /api/v1/charts/bar.svg
pub async fn bar_svg(State(state): State<Arc<AppState>>) -> ApiResult<impl IntoResponse> {
    let dataset = state.dataset()?.clone();

    let mut renderer = BarRenderer::new(SvgBuffer::new(BAR_TARGET_ID), state.charts.bar.clone());
    renderer.on_loaded(Ok(dataset))?;

    Ok(svg_response(renderer.into_target().into_contents()))
}

/// GET /api/v1/charts/line.svg
pub async fn line_svg(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<impl IntoResponse> {
    let filter = query.parse()?;
    let dataset = state.dataset()?.clone();

    let mut renderer = LineRenderer::new(SvgBuffer::new(LINE_TARGET_ID), state.charts.line.clone());
    renderer.on_loaded(Ok(dataset))?;
    if !filter.is_all() {
        renderer
            .render(&filter)?
            .ok_or_else(|| ApiError::Internal("line chart not loaded".to_string()))?;
    }

    Ok(svg_response(renderer.into_target().into_contents()))
}
