//! Crashviz HTTP API
//!
//! Serves the charts and their data over HTTP, built with Axum.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - Both charts inline, filter buttons as links (`/?filter=Male`)
//! - `GET /Dataset/US_Car_Accident_Dataset.csv` - Raw CSV for the browser UI
//!
//! ## Aggregates
//! - `GET /api/v1/aggregates/conditions` - Fatalities per atmospheric condition
//! - `GET /api/v1/aggregates/monthly?filter=` - Monthly fatalities
//! - `GET /api/v1/categories` - Filter labels
//!
//! ## Charts
//! - `GET /api/v1/charts/bar.svg` - Bar chart
//! - `GET /api/v1/charts/line.svg?filter=` - Line chart
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use crashviz::api::{serve, ApiConfig, AppState};
//! use crashviz::chart::ChartConfig;
//! use crashviz::dataset::DatasetLoader;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let path = std::path::Path::new("Dataset/US_Car_Accident_Dataset.csv");
//!     let dataset = DatasetLoader::new().load_path(path)?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(dataset, ChartConfig::default(), config.clone())
//!         .with_dataset_file(path);
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Aggregate routes
        .route("/aggregates/conditions", get(routes::aggregates::conditions))
        .route("/aggregates/monthly", get(routes::aggregates::monthly))
        .route("/categories", get(routes::aggregates::categories))
        // Chart routes
        .route("/charts/bar.svg", get(routes::charts::bar_svg))
        .route("/charts/line.svg", get(routes::charts::line_svg));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let dataset_route = normalize_route(&state.config.dataset_route);
    let dataset_file = state.dataset_file.clone();
    let static_dir = state.config.static_dir.clone();

    // Create shared state
    let shared_state = Arc::new(state);

    let mut router = Router::new()
        .route("/", get(routes::page::index))
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes);

    router = match dataset_file {
        Some(path) => router.route_service(&dataset_route, ServeFile::new(path)),
        None => router.route(&dataset_route, get(routes::dataset_not_published)),
    };

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn normalize_route(route: &str) -> String {
    if route.starts_with('/') {
        route.to_string()
    } else {
        format!("/{}", route)
    }
}

/// CORS for the configured origins; any origin when none are configured
fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET])
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Crashviz API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Crashviz API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartConfig;
    use crate::dataset::DatasetLoader;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const CSV: &str = "Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender\n\
                       Clear,2,2020-01-05,Male\n\
                       Clear,3,2020-01-20,Female\n\
                       Rain,1,2020-02-01,Male\n\
                       Fog,4,2020-03-10,Not Reported\n";

    fn create_test_app() -> Router {
        let dataset = DatasetLoader::new().load_str(CSV).unwrap();
        let state = AppState::new(dataset, ChartConfig::default(), ApiConfig::default());
        build_router(state)
    }

    fn create_unavailable_app() -> Router {
        let state = AppState::unavailable("file not found", ChartConfig::default(), ApiConfig::default());
        build_router(state)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(create_unavailable_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["records"], 4);
        assert_eq!(json["load_report"]["rows_read"], 4);
    }

    #[tokio::test]
    async fn test_conditions() {
        let response = get(create_test_app(), "/api/v1/aggregates/conditions").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["total"], 10.0);
        assert_eq!(json["buckets"][0]["condition"], "Clear");
        assert_eq!(json["buckets"][0]["total"], 5.0);
        assert_eq!(json["buckets"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_monthly_filtered() {
        let response = get(create_test_app(), "/api/v1/aggregates/monthly?filter=Male").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["filter"], "Male");
        assert_eq!(json["total"], 3.0);
        assert_eq!(json["combined"][0]["month"], "2020-01");
        assert_eq!(json["series"].as_array().unwrap().len(), 1);
        assert_eq!(json["series"][0]["color"], "#1f77b4");
    }

    #[tokio::test]
    async fn test_monthly_all() {
        let response = get(create_test_app(), "/api/v1/aggregates/monthly").await;
        let json = body_json(response).await;
        assert_eq!(json["filter"], "All");
        assert_eq!(json["series"].as_array().unwrap().len(), 3);
        assert_eq!(json["total"], 10.0);
    }

    #[tokio::test]
    async fn test_categories() {
        let response = get(create_test_app(), "/api/v1/categories").await;
        let json = body_json(response).await;
        assert_eq!(
            json["categories"],
            serde_json::json!(["Male", "Female", "Not Reported", "All"])
        );
    }

    #[tokio::test]
    async fn test_bar_svg() {
        let response = get(create_test_app(), "/api/v1/charts/bar.svg").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );

        let svg = body_text(response).await;
        assert!(svg.starts_with("<svg"));
        assert_eq!(svg.matches("<rect").count(), 3);
    }

    #[tokio::test]
    async fn test_line_svg() {
        let response = get(create_test_app(), "/api/v1/charts/line.svg?filter=Female").await;
        assert_eq!(response.status(), StatusCode::OK);

        let svg = body_text(response).await;
        assert!(svg.contains("line line-female"));
        assert!(!svg.contains("line line-male"));
    }

    #[tokio::test]
    async fn test_line_svg_absent_gender() {
        let response = get(create_test_app(), "/api/v1/charts/line.svg?filter=Unknown").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("No data"));
    }

    #[tokio::test]
    async fn test_bad_filter() {
        let response = get(create_test_app(), "/api/v1/charts/line.svg?filter=Ma%0Ale").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert!(json["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_dataset_unavailable() {
        let response = get(create_unavailable_app(), "/api/v1/aggregates/conditions").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "DATASET_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = get(create_test_app(), "/?filter=Male").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains(r#"<div id="bar-chart"><svg"#));
        assert!(html.contains("line line-male"));
        assert!(!html.contains("line line-female"));
        assert!(html.contains(r#"class="filter active" href="/?filter=Male""#));
    }

    #[tokio::test]
    async fn test_index_page_without_dataset() {
        let response = get(create_unavailable_app(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await.matches("chart-placeholder").count(), 2);
    }

    #[tokio::test]
    async fn test_dataset_file_route() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("accidents.csv");
        std::fs::write(&path, CSV).unwrap();

        let dataset = DatasetLoader::new().load_path(&path).unwrap();
        let state = AppState::new(dataset, ChartConfig::default(), ApiConfig::default())
            .with_dataset_file(&path);

        let response = get(build_router(state), "/Dataset/US_Car_Accident_Dataset.csv").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, CSV);

        let response = get(create_test_app(), "/Dataset/US_Car_Accident_Dataset.csv").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
