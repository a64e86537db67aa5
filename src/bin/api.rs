//! Crashviz API Server
//!
//! Run with: cargo run --bin crashviz-api
//!
//! # Configuration
//!
//! Loaded from `CRASHVIZ_CONFIG` when set, otherwise from the default
//! locations, with environment overrides:
//! - `CRASHVIZ_DATASET`: CSV path or URL (default: Dataset/US_Car_Accident_Dataset.csv)
//! - `CRASHVIZ_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `CRASHVIZ_API_PORT`: Port to listen on (default: 8082)
//! - `CRASHVIZ_LOG_LEVEL`, `CRASHVIZ_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use crashviz::api::{serve, AppState};
use crashviz::config::Config;
use crashviz::dataset::source_for;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var("CRASHVIZ_CONFIG") {
        Ok(path) => Config::load_with_env(Path::new(&path))?,
        Err(_) => Config::load_default(),
    };

    crashviz::logging::init(&config.logging);

    tracing::info!("Starting Crashviz API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Dataset: {}", config.dataset.location);

    let source = source_for(&config.dataset.location);
    let state = match source.fetch().await {
        Ok(dataset) => {
            let report = dataset.report();
            tracing::info!(
                records = dataset.len(),
                rows_failed = report.rows_failed,
                values_coerced = report.values_coerced,
                dates_missing = report.dates_missing,
                "Dataset loaded"
            );
            let state = AppState::new(dataset, config.charts.clone(), config.api.clone());
            if is_local(&config.dataset.location) {
                state.with_dataset_file(&config.dataset.location)
            } else {
                state
            }
        }
        Err(e) => {
            // Probes and chart placeholders report the failure
            tracing::error!("Failed to load dataset from {}: {}", source.describe(), e);
            AppState::unavailable(e.to_string(), config.charts.clone(), config.api.clone())
        }
    };

    tracing::info!("Starting server on {}:{}", config.api.host, config.api.port);
    serve(state, &config.api).await?;

    tracing::info!("Crashviz API server stopped");
    Ok(())
}

fn is_local(location: &str) -> bool {
    !(location.starts_with("http://") || location.starts_with("https://"))
}
