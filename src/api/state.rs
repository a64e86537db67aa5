//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks. The dataset is
//! loaded once before the server starts and never mutated.

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use super::error::{ApiError, ApiResult};
use crate::chart::ChartConfig;
use crate::dataset::Dataset;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Records loaded at startup, absent if loading failed
    pub dataset: Option<Dataset>,
    /// Why the dataset is absent
    pub load_error: Option<String>,
    /// Local CSV file published for the browser UI
    pub dataset_file: Option<PathBuf>,
    /// Chart dimensions and styling
    pub charts: Arc<ChartConfig>,
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// State serving a loaded dataset
    pub fn new(dataset: Dataset, charts: ChartConfig, config: ApiConfig) -> Self {
        Self {
            dataset: Some(dataset),
            load_error: None,
            dataset_file: None,
            charts: Arc::new(charts),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// State for a server whose dataset failed to load; data routes answer 503
    pub fn unavailable(reason: impl Into<String>, charts: ChartConfig, config: ApiConfig) -> Self {
        Self {
            dataset: None,
            load_error: Some(reason.into()),
            dataset_file: None,
            charts: Arc::new(charts),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Publish `path` under the configured dataset route
    pub fn with_dataset_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_file = Some(path.into());
        self
    }

    /// The loaded dataset or a 503 error
    pub fn dataset(&self) -> ApiResult<&Dataset> {
        self.dataset.as_ref().ok_or_else(|| {
            ApiError::DatasetUnavailable(
                self.load_error
                    .clone()
                    .unwrap_or_else(|| "dataset not loaded".to_string()),
            )
        })
    }

    pub fn is_ready(&self) -> bool {
        self.dataset.is_some()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Route the raw CSV is published under
    #[serde(default = "default_dataset_route")]
    pub dataset_route: String,

    /// Directory with the built browser UI, served as a fallback
    #[serde(default)]
    pub static_dir: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8082
}

fn default_dataset_route() -> String {
    format!("/{}", crate::dataset::DEFAULT_DATASET_PATH)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![
                "http://localhost:8084".to_string(),
                "http://127.0.0.1:8084".to_string(),
            ],
            dataset_route: default_dataset_route(),
            static_dir: None,
        }
    }
}

impl ApiConfig {
    /// Create config with custom host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Record;

    #[test]
    fn test_dataset_access() {
        let ready = AppState::new(
            Dataset::from(vec![Record::new("Clear", 1, None, "Male")]),
            ChartConfig::default(),
            ApiConfig::default(),
        );
        assert!(ready.is_ready());
        assert_eq!(ready.dataset().unwrap().len(), 1);

        let down = AppState::unavailable("file missing", ChartConfig::default(), ApiConfig::default());
        assert!(!down.is_ready());
        assert!(matches!(down.dataset(), Err(ApiError::DatasetUnavailable(msg)) if msg == "file missing"));
    }

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::new("127.0.0.1", 9000);
        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.dataset_route, "/Dataset/US_Car_Accident_Dataset.csv");
    }
}
