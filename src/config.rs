//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::ApiConfig;
use crate::chart::ChartConfig;
use crate::dataset::DEFAULT_DATASET_PATH;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub charts: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the accident CSV comes from
#[derive(Debug, Clone, Deserialize)]
pub struct DatasetConfig {
    /// File path or `http(s)://` URL
    #[serde(default = "default_dataset_location")]
    pub location: String,
}

fn default_dataset_location() -> String {
    DEFAULT_DATASET_PATH.to_string()
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            location: default_dataset_location(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load `path` if given, otherwise the first default location found
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        for path in default_config_paths() {
            if path.exists() {
                match Self::load_with_env(&path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `CRASHVIZ_*` overrides read through `lookup`
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(location) = lookup("CRASHVIZ_DATASET") {
            self.dataset.location = location;
        }

        if let Some(host) = lookup("CRASHVIZ_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = lookup("CRASHVIZ_API_PORT") {
            match port.parse() {
                Ok(p) => self.api.port = p,
                Err(_) => tracing::warn!("Ignoring invalid CRASHVIZ_API_PORT: {}", port),
            }
        }

        if let Some(level) = lookup("CRASHVIZ_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CRASHVIZ_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    [
        dirs::config_dir().map(|p| p.join("crashviz").join("config.toml")),
        Some(PathBuf::from("/etc/crashviz/config.toml")),
        Some(PathBuf::from("./config.toml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Crashviz Configuration
#
# Environment variables override these settings:
# - CRASHVIZ_DATASET
# - CRASHVIZ_API_HOST
# - CRASHVIZ_API_PORT
# - CRASHVIZ_LOG_LEVEL
# - CRASHVIZ_LOG_FORMAT

[dataset]
# CSV file path or http(s) URL
location = "Dataset/US_Car_Accident_Dataset.csv"

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8082

# Allowed CORS origins (empty allows any)
cors_origins = ["http://localhost:8084", "http://127.0.0.1:8084"]

# Path the raw CSV is published under for the browser UI
dataset_route = "/Dataset/US_Car_Accident_Dataset.csv"

# Optional directory with the built browser UI
# static_dir = "crashviz-ui/dist"

[charts.bar]
fill = "#69b3a2"
padding = 0.2
duration_ms = 800
stagger_ms = 100
# auto, always or never
label_rotation = "auto"
y_ticks = 10

[charts.bar.frame]
width = 460.0
height = 450.0
margin = { top = 10.0, right = 30.0, bottom = 90.0, left = 40.0 }

[charts.line]
stroke_width = 2.5
y_ticks = 10

[charts.line.frame]
width = 800.0
height = 500.0
margin = { top = 10.0, right = 30.0, bottom = 50.0, left = 60.0 }

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
