//! # Crashviz
//!
//! Charts of US car-accident fatalities, aggregated from a CSV dataset and
//! drawn as SVG.
//!
//! ## Charts
//!
//! - **Bar chart**: total fatalities per atmospheric condition, bars growing
//!   in from the baseline one after another
//! - **Line chart**: fatalities per month, one line per gender or a single
//!   gender picked with a filter button
//!
//! ## Modules
//!
//! - [`dataset`]: CSV loading into typed records, dataset sources
//! - [`aggregate`]: group-by-and-sum, months and filters
//! - [`chart`]: scales, axes, SVG markup for both charts
//! - [`render`]: stateful renderers, draw targets and the view shell
//! - [`api`]: HTTP server with Axum (`server` feature)
//!
//! ## Quick Start
//!
//! ```rust
//! use crashviz::dataset::DatasetLoader;
//! use crashviz::render::{LineRenderer, SvgBuffer};
//! use crashviz::chart::LineChartConfig;
//!
//! let csv = "Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender\n\
//!            Clear,2,2020-01-05,Male\n\
//!            Rain,1,2020-02-11,Female\n";
//! let dataset = DatasetLoader::new().load_str(csv).unwrap();
//!
//! let mut line = LineRenderer::new(SvgBuffer::new("line-chart"), LineChartConfig::default());
//! line.on_loaded(Ok(dataset)).unwrap();
//! line.on_filter_selected("Female").unwrap();
//!
//! assert!(line.target().contents().contains("line-female"));
//! ```

pub mod aggregate;
pub mod chart;
pub mod dataset;
pub mod render;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod logging;

// Re-export top-level types for convenience
pub use aggregate::{aggregate, by_condition, by_month, Bucket, Filter, Month};

pub use chart::{BarChart, BarChartConfig, ChartConfig, LineChart, LineChartConfig};

pub use dataset::{Dataset, DatasetError, DatasetLoader, DatasetResult, DatasetSource, Record};

pub use render::{
    BarRenderer, DrawTarget, LineRenderer, RenderError, RenderResult, SvgBuffer, ViewShell,
};

#[cfg(feature = "server")]
pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

#[cfg(feature = "server")]
pub use config::{Config, ConfigError, LoggingConfig};
