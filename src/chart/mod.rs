//! Chart Kit
//!
//! Scales, axes and an SVG element tree, plus the two charts built on them.
//! Everything here is pure: a chart is computed from records and rendered to
//! markup without touching any display surface.

pub mod axis;
pub mod bar;
pub mod frame;
pub mod line;
pub mod palette;
pub mod scale;
pub mod svg;

pub use bar::{BarChart, BarChartConfig, BarGeometry, LabelRotation};
pub use frame::{Frame, Margin};
pub use line::{line_path, LineChart, LineChartConfig, LineSeries, NO_DATA_TEXT};
pub use palette::{gender_color, series_class};
pub use scale::{BandScale, LinearScale, TimeScale};
pub use svg::Element;

use serde::{Deserialize, Serialize};

/// Per-chart settings, the `[charts]` config section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub bar: BarChartConfig,
    pub line: LineChartConfig,
}
