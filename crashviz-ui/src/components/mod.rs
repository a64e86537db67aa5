//! UI Components

pub mod bar_plot;
pub mod line_chart;
pub mod loading;

pub use bar_plot::BarPlot;
pub use line_chart::LineChart;
pub use loading::Loading;
