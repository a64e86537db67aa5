//! Line chart renderer
//!
//! Holds the loaded records and the selected [`Filter`]. Filter changes
//! re-aggregate and redraw synchronously from the resident records; the
//! dataset is fetched at most once.

use super::error::RenderResult;
use super::target::DrawTarget;
use super::{placeholder, LOAD_FAILED_TEXT};
use crate::aggregate::{categories_for, Filter, FIXED_FILTERS};
use crate::chart::{LineChart, LineChartConfig};
use crate::dataset::{Dataset, DatasetResult, DatasetSource};

#[derive(Debug, Clone)]
pub enum LineState {
    Unloaded,
    Loaded(Dataset),
}

pub struct LineRenderer<T> {
    target: T,
    config: LineChartConfig,
    state: LineState,
    selected: Filter,
    failure: Option<String>,
}

impl<T: DrawTarget> LineRenderer<T> {
    pub fn new(target: T, config: LineChartConfig) -> Self {
        Self {
            target,
            config,
            state: LineState::Unloaded,
            selected: Filter::All,
            failure: None,
        }
    }

    pub fn state(&self) -> &LineState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self.state, LineState::Loaded(_))
    }

    /// Filter of the chart currently shown
    pub fn selected(&self) -> &Filter {
        &self.selected
    }

    /// Why the dataset fetch failed, if it did
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn config(&self) -> &LineChartConfig {
        &self.config
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Button labels: the genders present in the data followed by `All`.
    /// Before the data arrives, the fixed five labels.
    pub fn categories(&self) -> Vec<String> {
        match &self.state {
            LineState::Unloaded => FIXED_FILTERS.iter().map(|s| s.to_string()).collect(),
            LineState::Loaded(dataset) => categories_for(dataset.records()),
        }
    }

    pub async fn initialize(&mut self, source: &dyn DatasetSource) -> RenderResult<()> {
        if self.is_loaded() {
            return Ok(());
        }
        tracing::debug!(target_id = %self.target.id(), source = %source.describe(), "Loading line chart data");
        let result = source.fetch().await;
        self.on_loaded(result)
    }

    /// Handle the outcome of the dataset fetch.
    ///
    /// Success moves to `Loaded` and draws the `All` view. Failure keeps the
    /// renderer `Unloaded` behind a placeholder, so later filter clicks do
    /// nothing.
    pub fn on_loaded(&mut self, result: DatasetResult<Dataset>) -> RenderResult<()> {
        if self.is_loaded() {
            tracing::debug!(target_id = %self.target.id(), "Line chart already loaded, ignoring load");
            return Ok(());
        }

        match result {
            Ok(dataset) => {
                tracing::info!(target_id = %self.target.id(), records = dataset.len(), "Line chart data loaded");
                self.failure = None;
                self.state = LineState::Loaded(dataset);
                self.render(&Filter::All).map(|_| ())
            }
            Err(err) => {
                tracing::warn!(target_id = %self.target.id(), error = %err, "Line chart data unavailable");
                self.failure = Some(err.to_string());
                let markup = placeholder(LOAD_FAILED_TEXT, &self.config.frame).to_string();
                self.target.clear()?;
                self.target.mount(&markup)
            }
        }
    }

    /// Replace the chart with the view for `filter`.
    ///
    /// Returns the drawn chart, or `None` while no data is loaded.
    pub fn render(&mut self, filter: &Filter) -> RenderResult<Option<LineChart>> {
        let LineState::Loaded(dataset) = &self.state else {
            tracing::debug!(target_id = %self.target.id(), filter = %filter, "Line chart not loaded, ignoring render");
            return Ok(None);
        };

        let chart = LineChart::build(dataset.records(), filter, self.config.clone());
        let markup = chart.to_svg().to_string();

        self.target.clear()?;
        self.target.mount(&markup)?;
        self.selected = filter.clone();

        tracing::debug!(
            target_id = %self.target.id(),
            filter = %filter,
            series = chart.series().len(),
            months = chart.combined().len(),
            "Line chart drawn"
        );
        Ok(Some(chart))
    }

    /// Button press: select the filter named by `label` and redraw
    pub fn on_filter_selected(&mut self, label: &str) -> RenderResult<Option<LineChart>> {
        self.render(&Filter::parse(label))
    }
}
