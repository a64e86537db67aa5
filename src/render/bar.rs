//! Bar chart renderer.

use super::error::RenderResult;
use super::target::DrawTarget;
use super::{placeholder, LOAD_FAILED_TEXT};
use crate::aggregate::Bucket;
use crate::chart::{BarChart, BarChartConfig};
use crate::dataset::{Dataset, DatasetResult, DatasetSource};

/// Lifecycle of a [`BarRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub enum BarState {
    /// Waiting for the dataset
    Unloaded,
    /// Chart mounted with these buckets
    Drawn(Vec<Bucket<String>>),
    /// Dataset fetch failed; a placeholder is shown
    Failed(String),
}

/// Draws fatalities per condition once, when its dataset arrives
pub struct BarRenderer<T> {
    target: T,
    config: BarChartConfig,
    state: BarState,
}

impl<T: DrawTarget> BarRenderer<T> {
    pub fn new(target: T, config: BarChartConfig) -> Self {
        Self {
            target,
            config,
            state: BarState::Unloaded,
        }
    }

    pub fn state(&self) -> &BarState {
        &self.state
    }

    pub fn config(&self) -> &BarChartConfig {
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

    /// Fetch from `source` and draw
    pub async fn initialize(&mut self, source: &dyn DatasetSource) -> RenderResult<()> {
        if self.state != BarState::Unloaded {
            return Ok(());
        }
        tracing::debug!(target_id = %self.target.id(), source = %source.describe(), "Loading bar chart data");
        let result = source.fetch().await;
        self.on_loaded(result)
    }

    /// Handle the outcome of the dataset fetch.
    ///
    /// A failed fetch is not an error: it leaves a placeholder and moves to
    /// [`BarState::Failed`]. Only a failing target is reported. Once the
    /// chart left `Unloaded`, later results are ignored.
    pub fn on_loaded(&mut self, result: DatasetResult<Dataset>) -> RenderResult<()> {
        if self.state != BarState::Unloaded {
            tracing::debug!(target_id = %self.target.id(), "Bar chart already drawn, ignoring load");
            return Ok(());
        }

        match result {
            Ok(dataset) => self.draw(&dataset),
            Err(err) => {
                tracing::warn!(target_id = %self.target.id(), error = %err, "Bar chart data unavailable");
                self.state = BarState::Failed(err.to_string());
                let markup = placeholder(LOAD_FAILED_TEXT, &self.config.frame).to_string();
                self.target.clear()?;
                self.target.mount(&markup)
            }
        }
    }

    fn draw(&mut self, dataset: &Dataset) -> RenderResult<()> {
        let chart = BarChart::from_records(dataset.records(), self.config.clone());
        let markup = chart.to_svg().to_string();

        self.target.clear()?;
        self.target.mount(&markup)?;

        tracing::info!(
            target_id = %self.target.id(),
            bars = chart.buckets().len(),
            "Bar chart drawn"
        );
        self.state = BarState::Drawn(chart.buckets().to_vec());
        Ok(())
    }
}
