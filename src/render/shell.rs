//! View Shell
//!
//! Top-level composition of the two charts. Each renderer gets its own
//! container and loads its own copy of the dataset; the shell only routes
//! button presses and contains draw failures.

use super::bar::BarRenderer;
use super::contain;
use super::error::{RenderError, RenderResult};
use super::line::LineRenderer;
use super::target::DrawTarget;
use crate::chart::ChartConfig;
use crate::dataset::{Dataset, DatasetError, DatasetSource};

pub const BAR_TARGET_ID: &str = "bar-chart";
pub const LINE_TARGET_ID: &str = "line-chart";

pub struct ViewShell<B, L> {
    bar: BarRenderer<B>,
    line: LineRenderer<L>,
}

impl<B: DrawTarget, L: DrawTarget> ViewShell<B, L> {
    /// Compose both charts. The targets must have distinct ids.
    pub fn new(bar_target: B, line_target: L, config: &ChartConfig) -> RenderResult<Self> {
        if bar_target.id() == line_target.id() {
            return Err(RenderError::DuplicateTarget(bar_target.id().to_string()));
        }

        Ok(Self {
            bar: BarRenderer::new(bar_target, config.bar.clone()),
            line: LineRenderer::new(line_target, config.line.clone()),
        })
    }

    pub fn bar(&self) -> &BarRenderer<B> {
        &self.bar
    }

    pub fn line(&self) -> &LineRenderer<L> {
        &self.line
    }

    /// Let each renderer fetch from `source` on its own
    pub async fn initialize(&mut self, source: &dyn DatasetSource) {
        let result = self.bar.initialize(source).await;
        self.contain_bar(result);

        let result = self.line.initialize(source).await;
        self.contain_line(result);
    }

    /// Feed an already loaded dataset to both renderers
    pub fn mount_loaded(&mut self, dataset: &Dataset) {
        let result = self.bar.on_loaded(Ok(dataset.clone()));
        self.contain_bar(result);

        let result = self.line.on_loaded(Ok(dataset.clone()));
        self.contain_line(result);
    }

    /// Show both charts as unavailable
    pub fn mount_failed(&mut self, reason: &str) {
        let result = self.bar.on_loaded(Err(DatasetError::Unavailable(reason.to_string())));
        self.contain_bar(result);

        let result = self.line.on_loaded(Err(DatasetError::Unavailable(reason.to_string())));
        self.contain_line(result);
    }

    /// Route a filter button press to the line chart
    pub fn on_filter_selected(&mut self, label: &str) {
        let result = self.line.on_filter_selected(label).map(|_| ());
        self.contain_line(result);
    }

    /// Give back both targets, bar first
    pub fn into_targets(self) -> (B, L) {
        (self.bar.into_target(), self.line.into_target())
    }

    fn contain_bar(&mut self, result: RenderResult<()>) {
        let frame = self.bar.config().frame;
        contain(self.bar.target_mut(), &frame, result);
    }

    fn contain_line(&mut self, result: RenderResult<()>) {
        let frame = self.line.config().frame;
        contain(self.line.target_mut(), &frame, result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Record, StaticSource};
    use crate::render::testing::FlakyTarget;
    use crate::render::{BarState, SvgBuffer};

    const CSV: &str = "Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender\n\
                       Clear,2,2020-01-05,Male\n\
                       Rain,1,2020-02-01,Female\n";

    fn dataset() -> Dataset {
        Dataset::from(vec![
            Record::new("Clear", 2, chrono::NaiveDate::from_ymd_opt(2020, 1, 5), "Male"),
            Record::new("Rain", 1, chrono::NaiveDate::from_ymd_opt(2020, 2, 1), "Female"),
        ])
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = ViewShell::new(
            SvgBuffer::new("chart"),
            SvgBuffer::new("chart"),
            &ChartConfig::default(),
        );
        assert!(matches!(result, Err(RenderError::DuplicateTarget(id)) if id == "chart"));
    }

    #[tokio::test]
    async fn test_initialize_mounts_both_charts() {
        let mut shell = ViewShell::new(
            SvgBuffer::new(BAR_TARGET_ID),
            SvgBuffer::new(LINE_TARGET_ID),
            &ChartConfig::default(),
        )
        .unwrap();
        shell.initialize(&StaticSource::new(CSV)).await;

        assert!(matches!(shell.bar().state(), BarState::Drawn(_)));
        assert!(shell.line().is_loaded());

        let (bar, line) = shell.into_targets();
        assert!(bar.contents().contains("class=\"bar-chart\""));
        assert!(line.contents().contains("class=\"line-chart\""));
    }

    #[test]
    fn test_filter_routes_to_line_only() {
        let mut shell = ViewShell::new(
            SvgBuffer::new(BAR_TARGET_ID),
            SvgBuffer::new(LINE_TARGET_ID),
            &ChartConfig::default(),
        )
        .unwrap();
        shell.mount_loaded(&dataset());
        shell.on_filter_selected("Female");

        assert_eq!(shell.line().selected().label(), "Female");
        let (bar, line) = shell.into_targets();
        assert_eq!(bar.mount_count(), 1);
        assert_eq!(line.mount_count(), 2);
    }

    #[test]
    fn test_failed_draw_is_contained() {
        // The line target takes the initial chart, then refuses the redraw
        let mut shell = ViewShell::new(
            SvgBuffer::new(BAR_TARGET_ID),
            FlakyTarget::new(LINE_TARGET_ID, 1),
            &ChartConfig::default(),
        )
        .unwrap();
        shell.mount_loaded(&dataset());
        shell.on_filter_selected("Male");

        assert!(matches!(shell.bar().state(), BarState::Drawn(_)));
        let (_, line) = shell.into_targets();
        assert_eq!(line.mounted.len(), 1);
    }

    #[test]
    fn test_mount_failed_shows_placeholders() {
        let mut shell = ViewShell::new(
            SvgBuffer::new(BAR_TARGET_ID),
            SvgBuffer::new(LINE_TARGET_ID),
            &ChartConfig::default(),
        )
        .unwrap();
        shell.mount_failed("no dataset");
        shell.on_filter_selected("Male");

        assert!(matches!(shell.bar().state(), BarState::Failed(_)));
        assert!(!shell.line().is_loaded());
        let (bar, line) = shell.into_targets();
        assert!(bar.contents().contains("chart-placeholder"));
        assert!(line.contents().contains("chart-placeholder"));
        assert_eq!(line.mount_count(), 1);
    }
}
