//! Renderers
//!
//! Stateful chart components. A renderer loads the dataset once, keeps the
//! records it was given and redraws its own [`DrawTarget`] on demand. The
//! [`ViewShell`] composes both charts and keeps a failure in one from
//! reaching the other.

pub mod bar;
pub mod error;
pub mod line;
pub mod shell;
pub mod target;

pub use bar::{BarRenderer, BarState};
pub use error::{RenderError, RenderResult};
pub use line::{LineRenderer, LineState};
pub use shell::{ViewShell, BAR_TARGET_ID, LINE_TARGET_ID};
pub use target::{DrawTarget, SvgBuffer};

use crate::chart::svg::{num, svg_root, Element};
use crate::chart::Frame;

/// Message shown when a chart's data could not be loaded
pub const LOAD_FAILED_TEXT: &str = "Unable to load chart data";

/// Visible stand-in for a chart that could not be drawn
pub fn placeholder(message: &str, frame: &Frame) -> Element {
    svg_root(frame.width, frame.height)
        .attr("class", "chart-placeholder")
        .attr("role", "alert")
        .child(
            Element::new("text")
                .attr("class", "placeholder")
                .attr("x", num(frame.width / 2.0))
                .attr("y", num(frame.height / 2.0))
                .attr("text-anchor", "middle")
                .text(message),
        )
}

/// Turn a failed draw into a logged placeholder on `target`.
///
/// Returns whether `result` was a success. Errors from mounting the
/// placeholder itself are logged and dropped.
pub fn contain<T>(target: &mut T, frame: &Frame, result: RenderResult<()>) -> bool
where
    T: DrawTarget + ?Sized,
{
    let err = match result {
        Ok(()) => return true,
        Err(err) => err,
    };

    tracing::error!(target_id = %target.id(), error = %err, "Chart draw failed");

    let markup = placeholder(&err.to_string(), frame).to_string();
    if let Err(e) = target.clear().and_then(|_| target.mount(&markup)) {
        tracing::warn!(target_id = %target.id(), error = %e, "Could not show placeholder");
    }
    false
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::BarChartConfig;

    #[test]
    fn test_contain_mounts_placeholder() {
        let frame = BarChartConfig::default().frame;
        let mut target = SvgBuffer::new("bar-chart");

        assert!(contain(&mut target, &frame, Ok(())));
        assert!(target.is_empty());

        let failed = Err(RenderError::target("bar-chart", "boom"));
        assert!(!contain(&mut target, &frame, failed));
        assert!(target.contents().contains("chart-placeholder"));
        assert!(target.contents().contains("boom"));
    }

    #[test]
    fn test_contain_survives_dead_target() {
        let frame = BarChartConfig::default().frame;
        let mut target = testing::FlakyTarget::new("line-chart", 0);
        let failed = Err(RenderError::target("line-chart", "boom"));
        assert!(!contain(&mut target, &frame, failed));
        assert!(target.mounted.is_empty());
    }
}
