//! Bar chart of fatalities per atmospheric condition.
//!
//! Bars enter from the baseline: every `<rect>` starts with height 0 and
//! carries `<animate>` children that grow it to its final size, staggered by
//! bucket order.

use serde::{Deserialize, Serialize};

use super::axis::{bottom_band_axis, left_linear_axis};
use super::frame::{Frame, Margin};
use super::palette::BAR_FILL;
use super::scale::{BandScale, LinearScale};
use super::svg::{num, svg_root, translate, Element};
use crate::aggregate::{by_condition, max_total, Bucket};
use crate::dataset::Record;

/// Rough glyph width used to decide whether band labels collide
const LABEL_CHAR_WIDTH: f64 = 6.0;

/// When to tilt the category labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelRotation {
    /// Rotate only when some label is wider than a band step
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarChartConfig {
    pub frame: Frame,
    pub fill: String,
    pub padding: f64,
    /// Entrance animation length in milliseconds
    pub duration_ms: u64,
    /// Extra start delay per bar in milliseconds
    pub stagger_ms: u64,
    pub label_rotation: LabelRotation,
    pub y_ticks: usize,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            frame: Frame::new(460.0, 450.0, Margin::new(10.0, 30.0, 90.0, 40.0)),
            fill: BAR_FILL.to_string(),
            padding: 0.2,
            duration_ms: 800,
            stagger_ms: 100,
            label_rotation: LabelRotation::Auto,
            y_ticks: 10,
        }
    }
}

/// Final placement of one bar inside the plot area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarGeometry {
    pub key: String,
    pub total: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub delay_ms: u64,
}

#[derive(Debug, Clone)]
pub struct BarChart {
    buckets: Vec<Bucket<String>>,
    config: BarChartConfig,
}

impl BarChart {
    pub fn new(buckets: Vec<Bucket<String>>, config: BarChartConfig) -> Self {
        Self { buckets, config }
    }

    /// Aggregate `records` by condition and lay them out
    pub fn from_records(records: &[Record], config: BarChartConfig) -> Self {
        Self::new(by_condition(records), config)
    }

    pub fn buckets(&self) -> &[Bucket<String>] {
        &self.buckets
    }

    pub fn config(&self) -> &BarChartConfig {
        &self.config
    }

    pub fn x_scale(&self) -> BandScale {
        let domain = self.buckets.iter().map(|b| b.key.clone()).collect();
        BandScale::new(domain, (0.0, self.config.frame.inner_width()), self.config.padding)
    }

    /// `[0, max total]` onto the plot height; an all-zero chart uses `[0, 1]`
    pub fn y_scale(&self) -> LinearScale {
        let max = max_total(&self.buckets);
        let top = if max > 0.0 { max } else { 1.0 };
        LinearScale::new((0.0, top), (self.config.frame.inner_height(), 0.0))
    }

    pub fn bars(&self) -> Vec<BarGeometry> {
        let x = self.x_scale();
        let y = self.y_scale();
        let baseline = self.config.frame.inner_height();

        self.buckets
            .iter()
            .enumerate()
            .filter_map(|(i, bucket)| {
                let left = x.position(&bucket.key)?;
                let top = y.map(bucket.total);
                Some(BarGeometry {
                    key: bucket.key.clone(),
                    total: bucket.total,
                    x: left,
                    y: top,
                    width: x.bandwidth(),
                    height: (baseline - top).max(0.0),
                    delay_ms: self.config.stagger_ms * i as u64,
                })
            })
            .collect()
    }

    pub fn rotates_labels(&self) -> bool {
        match self.config.label_rotation {
            LabelRotation::Always => true,
            LabelRotation::Never => false,
            LabelRotation::Auto => {
                let step = self.x_scale().step();
                self.buckets
                    .iter()
                    .any(|b| b.key.chars().count() as f64 * LABEL_CHAR_WIDTH > step)
            }
        }
    }

    pub fn to_svg(&self) -> Element {
        let frame = &self.config.frame;
        let baseline = frame.inner_height();

        let mut bars = Element::new("g").attr("class", "bars");
        for bar in self.bars() {
            bars.push(self.bar_element(&bar, baseline));
        }

        let plot = Element::new("g")
            .attr("transform", translate(frame.margin.left, frame.margin.top))
            .child(bottom_band_axis(&self.x_scale(), baseline, self.rotates_labels()))
            .child(left_linear_axis(&self.y_scale(), self.config.y_ticks))
            .child(bars);

        svg_root(frame.width, frame.height)
            .attr("class", "bar-chart")
            .child(plot)
    }

    fn bar_element(&self, bar: &BarGeometry, baseline: f64) -> Element {
        let dur = format!("{}ms", self.config.duration_ms);
        let begin = format!("{}ms", bar.delay_ms);

        Element::new("rect")
            .attr("class", "bar")
            .attr("data-key", &bar.key)
            .attr("x", num(bar.x))
            .attr("width", num(bar.width))
            .attr("y", num(baseline))
            .attr("height", 0)
            .attr("fill", &self.config.fill)
            .child(Element::new("title").text(format!("{}: {}", bar.key, bar.total)))
            .child(
                Element::new("animate")
                    .attr("attributeName", "y")
                    .attr("from", num(baseline))
                    .attr("to", num(bar.y))
                    .attr("begin", &begin)
                    .attr("dur", &dur)
                    .attr("fill", "freeze"),
            )
            .child(
                Element::new("animate")
                    .attr("attributeName", "height")
                    .attr("from", 0)
                    .attr("to", num(bar.height))
                    .attr("begin", &begin)
                    .attr("dur", &dur)
                    .attr("fill", "freeze"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Vec<Record> {
        vec![
            Record::new("Clear", 2, None, "Male"),
            Record::new("Clear", 3, None, "Male"),
            Record::new("Rain", 1, None, "Female"),
            Record::new("Fog", 4, None, "Unknown"),
        ]
    }

    #[test]
    fn test_one_rect_per_bucket() {
        let chart = BarChart::from_records(&scenario(), BarChartConfig::default());
        let svg = chart.to_svg();

        let rects = svg.find_all("rect");
        assert_eq!(rects.len(), 3);
        let keys: Vec<&str> = rects.iter().filter_map(|r| r.get_attr("data-key")).collect();
        assert_eq!(keys, vec!["Clear", "Rain", "Fog"]);
    }

    #[test]
    fn test_bars_start_at_baseline() {
        let chart = BarChart::from_records(&scenario(), BarChartConfig::default());
        let svg = chart.to_svg();

        for rect in svg.find_all("rect") {
            assert_eq!(rect.get_attr("height"), Some("0"));
            assert_eq!(rect.get_attr("y"), Some("350"));
            assert_eq!(rect.get_attr("fill"), Some("#69b3a2"));
        }
    }

    #[test]
    fn test_stagger_delays() {
        let chart = BarChart::from_records(&scenario(), BarChartConfig::default());
        let delays: Vec<u64> = chart.bars().iter().map(|b| b.delay_ms).collect();
        assert_eq!(delays, vec![0, 100, 200]);

        let svg = chart.to_svg();
        let begins: Vec<&str> = svg
            .find_all("animate")
            .iter()
            .filter(|a| a.get_attr("attributeName") == Some("height"))
            .filter_map(|a| a.get_attr("begin"))
            .collect();
        assert_eq!(begins, vec!["0ms", "100ms", "200ms"]);
        assert!(svg
            .find_all("animate")
            .iter()
            .all(|a| a.get_attr("dur") == Some("800ms")));
    }

    #[test]
    fn test_tallest_bar_fills_plot() {
        let chart = BarChart::from_records(&scenario(), BarChartConfig::default());
        let clear = &chart.bars()[0];
        assert_eq!(clear.total, 5.0);
        assert_eq!(clear.y, 0.0);
        assert_eq!(clear.height, 350.0);
    }

    #[test]
    fn test_empty_and_zero_totals() {
        let empty = BarChart::new(Vec::new(), BarChartConfig::default());
        assert!(empty.bars().is_empty());
        assert!(empty.to_svg().find_all("rect").is_empty());

        let zero = BarChart::new(vec![Bucket::new("Clear".to_string(), 0.0)], BarChartConfig::default());
        assert_eq!(zero.bars()[0].height, 0.0);
    }

    #[test]
    fn test_label_rotation_policy() {
        let crowded: Vec<Bucket<String>> = (0..12)
            .map(|i| Bucket::new(format!("Blowing Sand, Soil, Dirt {}", i), 1.0))
            .collect();
        let chart = BarChart::new(crowded, BarChartConfig::default());
        assert!(chart.rotates_labels());

        let sparse = vec![Bucket::new("Fog".to_string(), 1.0)];
        assert!(!BarChart::new(sparse.clone(), BarChartConfig::default()).rotates_labels());

        let always = BarChartConfig {
            label_rotation: LabelRotation::Always,
            ..BarChartConfig::default()
        };
        assert!(BarChart::new(sparse.clone(), always).rotates_labels());

        let never = BarChartConfig {
            label_rotation: LabelRotation::Never,
            ..BarChartConfig::default()
        };
        let chart = BarChart::new(sparse, never);
        assert!(!chart.rotates_labels());
    }

    #[test]
    fn test_markup_escapes_keys() {
        let chart = BarChart::new(
            vec![Bucket::new("Sleet & Hail".to_string(), 2.0)],
            BarChartConfig::default(),
        );
        let markup = chart.to_svg().to_string();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains("Sleet &amp; Hail"));
    }
}
