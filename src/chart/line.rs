//! Monthly fatalities line chart, optionally split per gender.

use serde::{Deserialize, Serialize};

use super::axis::{bottom_time_axis, left_linear_axis};
use super::frame::{Frame, Margin};
use super::palette::{gender_color, series_class};
use super::scale::{LinearScale, TimeScale};
use super::svg::{num, svg_root, translate, Element};
use crate::aggregate::{by_month, distinct_genders, max_total, Bucket, Filter, Month};
use crate::dataset::Record;

/// Text shown when the selected subset has no dated records
pub const NO_DATA_TEXT: &str = "No data";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineChartConfig {
    pub frame: Frame,
    pub stroke_width: f64,
    pub y_ticks: usize,
}

impl Default for LineChartConfig {
    fn default() -> Self {
        Self {
            frame: Frame::new(800.0, 500.0, Margin::new(10.0, 30.0, 50.0, 60.0)),
            stroke_width: 2.5,
            y_ticks: 10,
        }
    }
}

/// One drawn line
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineSeries {
    /// Gender the line represents
    pub key: String,
    pub color: &'static str,
    pub points: Vec<Bucket<Month>>,
}

impl LineSeries {
    fn new(key: &str, points: Vec<Bucket<Month>>) -> Self {
        Self {
            key: key.to_string(),
            color: gender_color(key),
            points,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LineChart {
    filter: Filter,
    combined: Vec<Bucket<Month>>,
    series: Vec<LineSeries>,
    config: LineChartConfig,
}

impl LineChart {
    /// Aggregate the records selected by `filter` into monthly series.
    ///
    /// `All` yields one series per gender in the full record set; a single
    /// gender yields exactly one series, empty if nobody matches.
    pub fn build(records: &[Record], filter: &Filter, config: LineChartConfig) -> Self {
        let combined = by_month(filter.apply(records));

        let series = match filter {
            Filter::All => distinct_genders(records)
                .iter()
                .map(|gender| {
                    let points = by_month(records.iter().filter(|r| r.gender == *gender));
                    LineSeries::new(gender, points)
                })
                .collect(),
            Filter::Gender(gender) => vec![LineSeries::new(gender, combined.clone())],
        };

        Self {
            filter: filter.clone(),
            combined,
            series,
            config,
        }
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn series(&self) -> &[LineSeries] {
        &self.series
    }

    /// Monthly totals over the whole filtered subset
    pub fn combined(&self) -> &[Bucket<Month>] {
        &self.combined
    }

    pub fn is_empty(&self) -> bool {
        self.combined.is_empty()
    }

    fn x_scale(&self) -> Option<TimeScale> {
        TimeScale::spanning(
            self.combined.iter().map(|b| b.key),
            (0.0, self.config.frame.inner_width()),
        )
    }

    fn y_scale(&self) -> LinearScale {
        let max = max_total(&self.combined);
        let top = if max > 0.0 { max } else { 1.0 };
        LinearScale::new((0.0, top), (self.config.frame.inner_height(), 0.0))
    }

    pub fn to_svg(&self) -> Element {
        let frame = &self.config.frame;
        let width = frame.inner_width();
        let height = frame.inner_height();
        let y = self.y_scale();

        let mut plot = Element::new("g")
            .attr("transform", translate(frame.margin.left, frame.margin.top))
            .attr("data-filter", self.filter.label());

        match self.x_scale() {
            Some(x) => {
                plot.push(bottom_time_axis(&x, height, (0.0, width)));
                plot.push(left_linear_axis(&y, self.config.y_ticks));

                for series in self.series.iter().filter(|s| !s.points.is_empty()) {
                    let points: Vec<(f64, f64)> = series
                        .points
                        .iter()
                        .map(|b| (x.map(b.key), y.map(b.total)))
                        .collect();

                    plot.push(
                        Element::new("path")
                            .attr("class", series_class(&series.key))
                            .attr("data-series", &series.key)
                            .attr("fill", "none")
                            .attr("stroke", series.color)
                            .attr("stroke-width", num(self.config.stroke_width))
                            .attr("d", line_path(&points)),
                    );
                }
            }
            None => {
                plot.push(left_linear_axis(&y, self.config.y_ticks));
                plot.push(
                    Element::new("text")
                        .attr("class", "no-data")
                        .attr("x", num(width / 2.0))
                        .attr("y", num(height / 2.0))
                        .attr("text-anchor", "middle")
                        .text(NO_DATA_TEXT),
                );
            }
        }

        svg_root(frame.width, frame.height)
            .attr("class", "line-chart")
            .child(plot)
    }
}

/// Path data joining `points` with straight segments: `M0,10L5,20...`
pub fn line_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d.push(if i == 0 { 'M' } else { 'L' });
        d.push_str(&num(*x));
        d.push(',');
        d.push_str(&num(*y));
    }
    d
}
