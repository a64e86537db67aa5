//! Axes
//!
//! Axis markup in the shape d3's `axisBottom` / `axisLeft` produce: a
//! `domain` path plus one `<g class="tick">` group per tick holding a 6px
//! tick line and its label. Groups are positioned relative to the plot
//! origin; callers translate them into place.

use super::scale::{BandScale, LinearScale, TimeScale};
use super::svg::{num, translate, Element};

const TICK_SIZE: f64 = 6.0;
const TICK_PADDING: f64 = 3.0;
const FONT_SIZE: u32 = 10;

/// Transform applied to crowded band labels
pub const ROTATED_LABEL_TRANSFORM: &str = "translate(-10,0)rotate(-45)";

fn axis_group(class: &str, anchor: &str) -> Element {
    Element::new("g")
        .attr("class", class)
        .attr("fill", "none")
        .attr("font-size", FONT_SIZE)
        .attr("font-family", "sans-serif")
        .attr("text-anchor", anchor)
}

fn bottom_tick(x: f64, label: String) -> Element {
    Element::new("g")
        .attr("class", "tick")
        .attr("opacity", 1)
        .attr("transform", translate(x, 0.0))
        .child(
            Element::new("line")
                .attr("stroke", "currentColor")
                .attr("y2", num(TICK_SIZE)),
        )
        .child(
            Element::new("text")
                .attr("fill", "currentColor")
                .attr("y", num(TICK_SIZE + TICK_PADDING))
                .attr("dy", "0.71em")
                .text(label),
        )
}

fn horizontal_domain(r0: f64, r1: f64) -> Element {
    Element::new("path")
        .attr("class", "domain")
        .attr("stroke", "currentColor")
        .attr(
            "d",
            format!("M{},{}V0H{}V{}", num(r0), num(TICK_SIZE), num(r1), num(TICK_SIZE)),
        )
}

/// Category axis under a bar chart, placed at `height` below the plot origin.
///
/// With `rotate` set, labels are anchored at their end and tilted 45 degrees
/// so long condition names do not overlap.
pub fn bottom_band_axis(scale: &BandScale, height: f64, rotate: bool) -> Element {
    let mut axis = axis_group("axis axis-x", "middle").attr("transform", translate(0.0, height));

    let (r0, r1) = band_extent(scale);
    axis.push(horizontal_domain(r0, r1));

    for key in scale.domain() {
        let Some(x) = scale.center(key) else {
            continue;
        };
        let mut tick = bottom_tick(x, key.clone());
        if rotate {
            tick = rotate_label(tick);
        }
        axis.push(tick);
    }
    axis
}

fn band_extent(scale: &BandScale) -> (f64, f64) {
    let Some(first) = scale.domain().first().and_then(|k| scale.position(k)) else {
        return (0.0, 0.0);
    };
    let padding = scale.step() - scale.bandwidth();
    let n = scale.domain().len() as f64;
    (first - padding, first + scale.step() * n)
}

fn rotate_label(tick: Element) -> Element {
    let mut rotated = Element::new("g");
    for (key, value) in ["class", "opacity", "transform"]
        .iter()
        .filter_map(|k| tick.get_attr(k).map(|v| (*k, v.to_string())))
    {
        rotated.set_attr(key, value);
    }
    for child in tick.elements() {
        let child = if child.name() == "text" {
            child
                .clone()
                .attr("transform", ROTATED_LABEL_TRANSFORM)
                .attr("text-anchor", "end")
        } else {
            child.clone()
        };
        rotated.push(child);
    }
    rotated
}

/// Value axis on the left edge of the plot
pub fn left_linear_axis(scale: &LinearScale, count: usize) -> Element {
    let mut axis = axis_group("axis axis-y", "end");

    let (r0, r1) = scale.range();
    axis.push(
        Element::new("path")
            .attr("class", "domain")
            .attr("stroke", "currentColor")
            .attr(
                "d",
                format!("M-{},{}H0V{}H-{}", num(TICK_SIZE), num(r0), num(r1), num(TICK_SIZE)),
            ),
    );

    let step = scale.tick_step(count);
    for value in scale.ticks(count) {
        axis.push(
            Element::new("g")
                .attr("class", "tick")
                .attr("opacity", 1)
                .attr("transform", translate(0.0, scale.map(value)))
                .child(
                    Element::new("line")
                        .attr("stroke", "currentColor")
                        .attr("x2", num(-TICK_SIZE)),
                )
                .child(
                    Element::new("text")
                        .attr("fill", "currentColor")
                        .attr("x", num(-(TICK_SIZE + TICK_PADDING)))
                        .attr("dy", "0.32em")
                        .text(format_tick(value, step)),
                ),
        );
    }
    axis
}

/// Month axis under a line chart, one tick per month labelled `Jan`, `Feb`...
pub fn bottom_time_axis(scale: &TimeScale, height: f64, range: (f64, f64)) -> Element {
    let mut axis = axis_group("axis axis-x", "middle").attr("transform", translate(0.0, height));
    axis.push(horizontal_domain(range.0, range.1));

    for month in scale.month_ticks() {
        axis.push(bottom_tick(scale.map(month), month.short_name()));
    }
    axis
}

/// Tick label for `value`: thousands separators, and as many decimals as the
/// tick `step` needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 && step.is_finite() {
        (-step.log10().floor()) as usize
    } else {
        0
    };

    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if let Some(frac) = frac_part {
        grouped.push('.');
        grouped.push_str(frac);
    }

    let is_zero = grouped.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        // d3 uses the Unicode minus sign
        format!("\u{2212}{}", grouped)
    } else {
        grouped
    }
}
