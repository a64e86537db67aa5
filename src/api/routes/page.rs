//! Page Route
//!
//! GET / - both charts rendered inline, with the filter buttons as links.
//! A failed dataset load still yields a page, with placeholders in place of
//! the charts.

use axum::{
    extract::{Query, State},
    response::Html,
};
use std::sync::Arc;

use crate::api::dto::FilterQuery;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::chart::svg::escape;
use crate::render::{DrawTarget, SvgBuffer, ViewShell, BAR_TARGET_ID, LINE_TARGET_ID};

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FilterQuery>,
) -> ApiResult<Html<String>> {
    let filter = query.parse()?;

    let mut shell = ViewShell::new(
        SvgBuffer::new(BAR_TARGET_ID),
        SvgBuffer::new(LINE_TARGET_ID),
        &state.charts,
    )?;

    match state.dataset() {
        Ok(dataset) => shell.mount_loaded(dataset),
        Err(e) => shell.mount_failed(&e.to_string()),
    }
    if !filter.is_all() {
        shell.on_filter_selected(filter.label());
    }

    let categories = shell.line().categories();
    let selected = shell.line().selected().label().to_string();
    let (bar, line) = shell.into_targets();

    Ok(Html(render_page(&bar, &line, &categories, &selected)))
}

fn render_page(bar: &SvgBuffer, line: &SvgBuffer, categories: &[String], selected: &str) -> String {
    let mut buttons = String::new();
    for label in categories {
        let class = if label == selected { "filter active" } else { "filter" };
        buttons.push_str(&format!(
            r#"<a class="{}" href="/?filter={}">{}</a>"#,
            class,
            urlencoding::encode(label),
            escape(label)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>US Car Accidents</title>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
.filters {{ margin: 1rem 0; }}
.filter {{ margin-right: .5rem; padding: .25rem .75rem; border: 1px solid #999; border-radius: 4px; text-decoration: none; color: #333; }}
.filter.active {{ background: #333; color: #fff; }}
</style>
</head>
<body>
<h2>Fatalities by atmospheric condition</h2>
<div id="{bar_id}">{bar}</div>
<h2>Monthly fatalities by gender</h2>
<div class="filters">{buttons}</div>
<div id="{line_id}">{line}</div>
</body>
</html>
"#,
        bar_id = bar.id(),
        bar = bar.contents(),
        buttons = buttons,
        line_id = line.id(),
        line = line.contents(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_link_filters() {
        let bar = SvgBuffer::new(BAR_TARGET_ID);
        let line = SvgBuffer::new(LINE_TARGET_ID);
        let categories = vec!["Not Reported".to_string(), "All".to_string()];

        let page = render_page(&bar, &line, &categories, "All");
        assert!(page.contains(r#"href="/?filter=Not%20Reported""#));
        assert!(page.contains(r#"<a class="filter active" href="/?filter=All">All</a>"#));
        assert!(page.contains(r#"<div id="bar-chart">"#));
        assert!(page.contains(r#"<div id="line-chart">"#));
    }

    #[test]
    fn test_button_labels_are_escaped() {
        let bar = SvgBuffer::new(BAR_TARGET_ID);
        let line = SvgBuffer::new(LINE_TARGET_ID);
        let categories = vec!["<b>".to_string(), "All".to_string()];

        let page = render_page(&bar, &line, &categories, "All");
        assert!(page.contains(">&lt;b&gt;</a>"));
        assert!(!page.contains("<b>"));
    }
}
