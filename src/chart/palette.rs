//! Chart colors and series tags.

pub const MALE_COLOR: &str = "#1f77b4";
pub const FEMALE_COLOR: &str = "#ff7f0e";
pub const NOT_REPORTED_COLOR: &str = "#2ca02c";
pub const UNKNOWN_COLOR: &str = "#d62728";
pub const DEFAULT_COLOR: &str = "#000000";

pub const BAR_FILL: &str = "#69b3a2";

/// Fixed line color for a gender value
pub fn gender_color(gender: &str) -> &'static str {
    match gender {
        "Male" => MALE_COLOR,
        "Female" => FEMALE_COLOR,
        "Not Reported" => NOT_REPORTED_COLOR,
        "Unknown" => UNKNOWN_COLOR,
        _ => DEFAULT_COLOR,
    }
}

/// CSS-safe identifier for a series key: `"Not Reported"` → `"not-reported"`
pub fn slug(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for c in key.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        "series".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Class list tagging a line so it can be styled or removed later
pub fn series_class(key: &str) -> String {
    format!("line line-{}", slug(key))
}
