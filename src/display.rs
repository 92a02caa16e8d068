//! Text formatting shared by the lineup and scoreboard views.

use chrono::{Datelike, NaiveDate};

pub const PLACEHOLDER: &str = "--";

/// `2025-01-04` -> `01/04/2025`; missing -> `--`; anything else is returned unchanged.
pub fn format_date(raw: Option<&str>) -> String {
    let Some(value) = raw.filter(|v| !v.is_empty()) else {
        return PLACEHOLDER.to_string();
    };
    let mut parts = value.splitn(3, '-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(y), Some(m), Some(d)) if !y.is_empty() && !m.is_empty() && !d.is_empty() => {
            format!("{}/{}/{}", m, d, y)
        }
        _ => value.to_string(),
    }
}

pub fn format_week_date(date: Option<NaiveDate>) -> String {
    format_date(date.map(|d| d.to_string()).as_deref())
}

/// Game date as `M/D` without padding.
pub fn format_short_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => format!("{}/{}", d.month(), d.day()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Fixed-precision number, `--` when missing or not finite.
pub fn format_number(value: Option<f64>, digits: usize) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.*}", digits, normalize_zero(v)),
        None => PLACEHOLDER.to_string(),
    }
}

/// Shortest natural rendering: `50`, `12.5`.
pub fn format_points(value: f64) -> String {
    format!("{}", normalize_zero(value))
}

// Keeps `-0` out of rendered text.
fn normalize_zero(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v }
}
