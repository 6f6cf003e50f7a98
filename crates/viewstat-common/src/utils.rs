//! Shared formatting helpers.

use chrono::NaiveDate;

/// Formats a minute count as hours and minutes, e.g. `90.0` -> `"1h 30m"`.
pub fn format_minutes(minutes: f64) -> String {
    let total = minutes.max(0.0).round() as u64;
    let (hours, mins) = (total / 60, total % 60);
    if hours == 0 {
        format!("{mins}m")
    } else {
        format!("{hours}h {mins:02}m")
    }
}

/// Short axis label for a date, e.g. `"Mar 2021"`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}
