//! Human-readable rendering of alarm times.

use std::time::Duration;

use chrono::{DateTime, Local, Utc};

use crate::time_parse::DATE_TIME_FORMAT;

/// Render a remaining duration as `1h 2m 3s`, dropping zero units.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }
    parts.join(" ")
}

/// Render an instant in local time.
pub fn format_local(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format(DATE_TIME_FORMAT).to_string()
}
