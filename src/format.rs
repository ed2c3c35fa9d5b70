// Display formatting for counts and timestamps.
//
// The backend reports raw counts; the UI compacts them with the CJK
// ten-thousand (万) and hundred-million (亿) group suffixes used on the
// source platforms, one decimal place each.

use chrono::DateTime;

/// Compact a count for display.
///
/// Values >= 1e8 render in units of 亿, values >= 1e4 in units of 万, both
/// to one decimal place; smaller values render as the plain integer with
/// no thousands separators.
pub fn format_count(n: u64) -> String {
    if n >= 100_000_000 {
        format!("{:.1}亿", n as f64 / 100_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}万", n as f64 / 10_000.0)
    } else {
        n.to_string()
    }
}

/// Render a Unix timestamp as a UTC calendar date for the video panel.
///
/// Timestamps chrono cannot represent render as "--".
pub fn format_pubdate(secs: i64) -> String {
    match DateTime::from_timestamp(secs, 0) {
        Some(dt) => dt.format("%Y-%m-%d").to_string(),
        None => "--".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
