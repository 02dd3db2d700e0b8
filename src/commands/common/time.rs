//! Time parsing and formatting utilities.

use chrono::{DateTime, Utc};

/// Milliseconds in a minute
pub const MILLIS_PER_MINUTE: i64 = 60 * 1000;

/// Milliseconds in an hour
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;

/// Milliseconds in a day
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Parse an ISO8601/RFC3339 timestamp string into a DateTime.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Current server time as RFC3339 (UTC, millisecond precision).
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Format how long ago `then_ms` was relative to `now_ms` (e.g. "just now", "5m ago", "3d ago").
pub fn format_time_ago(then_ms: i64, now_ms: i64) -> String {
    let age = now_ms.saturating_sub(then_ms);
    if age < MILLIS_PER_MINUTE {
        "just now".to_string()
    } else if age < MILLIS_PER_HOUR {
        format!("{}m ago", age / MILLIS_PER_MINUTE)
    } else if age < MILLIS_PER_DAY {
        format!("{}h ago", age / MILLIS_PER_HOUR)
    } else {
        format!("{}d ago", age / MILLIS_PER_DAY)
    }
}
