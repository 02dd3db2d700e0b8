//! Helpers shared by the CLI commands and the web API.

pub mod csv;
pub mod time;

pub use time::{format_time_ago, now_rfc3339, parse_timestamp};

/// Compact token count for tables ("950", "12.3k", "4.1M").
pub fn format_tokens(tokens: u64) -> String {
    if tokens >= 1_000_000 {
        format!("{:.1}M", tokens as f64 / 1_000_000.0)
    } else if tokens >= 1_000 {
        format!("{:.1}k", tokens as f64 / 1_000.0)
    } else {
        tokens.to_string()
    }
}
