use serde::{Deserialize, Serialize};

use crate::commands::common::parse_timestamp;
use crate::types::ReportedStatus;

// ── Request DTOs ────────────────────────────────────────────────────────────

/// Body of `POST /api/agents/status`.
///
/// Required fields are `Option` so a missing one is reported by name instead
/// of as a generic deserialization failure.
#[derive(Debug, Deserialize, garde::Validate)]
pub struct StatusPushRequest {
    #[garde(required, length(min = 1, max = 128), custom(not_blank))]
    pub agent_id: Option<String>,
    #[garde(required, custom(valid_status))]
    pub status: Option<String>,
    #[garde(length(max = 2000))]
    pub current_task: Option<String>,
    #[garde(custom(valid_timestamp))]
    pub last_activity: Option<String>,
}

fn not_blank(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(raw) if raw.trim().is_empty() => Err(garde::Error::new("must not be blank")),
        _ => Ok(()),
    }
}

fn valid_status(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(raw) => raw
            .parse::<ReportedStatus>()
            .map(|_| ())
            .map_err(garde::Error::new),
        None => Ok(()),
    }
}

fn valid_timestamp(value: &Option<String>, _ctx: &()) -> garde::Result {
    match value {
        Some(raw) if parse_timestamp(raw).is_none() => Err(garde::Error::new(format!(
            "'{raw}' is not an ISO-8601 timestamp"
        ))),
        _ => Ok(()),
    }
}

// ── Response DTOs ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusPushResponse {
    pub ok: bool,
    pub agent_id: String,
    pub status: ReportedStatus,
}
