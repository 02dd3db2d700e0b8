use crate::types::LivenessStatus;

/// Activity younger than this counts as working (5 minutes).
pub const WORKING_WINDOW_MS: i64 = 5 * 60 * 1000;

/// Activity younger than this (and past the working window) counts as idle (2 hours).
pub const IDLE_WINDOW_MS: i64 = 2 * 60 * 60 * 1000;

/// Classify an agent from its last activity.
///
/// Buckets are closed below and open above: exactly 5 minutes is `Idle`,
/// exactly 2 hours is `Offline`. A timestamp ahead of `now_ms` counts as working.
pub fn derive_status(last_active: Option<i64>, now_ms: i64) -> LivenessStatus {
    let Some(last_active) = last_active else {
        return LivenessStatus::Offline;
    };
    let age = now_ms.saturating_sub(last_active);
    if age < WORKING_WINDOW_MS {
        LivenessStatus::Working
    } else if age < IDLE_WINDOW_MS {
        LivenessStatus::Idle
    } else {
        LivenessStatus::Offline
    }
}
