use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// On-disk configuration (`.clawpulse/config.json` or `~/.config/clawpulse/config.json`).
///
/// Every key is optional so a local file can override a single value of the global one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClawPulseConfig {
    /// Root directory holding one subdirectory per agent
    pub data_root: Option<String>,
    /// HTTP port for `clawpulse serve`
    pub port: Option<u16>,
    /// Overall deadline for a fleet read, in milliseconds (0 disables it)
    pub fleet_timeout_ms: Option<u64>,
    /// Base URL of the hosted store (e.g. `https://xyz.supabase.co`)
    pub remote_url: Option<String>,
    /// API key sent as `apikey` and bearer token
    pub remote_key: Option<String>,
    /// Extra directory -> display name entries
    pub display_names: HashMap<String, String>,
}

// ── Session records ─────────────────────────────────────────────────────────

/// One entry of an agent's `sessions.json`, keyed by session id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    /// Epoch milliseconds of the last update
    pub updated_at: Option<i64>,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
    /// Cumulative count for the session; wins over input + output when present
    pub total_tokens: Option<u64>,
}

impl SessionRecord {
    /// Tokens this session contributes to the agent total.
    pub fn effective_tokens(&self) -> u64 {
        match self.total_tokens {
            Some(total) => total,
            None => self
                .input_tokens
                .unwrap_or(0)
                .saturating_add(self.output_tokens.unwrap_or(0)),
        }
    }
}

/// Session id -> record, as stored in `sessions.json`.
pub type SessionCollection = HashMap<String, SessionRecord>;

// ── Liveness ────────────────────────────────────────────────────────────────

/// Status derived from session recency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LivenessStatus {
    Working,
    Idle,
    Offline,
}

impl std::fmt::Display for LivenessStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LivenessStatus::Working => write!(f, "working"),
            LivenessStatus::Idle => write!(f, "idle"),
            LivenessStatus::Offline => write!(f, "offline"),
        }
    }
}

/// Per-agent aggregate rebuilt from `sessions.json` on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LivenessSummary {
    pub directory: String,
    pub display_name: String,
    pub session_count: usize,
    /// Latest `updatedAt` across sessions (epoch ms)
    pub last_active: Option<i64>,
    pub total_tokens: u64,
    pub status: LivenessStatus,
}

impl LivenessSummary {
    /// The summary of an agent with no readable session data.
    pub fn empty(directory: &str, display_name: &str) -> Self {
        Self {
            directory: directory.to_string(),
            display_name: display_name.to_string(),
            session_count: 0,
            last_active: None,
            total_tokens: 0,
            status: LivenessStatus::Offline,
        }
    }
}

// ── Pushed status ───────────────────────────────────────────────────────────

/// Status an agent reports about itself through the push endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportedStatus {
    Working,
    Idle,
    Offline,
    Unknown,
}

impl ReportedStatus {
    pub const ALL: [ReportedStatus; 4] = [
        ReportedStatus::Working,
        ReportedStatus::Idle,
        ReportedStatus::Offline,
        ReportedStatus::Unknown,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportedStatus::Working => "working",
            ReportedStatus::Idle => "idle",
            ReportedStatus::Offline => "offline",
            ReportedStatus::Unknown => "unknown",
        }
    }

    /// Comma-separated list of accepted values, used in rejection messages.
    pub fn valid_values() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for ReportedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportedStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "invalid status '{s}', expected one of: {}",
                    Self::valid_values()
                )
            })
    }
}

// ── Remote store rows ───────────────────────────────────────────────────────

/// Row of the `agent_status` table, keyed by `agent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatusRow {
    pub agent_id: String,
    pub status: ReportedStatus,
    #[serde(default)]
    pub current_task: Option<String>,
    #[serde(default)]
    pub last_activity: Option<String>,
    /// Server time of the upsert (RFC 3339)
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub input_tokens: Option<u64>,
    #[serde(default)]
    pub output_tokens: Option<u64>,
    #[serde(default)]
    pub cost_usd: Option<f64>,
    #[serde(default)]
    pub recorded_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    #[serde(default)]
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests;
