//! Session scan and status derivation for the agent fleet.
//!
//! Each agent directory under the data root may hold `sessions/sessions.json`.
//! A summary is rebuilt from that file on every read; nothing is cached.

pub mod fleet;
pub mod sessions;
pub mod status;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::agents::AgentDirectory;
use crate::types::LivenessSummary;

pub use fleet::list_agent_directories;
pub use sessions::{aggregate, read_sessions, sessions_path, SessionReadError, SessionTotals};
pub use status::{derive_status, IDLE_WINDOW_MS, WORKING_WINDOW_MS};

/// Default overall deadline for one fleet read.
pub const DEFAULT_FLEET_TIMEOUT: Duration =
    Duration::from_millis(crate::config::DEFAULT_FLEET_TIMEOUT_MS);

#[derive(Debug, Clone)]
pub struct LivenessAggregator {
    data_root: PathBuf,
    directory: Arc<AgentDirectory>,
    deadline: Option<Duration>,
}

impl LivenessAggregator {
    pub fn new(data_root: impl Into<PathBuf>, directory: Arc<AgentDirectory>) -> Self {
        Self {
            data_root: data_root.into(),
            directory,
            deadline: Some(DEFAULT_FLEET_TIMEOUT),
        }
    }

    /// Overall deadline for `summarize_fleet`; `None` waits for every agent.
    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline
    }

    pub fn display_name<'a>(&'a self, directory: &'a str) -> &'a str {
        self.directory.display_name(directory)
    }

    /// Degraded summary used whenever an agent's data cannot be read in time.
    pub fn empty_summary(&self, directory: &str) -> LivenessSummary {
        LivenessSummary::empty(directory, self.display_name(directory))
    }

    /// Summarize one agent. Never fails: unreadable data yields the empty summary.
    pub async fn summarize_agent(&self, directory: &str, now_ms: i64) -> LivenessSummary {
        let path = sessions_path(&self.data_root, directory);
        let sessions = match read_sessions(&path).await {
            Ok(sessions) => sessions,
            Err(err) => {
                debug!(agent = directory, error = %err, "No readable sessions");
                return self.empty_summary(directory);
            }
        };

        let totals = aggregate(&sessions);
        LivenessSummary {
            directory: directory.to_string(),
            display_name: self.display_name(directory).to_string(),
            session_count: totals.session_count,
            last_active: totals.last_active,
            total_tokens: totals.total_tokens,
            status: derive_status(totals.last_active, now_ms),
        }
    }
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
