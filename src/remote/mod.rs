//! Hosted relational store holding pushed agent status, tasks, activity,
//! token usage and knowledge entries.

pub mod memory;
pub mod postgrest;

use async_trait::async_trait;

use crate::types::{ActivityEntry, AgentStatusRow, KnowledgeEntry, Task, TokenUsage};

pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("remote store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("remote store returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("remote store payload could not be decoded: {0}")]
    Decode(String),
}

/// Row selection for list reads: equality filters plus an optional row cap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub eq: Vec<(String, String)>,
    pub limit: Option<usize>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add `column = value`; `None` leaves the query untouched.
    pub fn eq(mut self, column: &str, value: Option<&str>) -> Self {
        if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.eq.push((column.to_string(), value.to_string()));
        }
        self
    }
}

/// Table names and their newest-first ordering column.
pub mod tables {
    pub const AGENT_STATUS: &str = "agent_status";
    pub const TASKS: &str = "tasks";
    pub const ACTIVITY: &str = "activity_log";
    pub const TOKEN_USAGE: &str = "token_usage";
    pub const KNOWLEDGE: &str = "knowledge";

    pub const TASKS_ORDER: &str = "updated_at";
    pub const ACTIVITY_ORDER: &str = "created_at";
    pub const TOKEN_USAGE_ORDER: &str = "recorded_at";
    pub const KNOWLEDGE_ORDER: &str = "created_at";
}

#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Insert or replace the row keyed by `row.agent_id`.
    async fn upsert_agent_status(&self, row: AgentStatusRow) -> StoreResult<()>;
    /// All pushed status rows, ordered by agent id.
    async fn list_agent_status(&self) -> StoreResult<Vec<AgentStatusRow>>;
    async fn list_tasks(&self, query: &ListQuery) -> StoreResult<Vec<Task>>;
    async fn list_activity(&self, query: &ListQuery) -> StoreResult<Vec<ActivityEntry>>;
    async fn list_token_usage(&self, query: &ListQuery) -> StoreResult<Vec<TokenUsage>>;
    async fn list_knowledge(&self, query: &ListQuery) -> StoreResult<Vec<KnowledgeEntry>>;
}

#[cfg(test)]
mod tests;
