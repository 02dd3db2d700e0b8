use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::RwLock;

use crate::types::{ActivityEntry, AgentStatusRow, KnowledgeEntry, Task, TokenUsage};

use super::{tables, ListQuery, RemoteStore, StoreResult};

/// Process-local store used when no remote URL is configured, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    agent_status: RwLock<BTreeMap<String, AgentStatusRow>>,
    tasks: RwLock<Vec<Task>>,
    activity: RwLock<Vec<ActivityEntry>>,
    token_usage: RwLock<Vec<TokenUsage>>,
    knowledge: RwLock<Vec<KnowledgeEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(self, rows: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(rows),
            ..self
        }
    }

    pub fn with_activity(self, rows: Vec<ActivityEntry>) -> Self {
        Self {
            activity: RwLock::new(rows),
            ..self
        }
    }

    pub fn with_token_usage(self, rows: Vec<TokenUsage>) -> Self {
        Self {
            token_usage: RwLock::new(rows),
            ..self
        }
    }

    pub fn with_knowledge(self, rows: Vec<KnowledgeEntry>) -> Self {
        Self {
            knowledge: RwLock::new(rows),
            ..self
        }
    }

    pub async fn agent_status_count(&self) -> usize {
        self.agent_status.read().await.len()
    }
}

/// Apply equality filters, newest-first ordering on `order` and the row cap.
///
/// Rows are compared through their JSON form so one helper serves every table.
fn select<T: Serialize + Clone>(rows: &[T], order: &str, query: &ListQuery) -> Vec<T> {
    let mut keyed: Vec<(Option<String>, &T)> = rows
        .iter()
        .filter_map(|row| {
            let value = serde_json::to_value(row).ok()?;
            let matches = query.eq.iter().all(|(column, expected)| {
                value.get(column).map(json_text).as_deref() == Some(expected.as_str())
            });
            let key = value.get(order).filter(|v| !v.is_null()).map(json_text);
            matches.then_some((key, row))
        })
        .collect();

    // Descending, rows without the column last
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let limit = query.limit.unwrap_or(usize::MAX);
    keyed
        .into_iter()
        .take(limit)
        .map(|(_, row)| row.clone())
        .collect()
}

fn json_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn upsert_agent_status(&self, row: AgentStatusRow) -> StoreResult<()> {
        self.agent_status
            .write()
            .await
            .insert(row.agent_id.clone(), row);
        Ok(())
    }

    async fn list_agent_status(&self) -> StoreResult<Vec<AgentStatusRow>> {
        Ok(self.agent_status.read().await.values().cloned().collect())
    }

    async fn list_tasks(&self, query: &ListQuery) -> StoreResult<Vec<Task>> {
        Ok(select(&self.tasks.read().await, tables::TASKS_ORDER, query))
    }

    async fn list_activity(&self, query: &ListQuery) -> StoreResult<Vec<ActivityEntry>> {
        Ok(select(&self.activity.read().await, tables::ACTIVITY_ORDER, query))
    }

    async fn list_token_usage(&self, query: &ListQuery) -> StoreResult<Vec<TokenUsage>> {
        Ok(select(
            &self.token_usage.read().await,
            tables::TOKEN_USAGE_ORDER,
            query,
        ))
    }

    async fn list_knowledge(&self, query: &ListQuery) -> StoreResult<Vec<KnowledgeEntry>> {
        Ok(select(&self.knowledge.read().await, tables::KNOWLEDGE_ORDER, query))
    }
}
