use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{ActivityEntry, AgentStatusRow, KnowledgeEntry, Task, TokenUsage};

use super::{tables, ListQuery, RemoteStore, StoreError, StoreResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body text kept from a failed response.
const MAX_ERROR_BODY: usize = 512;

/// Client for a PostgREST endpoint (`<base>/rest/v1/<table>`), the interface Supabase exposes.
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PostgrestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Building remote store HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
    }

    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        order: &str,
        query: &ListQuery,
    ) -> StoreResult<Vec<T>> {
        let mut params: Vec<(String, String)> = vec![
            ("select".to_string(), "*".to_string()),
            ("order".to_string(), order.to_string()),
        ];
        for (column, value) in &query.eq {
            params.push((column.clone(), format!("eq.{value}")));
        }
        if let Some(limit) = query.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }

        debug!(table, ?params, "Remote select");
        let response = self
            .authorized(self.client.get(self.table_url(table)))
            .query(&params)
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}

async fn check_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let mut body = response.text().await.unwrap_or_default();
    if body.len() > MAX_ERROR_BODY {
        let cut = (0..=MAX_ERROR_BODY)
            .rev()
            .find(|&i| body.is_char_boundary(i))
            .unwrap_or(0);
        body.truncate(cut);
    }
    Err(StoreError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl RemoteStore for PostgrestStore {
    async fn upsert_agent_status(&self, row: AgentStatusRow) -> StoreResult<()> {
        let response = self
            .authorized(self.client.post(self.table_url(tables::AGENT_STATUS)))
            .query(&[("on_conflict", "agent_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[row])
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn list_agent_status(&self) -> StoreResult<Vec<AgentStatusRow>> {
        let response = self
            .authorized(self.client.get(self.table_url(tables::AGENT_STATUS)))
            .query(&[("select", "*"), ("order", "agent_id.asc")])
            .send()
            .await?;
        let response = check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn list_tasks(&self, query: &ListQuery) -> StoreResult<Vec<Task>> {
        self.select(tables::TASKS, &desc(tables::TASKS_ORDER), query)
            .await
    }

    async fn list_activity(&self, query: &ListQuery) -> StoreResult<Vec<ActivityEntry>> {
        self.select(tables::ACTIVITY, &desc(tables::ACTIVITY_ORDER), query)
            .await
    }

    async fn list_token_usage(&self, query: &ListQuery) -> StoreResult<Vec<TokenUsage>> {
        self.select(tables::TOKEN_USAGE, &desc(tables::TOKEN_USAGE_ORDER), query)
            .await
    }

    async fn list_knowledge(&self, query: &ListQuery) -> StoreResult<Vec<KnowledgeEntry>> {
        self.select(tables::KNOWLEDGE, &desc(tables::KNOWLEDGE_ORDER), query)
            .await
    }
}

fn desc(column: &str) -> String {
    format!("{column}.desc.nullslast")
}
