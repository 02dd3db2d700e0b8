use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::commands::common::csv::write_record;
use crate::remote::{ListQuery, RemoteStore};
use crate::types::{ActivityEntry, KnowledgeEntry, Task, TokenUsage};
use crate::webui::error::ApiResult;

/// Rows returned when `limit` is not given
pub const DEFAULT_LIMIT: usize = 50;

/// Upper bound for `limit`
pub const MAX_LIMIT: usize = 500;

pub const USAGE_CSV_HEADER: [&str; 6] = [
    "recorded_at",
    "agent_id",
    "model",
    "input_tokens",
    "output_tokens",
    "cost_usd",
];

pub struct RecordsState {
    pub store: Arc<dyn RemoteStore>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskParams {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AgentParams {
    pub agent_id: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct KnowledgeParams {
    pub category: Option<String>,
    pub limit: Option<usize>,
}

pub fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

// ── Handlers ────────────────────────────────────────────────────────────────

pub async fn api_tasks(
    State(state): State<Arc<RecordsState>>,
    Query(params): Query<TaskParams>,
) -> ApiResult<Json<Vec<Task>>> {
    let query = ListQuery::new()
        .limit(clamp_limit(params.limit))
        .eq("status", params.status.as_deref());
    Ok(Json(state.store.list_tasks(&query).await?))
}

pub async fn api_activity(
    State(state): State<Arc<RecordsState>>,
    Query(params): Query<AgentParams>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    let query = ListQuery::new()
        .limit(clamp_limit(params.limit))
        .eq("agent_id", params.agent_id.as_deref());
    Ok(Json(state.store.list_activity(&query).await?))
}

pub async fn api_usage(
    State(state): State<Arc<RecordsState>>,
    Query(params): Query<AgentParams>,
) -> ApiResult<Json<Vec<TokenUsage>>> {
    let query = ListQuery::new()
        .limit(clamp_limit(params.limit))
        .eq("agent_id", params.agent_id.as_deref());
    Ok(Json(state.store.list_token_usage(&query).await?))
}

pub async fn api_knowledge(
    State(state): State<Arc<RecordsState>>,
    Query(params): Query<KnowledgeParams>,
) -> ApiResult<Json<Vec<KnowledgeEntry>>> {
    let query = ListQuery::new()
        .limit(clamp_limit(params.limit))
        .eq("category", params.category.as_deref());
    Ok(Json(state.store.list_knowledge(&query).await?))
}

/// All matching token usage rows as CSV. Not subject to `limit`.
pub async fn api_usage_csv(
    State(state): State<Arc<RecordsState>>,
    Query(params): Query<AgentParams>,
) -> ApiResult<impl IntoResponse> {
    let query = ListQuery::new().eq("agent_id", params.agent_id.as_deref());
    let rows = state.store.list_token_usage(&query).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"token-usage.csv\"",
            ),
        ],
        usage_csv(&rows),
    ))
}

pub fn usage_csv(rows: &[TokenUsage]) -> String {
    let mut out = String::new();
    write_record(&mut out, &USAGE_CSV_HEADER);
    for row in rows {
        let fields = [
            row.recorded_at.clone().unwrap_or_default(),
            row.agent_id.clone().unwrap_or_default(),
            row.model.clone().unwrap_or_default(),
            row.input_tokens.map(|v| v.to_string()).unwrap_or_default(),
            row.output_tokens.map(|v| v.to_string()).unwrap_or_default(),
            row.cost_usd.map(|v| v.to_string()).unwrap_or_default(),
        ];
        write_record(&mut out, &fields);
    }
    out
}
