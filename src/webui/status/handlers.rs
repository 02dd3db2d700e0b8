use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::commands::common::{now_rfc3339, parse_timestamp};
use crate::remote::RemoteStore;
use crate::types::{AgentStatusRow, ReportedStatus};
use crate::webui::error::{ApiError, ApiResult};
use crate::webui::extractors::ValidJson;

use super::dto::{StatusPushRequest, StatusPushResponse};

pub struct StatusState {
    pub store: Arc<dyn RemoteStore>,
}

/// Accept a status report from an agent and upsert it, keyed by agent id.
pub async fn push_status(
    State(state): State<Arc<StatusState>>,
    ValidJson(body): ValidJson<StatusPushRequest>,
) -> ApiResult<Json<StatusPushResponse>> {
    let row = into_row(body)?;
    let agent_id = row.agent_id.clone();
    let status = row.status;

    state.store.upsert_agent_status(row).await?;
    info!(agent = %agent_id, %status, "Status pushed");

    Ok(Json(StatusPushResponse {
        ok: true,
        agent_id,
        status,
    }))
}

pub async fn list_pushed_status(
    State(state): State<Arc<StatusState>>,
) -> ApiResult<Json<Vec<AgentStatusRow>>> {
    Ok(Json(state.store.list_agent_status().await?))
}

/// Build the stored row, stamped with the current server time.
fn into_row(body: StatusPushRequest) -> ApiResult<AgentStatusRow> {
    let agent_id = body
        .agent_id
        .ok_or_else(|| ApiError::BadRequest("agent_id: not set".to_string()))?;
    let status = body
        .status
        .ok_or_else(|| ApiError::BadRequest("status: not set".to_string()))?
        .parse::<ReportedStatus>()
        .map_err(ApiError::BadRequest)?;
    let last_activity = body
        .last_activity
        .as_deref()
        .and_then(parse_timestamp)
        .map(|ts| ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true));

    Ok(AgentStatusRow {
        agent_id,
        status,
        current_task: body.current_task.filter(|t| !t.trim().is_empty()),
        last_activity,
        updated_at: now_rfc3339(),
    })
}
