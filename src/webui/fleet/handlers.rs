use axum::{
    extract::{Path, State},
    Json,
};
use anyhow::Context;
use std::sync::Arc;

use crate::liveness::{list_agent_directories, now_millis, LivenessAggregator};
use crate::types::LivenessSummary;
use crate::webui::error::{ApiError, ApiResult};

pub struct FleetState {
    pub aggregator: LivenessAggregator,
}

/// Summaries for every directory under the data root, in listing order.
pub async fn api_fleet(State(state): State<Arc<FleetState>>) -> ApiResult<Json<Vec<LivenessSummary>>> {
    let fleet = state
        .aggregator
        .read_fleet()
        .await
        .with_context(|| {
            format!(
                "Failed to list agent data root {}",
                state.aggregator.data_root().display()
            )
        })?;
    Ok(Json(fleet))
}

/// One agent's summary. The name must appear in the data root listing.
pub async fn api_fleet_agent(
    State(state): State<Arc<FleetState>>,
    Path(directory): Path<String>,
) -> ApiResult<Json<LivenessSummary>> {
    let directories = list_agent_directories(state.aggregator.data_root())
        .await
        .context("Failed to list agent data root")?;
    if !directories.iter().any(|d| *d == directory) {
        return Err(ApiError::NotFound(format!("Agent '{directory}' not found")));
    }
    let summary = state
        .aggregator
        .summarize_agent(&directory, now_millis())
        .await;
    Ok(Json(summary))
}
