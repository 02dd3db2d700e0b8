pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::liveness::LivenessAggregator;

pub use handlers::FleetState;

pub fn routes(aggregator: LivenessAggregator) -> Router {
    let state = Arc::new(FleetState { aggregator });
    Router::new()
        .route("/api/fleet", get(handlers::api_fleet))
        .route("/api/fleet/{directory}", get(handlers::api_fleet_agent))
        .with_state(state)
}
