//! Read-only views over the hosted store's tasks, activity, usage and knowledge tables.

pub mod handlers;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::remote::RemoteStore;

pub use handlers::RecordsState;

pub fn routes(store: Arc<dyn RemoteStore>) -> Router {
    let state = Arc::new(RecordsState { store });
    Router::new()
        .route("/api/tasks", get(handlers::api_tasks))
        .route("/api/activity", get(handlers::api_activity))
        .route("/api/usage", get(handlers::api_usage))
        .route("/api/usage/export.csv", get(handlers::api_usage_csv))
        .route("/api/knowledge", get(handlers::api_knowledge))
        .with_state(state)
}
