//! Status push: agents report their own state, independent of the session scan.
//!
//! Pushed rows are served from `/api/agents` and never merged into `/api/fleet`.

pub mod dto;
pub mod handlers;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::remote::RemoteStore;

pub use handlers::StatusState;

pub fn routes(store: Arc<dyn RemoteStore>) -> Router {
    let state = Arc::new(StatusState { store });
    Router::new()
        .route("/api/agents", get(handlers::list_pushed_status))
        .route("/api/agents/status", post(handlers::push_status))
        .with_state(state)
}
