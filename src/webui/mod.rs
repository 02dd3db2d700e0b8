pub mod error;
pub mod extractors;
pub mod fleet;
pub mod records;
pub mod status;

use anyhow::{Context, Result};
use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::agents::AgentDirectory;
use crate::config::Settings;
use crate::liveness::LivenessAggregator;
use crate::remote::{MemoryStore, PostgrestStore, RemoteStore};

pub fn run_server(settings: Settings) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(start_server_async(settings))
}

/// Build the aggregator and remote store described by `settings`.
pub fn build_backends(settings: &Settings) -> Result<(LivenessAggregator, Arc<dyn RemoteStore>)> {
    let directory = Arc::new(AgentDirectory::with_overrides(&settings.display_names));
    let aggregator = LivenessAggregator::new(settings.data_root.clone(), directory)
        .with_deadline(settings.fleet_timeout);

    let store: Arc<dyn RemoteStore> = match &settings.remote {
        Some(remote) => Arc::new(
            PostgrestStore::new(&remote.url, &remote.key)
                .context("Failed to set up remote store client")?,
        ),
        None => {
            warn!("No remote store configured; pushed status is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    Ok((aggregator, store))
}

/// All API routes; the fleet and the pushed-status views stay on separate paths.
pub fn build_router(aggregator: LivenessAggregator, store: Arc<dyn RemoteStore>) -> Router {
    Router::new()
        .route("/api/health", get(api_health))
        .merge(fleet::routes(aggregator))
        .merge(status::routes(store.clone()))
        .merge(records::routes(store))
        .layer(CorsLayer::permissive())
}

/// Async version of `run_server` for embedding in an existing tokio runtime.
pub async fn start_server_async(settings: Settings) -> Result<()> {
    let (aggregator, store) = build_backends(&settings)?;
    info!(data_root = %settings.data_root.display(), "Scanning agent sessions");
    let app = build_router(aggregator, store);

    let listener = bind_with_reuse(settings.port).await?;
    info!("ClawPulse API listening on http://localhost:{}", settings.port);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn api_health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}

/// Bind a TCP listener with SO_REUSEADDR so quick restarts reclaim the port.
async fn bind_with_reuse(port: u16) -> Result<tokio::net::TcpListener> {
    let addr: std::net::SocketAddr = format!("0.0.0.0:{port}").parse()?;
    let socket = socket2::Socket::new(
        socket2::Domain::IPV4,
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket
        .bind(&addr.into())
        .with_context(|| format!("Failed to bind port {port}"))?;
    socket.listen(1024)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(tokio::net::TcpListener::from_std(std_listener)?)
}
