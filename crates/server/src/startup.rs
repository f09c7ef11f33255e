use std::path::PathBuf;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, ServerState};
use service::runtime;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the router for `cfg` without binding a socket.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = ServerState::new(&cfg.storage.drivers_file, cfg.docs_url());
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let drivers_file = PathBuf::from(&cfg.storage.drivers_file);
    runtime::ensure_env(&drivers_file).await?;

    let app = build_app(&cfg);

    let addr = cfg.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %listener.local_addr()?, file = %drivers_file.display(), docs = %cfg.docs_url(), "starting driver registry");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
