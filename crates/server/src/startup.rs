use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};
use service::{
    graph::GraphService,
    storage::{FileGraphStorage, GraphStorage},
};

/// Any origin, any method, any header.
pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Open the configured storage directory (creating it if absent) and wrap it in the service.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let storage: Arc<dyn GraphStorage> = FileGraphStorage::new(&cfg.storage.dir)
        .await
        .map_err(|e| StartupError::Storage(e.to_string()))?;
    Ok(ServerState::new(GraphService::new(storage)))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{}: {e}", cfg.bind_addr())))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, storage_dir = %cfg.storage.dir, "graph store listening");
    axum::serve(listener, app).await?;
    Ok(())
}
