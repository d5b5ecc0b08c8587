//! Preview HTTP server.
//!
//! Thin glue around the markdown core: one POST endpoint for the
//! conversion, a health probe, and the static client page. Every
//! request is traced.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use markpreview_config::MarkPreviewConfig;

use crate::{health, preview, static_assets};

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<MarkPreviewConfig>,
}

impl GatewayState {
    pub fn new(config: MarkPreviewConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Builds the full application router.
pub fn router(state: GatewayState) -> Router {
    let static_dir = state.config.static_dir.clone();
    Router::new()
        .route("/preview", post(preview::preview))
        .route("/api/health", get(health::get_health))
        // Client page; anything unrouted falls through to static files.
        .fallback_service(static_assets::client_service(&static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Starts the preview HTTP server and serves until shutdown.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = router(state);

    info!("Preview HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
