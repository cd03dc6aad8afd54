//! HTML front end: one form route, signed asset serving and a health check.

pub mod handlers;
pub mod render;

use crate::infrastructure::storage::local::LocalAssetStore;
use crate::PokeFinder;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::{DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Clone)]
pub struct AppState {
    pub finder: Arc<PokeFinder>,
    pub assets: Arc<LocalAssetStore>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::recommend))
        .route("/assets/{*key}", get(handlers::asset))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO)))
        .with_state(state)
}

/// Binds `addr` and serves until the process receives Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await
}
