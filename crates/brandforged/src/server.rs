//! HTTP server for brandforged

use crate::orchestrator::Orchestrator;
use crate::provider::HttpBackend;
use crate::resolver::CapabilityResolver;
use crate::routes;
use anyhow::{Context, Result};
use axum::Router;
use brandforge_common::ForgeConfig;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers.
pub struct AppState {
    pub orchestrator: Orchestrator,
}

impl AppState {
    pub fn new(config: &ForgeConfig) -> Self {
        let backend = Arc::new(HttpBackend::new());
        let resolver = Arc::new(CapabilityResolver::new(config.clone(), backend));
        let orchestrator =
            Orchestrator::new(resolver, Duration::from_secs(config.kit_deadline_secs));
        Self { orchestrator }
    }
}

/// Build the full application router for the given state.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::api_routes())
        .merge(routes::health_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

/// Run the HTTP server until shutdown.
pub async fn run(config: ForgeConfig) -> Result<()> {
    let app = app(Arc::new(AppState::new(&config)));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("  Listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
