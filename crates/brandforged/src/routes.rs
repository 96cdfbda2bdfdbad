//! API routes for brandforged

use crate::server::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use brandforge_common::{
    BrandKit, BrandRequest, ChatRequest, ChatResponse, RegenerateLogoRequest, StrategyAnalysis,
    StrategyRequest,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

type AppStateArc = Arc<AppState>;

#[derive(Debug, Serialize)]
pub struct RegenerateLogoResponse {
    pub logo_url: String,
    pub logo_prompt: String,
    pub service: String,
}

pub fn api_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/api/v1/generate", post(generate_brand_kit))
        .route("/api/v1/regenerate-logo", post(regenerate_logo))
        .route("/api/v1/chat", post(chat))
        .route("/api/v1/strategy", post(analyze_strategy))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/", get(root)).route("/health", get(health))
}

async fn generate_brand_kit(
    State(state): State<AppStateArc>,
    Json(request): Json<BrandRequest>,
) -> Result<Json<BrandKit>, (StatusCode, String)> {
    validate_non_empty("business_idea", &request.business_idea)?;
    validate_non_empty("industry", &request.industry)?;

    info!("Generate request for industry '{}'", request.industry);
    let kit = state.orchestrator.build_brand_kit(&request).await;
    Ok(Json(kit))
}

async fn regenerate_logo(
    State(state): State<AppStateArc>,
    Json(request): Json<RegenerateLogoRequest>,
) -> Result<Json<RegenerateLogoResponse>, (StatusCode, String)> {
    validate_non_empty("name", &request.name)?;
    validate_non_empty("industry", &request.industry)?;

    let logo = state.orchestrator.regenerate_logo(&request).await;
    Ok(Json(RegenerateLogoResponse {
        logo_url: logo.url,
        logo_prompt: logo.prompt,
        service: logo.service,
    }))
}

async fn chat(
    State(state): State<AppStateArc>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, String)> {
    validate_non_empty("message", &request.message)?;

    let response = state.orchestrator.chat(&request.message, &request.context).await;
    Ok(Json(ChatResponse { response }))
}

async fn analyze_strategy(
    State(state): State<AppStateArc>,
    Json(request): Json<StrategyRequest>,
) -> Result<Json<StrategyAnalysis>, (StatusCode, String)> {
    validate_non_empty("business_idea", &request.business_idea)?;

    let report = state.orchestrator.analyze_strategy(&request.business_idea).await;
    Ok(Json(report))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the BrandForge API." }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Malformed inbound requests are the only errors this layer surfaces;
/// provider failures never reach it.
fn validate_non_empty(field: &str, value: &str) -> Result<(), (StatusCode, String)> {
    if value.trim().is_empty() {
        return Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("field '{field}' must not be empty"),
        ));
    }
    Ok(())
}
