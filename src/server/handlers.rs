//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    response::{Html, IntoResponse},
};
use serde::Serialize;
use tracing::info;

use super::error::ApiError;
use crate::engine::RecipePipeline;
use crate::recipe::ScoredRecipe;
use crate::web;

/// Shared application state
pub struct AppState {
    pub pipeline: Arc<RecipePipeline>,
    pub status: ServiceStatus,
}

/// Static service facts reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ServiceStatus {
    pub status: &'static str,
    pub model: String,
    pub device: String,
    pub enhancement: bool,
    pub version: &'static str,
}

impl ServiceStatus {
    pub fn new(model: String, device: String, enhancement: bool) -> Self {
        Self {
            status: "ok",
            model,
            device,
            enhancement,
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.status.clone())
}

/// Serve the browser client
pub async fn app_page() -> impl IntoResponse {
    Html(web::APP_HTML)
}

/// Generate recipes from a list of ingredients
///
/// The request body is a bare JSON array of ingredient strings; the response
/// is a bare JSON array of scored recipes, best first.
pub async fn generate_recipes(
    State(state): State<Arc<AppState>>,
    Json(ingredients): Json<Vec<String>>,
) -> Result<Json<Vec<ScoredRecipe>>, ApiError> {
    if ingredients.is_empty() {
        return Err(ApiError::InvalidInput(
            "ingredient list must not be empty".to_string(),
        ));
    }

    info!(count = ingredients.len(), "generation request");

    // Inference is CPU-bound and must not stall the async runtime
    let pipeline = state.pipeline.clone();
    let outcome = tokio::task::spawn_blocking(move || pipeline.generate(&ingredients))
        .await
        .map_err(|e| ApiError::Internal(e.into()))??;

    for warning in &outcome.warnings {
        info!(warning = %warning, "request note");
    }

    Ok(Json(outcome.recipes))
}
