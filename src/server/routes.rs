//! Route definitions

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{app_page, generate_recipes, health, AppState};

/// Create the API router
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Service status
        .route("/", get(health))
        // Browser client
        .route("/app", get(app_page))
        // Recipe generation
        .route("/generate_recipes", post(generate_recipes))
}
