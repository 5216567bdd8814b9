//! HTTP server for recipe generation
//!
//! Serves the JSON API and the embedded browser client.

mod error;
mod handlers;
mod routes;

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

pub use error::ApiError;
pub use handlers::{AppState, ServiceStatus};
pub use routes::api_routes;

/// Start the HTTP server
pub async fn start(state: Arc<AppState>, config: ServerConfig) -> Result<()> {
    let mut app = Router::new().merge(api_routes()).with_state(state);

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }
    if config.request_logging {
        app = app.layer(TraceLayer::new_for_http());
    }

    let addr = config.addr();
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("API endpoints:");
    tracing::info!("  GET  / - Service status");
    tracing::info!("  GET  /app - Browser client");
    tracing::info!("  POST /generate_recipes - Generate recipes from ingredients");

    axum::serve(listener, app).await?;

    Ok(())
}
