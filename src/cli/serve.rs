//! HTTP server command

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::engine::RecipePipeline;
use crate::loader;
use crate::model::Enhancer;
use crate::server::{self, AppState, ServiceStatus};

/// Start the recipe generation server
pub async fn serve(port: Option<u16>, host: Option<String>) -> Result<()> {
    let mut config = AppConfig::from_env()?;
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(host) = host {
        config.server.host = host;
    }

    let device = loader::init_device(config.models.device)?;
    info!(device = ?config.models.device, "initialized inference device");

    let generator = loader::load_generator(&config.models, &device)
        .context("failed to load generation model")?;
    info!(model = %config.models.generation_model, "generation model ready");

    // A missing enhancement model disables the pass rather than failing startup
    let enhancer: Option<Arc<dyn Enhancer>> = if config.models.enhancement_enabled {
        match loader::load_enhancer(&config.models, &device) {
            Ok(enhancer) => {
                info!(model = %config.models.enhancement_model, "enhancement model ready");
                Some(Arc::new(enhancer))
            }
            Err(e) => {
                warn!(error = %e, "enhancement model unavailable, continuing without it");
                None
            }
        }
    } else {
        None
    };

    let pipeline = Arc::new(RecipePipeline::new(
        Arc::new(generator),
        enhancer,
        config.generation.clone(),
    ));

    let status = ServiceStatus::new(
        config.models.generation_model.clone(),
        format!("{:?}", config.models.device).to_lowercase(),
        pipeline.enhancement_enabled(),
    );
    let state = Arc::new(AppState { pipeline, status });

    server::start(state, config.server).await?;

    Ok(())
}
