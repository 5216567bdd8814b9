//! One-shot generation command

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};

use crate::config::{AppConfig, GenerationConfig};
use crate::engine::RecipePipeline;
use crate::loader;

/// Generate recipes once and print them as JSON
pub fn generate(
    ingredients: Vec<String>,
    preset: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let config = AppConfig::from_env()?;

    let mut gen_config = match preset {
        Some(name) => GenerationConfig::preset(&name)
            .ok_or_else(|| anyhow!("unknown generation preset: '{}'", name))?,
        None => config.generation.clone(),
    };
    if seed.is_some() {
        gen_config.seed = seed;
    }

    let device = loader::init_device(config.models.device)?;
    let generator = loader::load_generator(&config.models, &device)
        .context("failed to load generation model")?;

    let pipeline = RecipePipeline::new(Arc::new(generator), None, gen_config);
    let outcome = pipeline.generate(&ingredients)?;

    for warning in &outcome.warnings {
        eprintln!("note: {}", warning);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.recipes)?);

    Ok(())
}
