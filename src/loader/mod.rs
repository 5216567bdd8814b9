//! Model loading utilities
//!
//! Resolves model weights locally (downloading from the HuggingFace Hub
//! when needed), then builds the candle models the pipeline runs on.

mod fetch;

pub use fetch::fetch_model;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::llama::{Llama, LlamaConfig};
use candle_transformers::models::t5;
use tokenizers::Tokenizer;
use tracing::info;

use crate::config::{DevicePlacement, ModelConfig};
use crate::model::{LlamaEnhancer, T5Generator};

/// Build the inference device for the configured placement
pub fn init_device(placement: DevicePlacement) -> Result<Device> {
    match placement {
        DevicePlacement::Cuda => Device::new_cuda(0)
            .context("failed to initialize CUDA device 0 (build with --features cuda)"),
        DevicePlacement::Cpu => Ok(Device::Cpu),
    }
}

/// Load the recipe generation model
pub fn load_generator(config: &ModelConfig, device: &Device) -> Result<T5Generator> {
    let model_dir = fetch_model(&config.generation_model, &config.model_dir)?;
    info!(dir = %model_dir.display(), "loading generation model");

    let model_config: t5::Config = read_config(&model_dir)?;
    let tokenizer = read_tokenizer(&model_dir)?;
    let weights = weight_files(&model_dir)?;

    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, DType::F32, device)? };
    let model = t5::T5ForConditionalGeneration::load(vb, &model_config)
        .context("failed to build generation model from weights")?;

    Ok(T5Generator::new(
        model,
        model_config,
        tokenizer,
        device.clone(),
    ))
}

/// Load the language enhancement model
pub fn load_enhancer(config: &ModelConfig, device: &Device) -> Result<LlamaEnhancer> {
    let model_dir = fetch_model(&config.enhancement_model, &config.model_dir)?;
    info!(dir = %model_dir.display(), "loading enhancement model");

    let raw_config: LlamaConfig = read_config(&model_dir)?;
    let model_config = raw_config.into_config(false);
    let tokenizer = read_tokenizer(&model_dir)?;
    let weights = weight_files(&model_dir)?;

    // F16 halves memory on GPU; CPU kernels want F32
    let dtype = if device.is_cuda() { DType::F16 } else { DType::F32 };
    let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, dtype, device)? };
    let model = Llama::load(vb, &model_config)
        .context("failed to build enhancement model from weights")?;

    Ok(LlamaEnhancer::new(
        model,
        model_config,
        tokenizer,
        device.clone(),
        dtype,
    ))
}

/// Parse `config.json` from a model directory
fn read_config<T: serde::de::DeserializeOwned>(model_dir: &Path) -> Result<T> {
    let path = model_dir.join("config.json");
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Load `tokenizer.json` from a model directory
fn read_tokenizer(model_dir: &Path) -> Result<Tokenizer> {
    let path = model_dir.join("tokenizer.json");
    Tokenizer::from_file(&path)
        .map_err(|e| anyhow!("failed to load tokenizer from {}: {}", path.display(), e))
}

/// Collect the safetensors files for a model, handling sharded checkpoints
fn weight_files(model_dir: &Path) -> Result<Vec<PathBuf>> {
    let single = model_dir.join("model.safetensors");
    if single.is_file() {
        return Ok(vec![single]);
    }

    let index_path = model_dir.join("model.safetensors.index.json");
    if index_path.is_file() {
        let contents = fs::read_to_string(&index_path)
            .with_context(|| format!("failed to read {}", index_path.display()))?;
        let index: serde_json::Value = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse {}", index_path.display()))?;
        let weight_map = index
            .get("weight_map")
            .and_then(|v| v.as_object())
            .ok_or_else(|| anyhow!("{} has no weight_map", index_path.display()))?;

        let shards: std::collections::BTreeSet<&str> = weight_map
            .values()
            .filter_map(|v| v.as_str())
            .collect();
        return Ok(shards.into_iter().map(|f| model_dir.join(f)).collect());
    }

    bail!("no safetensors weights found in {}", model_dir.display());
}
