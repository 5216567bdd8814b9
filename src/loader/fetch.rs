//! Model weight download from the HuggingFace Hub

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use hf_hub::api::sync::Api;
use tracing::{debug, info, warn};

/// Files fetched for every model, beyond the weights themselves
const COMMON_FILES: [&str; 4] = [
    "config.json",
    "tokenizer.json",
    "tokenizer_config.json",
    "special_tokens_map.json",
];

/// Ensure a model's files are available locally, downloading them if needed
///
/// Returns the local directory holding the model files, named after the
/// final path segment of the repo id (e.g. `models/t5-recipe-generation`).
pub fn fetch_model(repo_id: &str, model_dir: &Path) -> Result<PathBuf> {
    let name = repo_id.rsplit('/').next().unwrap_or(repo_id);
    let local_dir = model_dir.join(name);

    if is_complete(&local_dir) {
        debug!(dir = %local_dir.display(), "model already present");
        return Ok(local_dir);
    }

    std::fs::create_dir_all(&local_dir)
        .with_context(|| format!("failed to create {}", local_dir.display()))?;

    info!(repo = repo_id, dir = %local_dir.display(), "downloading model");
    let api = Api::new().context("failed to initialize hub client")?;
    let repo = api.model(repo_id.to_string());

    for filename in COMMON_FILES {
        match repo.get(filename) {
            Ok(cached) => {
                std::fs::copy(&cached, local_dir.join(filename))?;
                info!(file = filename, "downloaded");
            }
            Err(e) => {
                // Optional metadata files are allowed to be missing
                debug!(file = filename, error = %e, "skipping");
            }
        }
    }

    match repo.get("model.safetensors") {
        Ok(cached) => {
            std::fs::copy(&cached, local_dir.join("model.safetensors"))?;
            info!(file = "model.safetensors", "downloaded");
        }
        Err(_) => {
            download_sharded(&repo, &local_dir)
                .with_context(|| format!("no usable weights found for {}", repo_id))?;
        }
    }

    if !is_complete(&local_dir) {
        bail!(
            "model download incomplete for {} in {}",
            repo_id,
            local_dir.display()
        );
    }

    Ok(local_dir)
}

/// Download a sharded safetensors checkpoint via its index file
fn download_sharded(repo: &hf_hub::api::sync::ApiRepo, local_dir: &Path) -> Result<()> {
    let index_cached = repo
        .get("model.safetensors.index.json")
        .context("neither model.safetensors nor an index file is available")?;
    std::fs::copy(&index_cached, local_dir.join("model.safetensors.index.json"))?;

    let contents = std::fs::read_to_string(&index_cached)?;
    let index: serde_json::Value = serde_json::from_str(&contents)?;
    let Some(weight_map) = index.get("weight_map").and_then(|v| v.as_object()) else {
        bail!("safetensors index has no weight_map");
    };

    let shards: std::collections::BTreeSet<&str> = weight_map
        .values()
        .filter_map(|v| v.as_str())
        .collect();
    for shard in shards {
        match repo.get(shard) {
            Ok(cached) => {
                std::fs::copy(&cached, local_dir.join(shard))?;
                info!(file = shard, "downloaded");
            }
            Err(e) => {
                warn!(file = shard, error = %e, "shard download failed");
                bail!("failed to download shard {}", shard);
            }
        }
    }

    Ok(())
}

/// Check whether a local model directory has a config and weights
fn is_complete(dir: &Path) -> bool {
    if !dir.join("config.json").is_file() || !dir.join("tokenizer.json").is_file() {
        return false;
    }
    if dir.join("model.safetensors").is_file() {
        return true;
    }
    dir.join("model.safetensors.index.json").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_dir_detected() {
        let dir = std::env::temp_dir().join("souschef-test-empty-model");
        let _ = std::fs::create_dir_all(&dir);
        assert!(!is_complete(&dir));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
