//! Model selection and placement settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Recipe generation model used when no override is configured
pub(crate) const DEFAULT_GENERATION_MODEL: &str = "flax-community/t5-recipe-generation";

/// Language enhancement model used when no override is configured
pub(crate) const DEFAULT_ENHANCEMENT_MODEL: &str = "TinyLlama/TinyLlama-1.1B-Chat-v1.0";

/// Compute placement for inference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlacement {
    /// Run on the CPU
    #[default]
    Cpu,
    /// Run on CUDA device 0
    Cuda,
}

impl DevicePlacement {
    /// Check if using CUDA
    pub fn is_cuda(self) -> bool {
        self == DevicePlacement::Cuda
    }
}

/// Which models to load and where their weights live
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Hub repo id of the sequence-to-sequence recipe model
    pub generation_model: String,

    /// Hub repo id of the causal LM used for language enhancement
    pub enhancement_model: String,

    /// Directory where model weights are stored and downloaded to
    pub model_dir: PathBuf,

    /// Device placement for both models
    #[serde(default)]
    pub device: DevicePlacement,

    /// Whether the enhancement pass is enabled
    #[serde(default)]
    pub enhancement_enabled: bool,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            generation_model: DEFAULT_GENERATION_MODEL.to_string(),
            enhancement_model: DEFAULT_ENHANCEMENT_MODEL.to_string(),
            model_dir: PathBuf::from("./models"),
            device: DevicePlacement::Cpu,
            enhancement_enabled: false,
        }
    }
}

impl ModelConfig {
    /// Local directory for a hub repo id, e.g. `models/t5-recipe-generation`
    pub fn local_dir(&self, repo_id: &str) -> PathBuf {
        let name = repo_id.rsplit('/').next().unwrap_or(repo_id);
        self.model_dir.join(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_dir_strips_namespace() {
        let config = ModelConfig::default();
        assert_eq!(
            config.local_dir("flax-community/t5-recipe-generation"),
            PathBuf::from("./models/t5-recipe-generation")
        );
        assert_eq!(config.local_dir("plain-name"), PathBuf::from("./models/plain-name"));
    }

    #[test]
    fn test_device_placement() {
        assert!(DevicePlacement::Cuda.is_cuda());
        assert!(!DevicePlacement::Cpu.is_cuda());
        let parsed: DevicePlacement = serde_json::from_str("\"cuda\"").unwrap();
        assert_eq!(parsed, DevicePlacement::Cuda);
    }
}
