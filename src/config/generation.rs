//! Generation configuration settings

use serde::{Deserialize, Serialize};

/// Configuration for recipe text generation
///
/// Defaults are tuned for the recipe generation task: nucleus sampling with
/// a mild temperature and a repetition penalty that keeps the model from
/// looping on ingredient lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Maximum number of tokens to generate per candidate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    /// Temperature for sampling (0 = greedy)
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Top-k sampling cutoff (None = disabled)
    #[serde(default = "default_top_k")]
    pub top_k: Option<usize>,

    /// Top-p nucleus sampling threshold (None = disabled)
    #[serde(default = "default_top_p")]
    pub top_p: Option<f64>,

    /// Repetition penalty (1.0 = no penalty)
    #[serde(default = "default_repeat_penalty")]
    pub repeat_penalty: f32,

    /// Number of candidates to decode per generation round
    #[serde(default = "default_num_candidates")]
    pub num_candidates: usize,

    /// Number of generation rounds to run before ranking candidates
    #[serde(default = "default_num_rounds")]
    pub num_rounds: usize,

    /// Random seed (None = random)
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_tokens() -> usize {
    512
}

fn default_temperature() -> f64 {
    0.8
}

fn default_top_k() -> Option<usize> {
    Some(50)
}

fn default_top_p() -> Option<f64> {
    Some(0.92)
}

fn default_repeat_penalty() -> f32 {
    1.2
}

fn default_num_candidates() -> usize {
    2
}

fn default_num_rounds() -> usize {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            repeat_penalty: default_repeat_penalty(),
            num_candidates: default_num_candidates(),
            num_rounds: default_num_rounds(),
            seed: None,
        }
    }
}

impl GenerationConfig {
    /// Create a creative sampling config
    pub fn creative() -> Self {
        Self {
            temperature: 1.0,
            top_k: Some(100),
            top_p: Some(0.95),
            repeat_penalty: 1.1,
            ..Default::default()
        }
    }

    /// Create a focused, low-variance sampling config
    pub fn focused() -> Self {
        Self {
            temperature: 0.6,
            top_k: Some(30),
            top_p: Some(0.85),
            repeat_penalty: 1.3,
            ..Default::default()
        }
    }

    /// Create a config that decodes more candidates across more rounds
    /// and keeps the best-scoring ones
    pub fn best_quality() -> Self {
        Self {
            temperature: 0.7,
            top_k: Some(40),
            top_p: Some(0.9),
            num_candidates: 4,
            num_rounds: 3,
            ..Default::default()
        }
    }

    /// Look up a named preset
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "default" => Some(Self::default()),
            "creative" => Some(Self::creative()),
            "focused" => Some(Self::focused()),
            "best_quality" => Some(Self::best_quality()),
            _ => None,
        }
    }

    /// Check if greedy decoding should be used
    pub fn is_greedy(&self) -> bool {
        self.temperature <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_json() {
        let config: GenerationConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.max_tokens, 512);
        assert_eq!(config.top_k, Some(50));
        assert_eq!(config.num_candidates, 2);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_preset_lookup() {
        assert!(GenerationConfig::preset("default").is_some());
        assert!(GenerationConfig::preset("BEST_QUALITY").is_some());
        assert!(GenerationConfig::preset("chaotic").is_none());
    }

    #[test]
    fn test_best_quality_widens_search() {
        let best = GenerationConfig::best_quality();
        let default = GenerationConfig::default();
        assert!(best.num_candidates * best.num_rounds > default.num_candidates);
    }

    #[test]
    fn test_is_greedy() {
        let mut config = GenerationConfig::default();
        assert!(!config.is_greedy());
        config.temperature = 0.0;
        assert!(config.is_greedy());
    }
}
