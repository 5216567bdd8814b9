//! Model abstractions and candle-backed implementations
//!
//! The pipeline talks to models through the [`Generator`] and [`Enhancer`]
//! traits so that tests can substitute deterministic fakes for the real
//! weights.

mod enhancer;
mod t5;

pub use enhancer::LlamaEnhancer;
pub use t5::T5Generator;

use anyhow::Result;
use candle_transformers::generation::{LogitsProcessor, Sampling};

use crate::config::GenerationConfig;

/// Produces raw recipe text candidates from an ingredient prompt
pub trait Generator: Send + Sync {
    /// Generate `config.num_candidates` raw outputs for the prompt
    fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<Vec<String>>;
}

/// Rewrites recipe text for clarity while preserving its content
pub trait Enhancer: Send + Sync {
    /// Run one rewrite pass and return the raw model response
    fn rewrite(&self, prompt: &str, config: &GenerationConfig) -> Result<String>;
}

/// Build a logits processor for the configured sampling strategy
pub(crate) fn sampling_processor(config: &GenerationConfig, seed: u64) -> LogitsProcessor {
    let sampling = if config.is_greedy() {
        Sampling::ArgMax
    } else {
        let temperature = config.temperature;
        match (config.top_k, config.top_p) {
            (Some(k), Some(p)) => Sampling::TopKThenTopP { k, p, temperature },
            (Some(k), None) => Sampling::TopK { k, temperature },
            (None, Some(p)) => Sampling::TopP { p, temperature },
            (None, None) => Sampling::All { temperature },
        }
    };
    LogitsProcessor::from_sampling(seed, sampling)
}
