//! Causal-LM language enhancer
//!
//! Runs a small chat-tuned Llama model that rewrites a recipe for clarity.
//! The KV cache is created fresh for every rewrite, so the model itself is
//! shared immutably across calls.

use anyhow::{anyhow, Result};
use candle_core::{DType, Device, Tensor};
use candle_transformers::models::llama::{self, Cache, Llama, LlamaEosToks};
use candle_transformers::utils::apply_repeat_penalty;
use tokenizers::Tokenizer;
use tracing::debug;

use super::{sampling_processor, Enhancer};
use crate::config::GenerationConfig;

/// Tokens of context considered by the repetition penalty
const REPEAT_LAST_N: usize = 64;

/// Language enhancement model backed by a chat-tuned Llama
pub struct LlamaEnhancer {
    model: Llama,
    config: llama::Config,
    tokenizer: Tokenizer,
    device: Device,
    dtype: DType,
    eos_tokens: Vec<u32>,
}

impl LlamaEnhancer {
    pub fn new(
        model: Llama,
        config: llama::Config,
        tokenizer: Tokenizer,
        device: Device,
        dtype: DType,
    ) -> Self {
        let eos_tokens = match &config.eos_token_id {
            Some(LlamaEosToks::Single(id)) => vec![*id],
            Some(LlamaEosToks::Multiple(ids)) => ids.clone(),
            None => tokenizer
                .token_to_id("</s>")
                .map(|id| vec![id])
                .unwrap_or_default(),
        };
        Self {
            model,
            config,
            tokenizer,
            device,
            dtype,
            eos_tokens,
        }
    }

    /// Wrap the instruction in the model's chat template
    fn chat_prompt(prompt: &str) -> String {
        format!("<|user|>\n{}</s>\n<|assistant|>\n", prompt)
    }
}

impl Enhancer for LlamaEnhancer {
    fn rewrite(&self, prompt: &str, gen_config: &GenerationConfig) -> Result<String> {
        let templated = Self::chat_prompt(prompt);
        let encoding = self
            .tokenizer
            .encode(templated.as_str(), true)
            .map_err(|e| anyhow!("failed to tokenize rewrite prompt: {}", e))?;
        let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
        let prompt_len = tokens.len();

        let mut cache = Cache::new(true, self.dtype, &self.config, &self.device)?;
        let seed = gen_config.seed.unwrap_or_else(rand::random);
        let mut processor = sampling_processor(gen_config, seed);

        let mut index_pos = 0;
        for index in 0..gen_config.max_tokens {
            let (context_size, context_index) = if index > 0 {
                (1, index_pos)
            } else {
                (tokens.len(), 0)
            };
            let ctxt = &tokens[tokens.len().saturating_sub(context_size)..];
            let input = Tensor::new(ctxt, &self.device)?.unsqueeze(0)?;
            let logits = self.model.forward(&input, context_index, &mut cache)?;
            let logits = logits.squeeze(0)?;
            let logits = if gen_config.repeat_penalty == 1.0 {
                logits
            } else {
                let start = tokens.len().saturating_sub(REPEAT_LAST_N);
                apply_repeat_penalty(&logits, gen_config.repeat_penalty, &tokens[start..])?
            };
            index_pos += ctxt.len();

            let next = processor.sample(&logits)?;
            if self.eos_tokens.contains(&next) {
                break;
            }
            tokens.push(next);
        }

        let response = self
            .tokenizer
            .decode(&tokens[prompt_len..], true)
            .map_err(|e| anyhow!("failed to decode rewrite output: {}", e))?;
        debug!(chars = response.len(), "rewrite pass complete");
        Ok(response.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_prompt_template() {
        let prompt = LlamaEnhancer::chat_prompt("improve this recipe");
        assert!(prompt.starts_with("<|user|>\n"));
        assert!(prompt.ends_with("<|assistant|>\n"));
        assert!(prompt.contains("improve this recipe</s>"));
    }
}
