//! T5-based recipe generator
//!
//! Wraps a sequence-to-sequence T5 checkpoint fine-tuned to turn an
//! ingredient prompt into structured recipe text. Decoding is sequential
//! per candidate; the model holds KV-cache state, so it sits behind a
//! mutex and requests are serialized.

use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use candle_core::{Device, Tensor};
use candle_transformers::models::t5;
use candle_transformers::utils::apply_repeat_penalty;
use tokenizers::Tokenizer;
use tracing::debug;

use super::{sampling_processor, Generator};
use crate::config::GenerationConfig;

/// Tokens of context considered by the repetition penalty
const REPEAT_LAST_N: usize = 64;

/// Recipe generation model backed by T5
pub struct T5Generator {
    model: Mutex<t5::T5ForConditionalGeneration>,
    config: t5::Config,
    tokenizer: Tokenizer,
    device: Device,
}

impl T5Generator {
    pub fn new(
        model: t5::T5ForConditionalGeneration,
        config: t5::Config,
        tokenizer: Tokenizer,
        device: Device,
    ) -> Self {
        Self {
            model: Mutex::new(model),
            config,
            tokenizer,
            device,
        }
    }

    /// Decode one candidate from the encoded prompt
    fn decode_one(
        &self,
        model: &mut t5::T5ForConditionalGeneration,
        encoder_output: &Tensor,
        gen_config: &GenerationConfig,
        seed: u64,
    ) -> Result<String> {
        model.clear_kv_cache();

        let start_token = self
            .config
            .decoder_start_token_id
            .unwrap_or(self.config.pad_token_id) as u32;
        let eos_token = self.config.eos_token_id as u32;

        let mut output_ids = vec![start_token];
        let mut processor = sampling_processor(gen_config, seed);

        for step in 0..gen_config.max_tokens {
            // With KV caching only the newest token is fed after the first step
            let decoder_ids = if step == 0 || !self.config.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
            } else {
                let last = [output_ids[output_ids.len() - 1]];
                Tensor::new(&last[..], &self.device)?.unsqueeze(0)?
            };

            let logits = model
                .decode(&decoder_ids, encoder_output)?
                .squeeze(0)?;
            let logits = if gen_config.repeat_penalty == 1.0 {
                logits
            } else {
                let start = output_ids.len().saturating_sub(REPEAT_LAST_N);
                apply_repeat_penalty(&logits, gen_config.repeat_penalty, &output_ids[start..])?
            };

            let next = processor.sample(&logits)?;
            if next == eos_token {
                break;
            }
            output_ids.push(next);
        }

        let text = self
            .tokenizer
            .decode(&output_ids[1..], true)
            .map_err(|e| anyhow!("failed to decode output tokens: {}", e))?;
        Ok(text)
    }
}

impl Generator for T5Generator {
    fn generate(&self, prompt: &str, gen_config: &GenerationConfig) -> Result<Vec<String>> {
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(|e| anyhow!("failed to tokenize prompt: {}", e))?;
        let input_ids = Tensor::new(encoding.get_ids(), &self.device)?.unsqueeze(0)?;

        let mut model = self
            .model
            .lock()
            .map_err(|_| anyhow!("generation model mutex poisoned"))?;
        let encoder_output = model
            .encode(&input_ids)
            .context("failed to encode ingredient prompt")?;

        let base_seed = gen_config.seed.unwrap_or_else(rand::random);
        let mut candidates = Vec::with_capacity(gen_config.num_candidates);
        for i in 0..gen_config.num_candidates {
            let seed = base_seed.wrapping_add(i as u64);
            let text = self.decode_one(&mut model, &encoder_output, gen_config, seed)?;
            debug!(candidate = i, chars = text.len(), "decoded candidate");
            candidates.push(text);
        }

        Ok(candidates)
    }
}
