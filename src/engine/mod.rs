//! Recipe generation pipeline
//!
//! Orchestrates the full request flow: ingredient preprocessing, prompt
//! construction, model generation, output parsing, the optional language
//! enhancement pass, and scoring/ranking of the candidates.

mod enhance;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GenerationConfig;
use crate::ingredient;
use crate::model::{Enhancer, Generator};
use crate::recipe::{OutputParser, ParseOutcome, Recipe, RecipeScorer, ScoredRecipe};

/// Prompt prefix the generation model was fine-tuned with
const PROMPT_PREFIX: &str = "items: ";

/// Errors surfaced by the generation pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No ingredient survived preprocessing
    #[error("no valid ingredients provided")]
    EmptyIngredients,

    /// Model inference failed
    #[error("recipe generation failed")]
    Generation(#[from] anyhow::Error),
}

/// Everything produced for one generation request
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Parsed recipes with scores, best first
    pub recipes: Vec<ScoredRecipe>,
    /// Ingredients after preprocessing, as used in the prompt
    pub processed_ingredients: Vec<String>,
    /// Preprocessing and generation warnings
    pub warnings: Vec<String>,
}

/// The recipe generation pipeline
pub struct RecipePipeline {
    generator: Arc<dyn Generator>,
    enhancer: Option<Arc<dyn Enhancer>>,
    parser: OutputParser,
    scorer: RecipeScorer,
    config: GenerationConfig,
}

impl RecipePipeline {
    pub fn new(
        generator: Arc<dyn Generator>,
        enhancer: Option<Arc<dyn Enhancer>>,
        config: GenerationConfig,
    ) -> Self {
        Self {
            generator,
            enhancer,
            parser: OutputParser,
            scorer: RecipeScorer::default(),
            config,
        }
    }

    /// Whether the enhancement pass is active
    pub fn enhancement_enabled(&self) -> bool {
        self.enhancer.is_some()
    }

    /// Run the full pipeline for a raw ingredient list
    pub fn generate(&self, raw_ingredients: &[String]) -> Result<GenerationOutcome, PipelineError> {
        let normalized = ingredient::normalize(raw_ingredients);
        if normalized.is_empty() {
            return Err(PipelineError::EmptyIngredients);
        }
        let mut warnings = normalized.warnings;

        let prompt = format!("{}{}", PROMPT_PREFIX, normalized.items.join(", "));
        debug!(prompt = %prompt, "built generation prompt");

        let mut recipes = Vec::new();
        let mut seen: Vec<Recipe> = Vec::new();
        let rounds = self.config.num_rounds.max(1);
        for round in 0..rounds {
            // A pinned seed must still explore different samples each round
            let mut round_config = self.config.clone();
            if let Some(seed) = self.config.seed {
                let offset = (round * self.config.num_candidates) as u64;
                round_config.seed = Some(seed.wrapping_add(offset));
            }
            let raw_outputs = self.generator.generate(&prompt, &round_config)?;
            debug!(round, candidates = raw_outputs.len(), "generation round done");

            for raw in raw_outputs {
                match self.parser.parse(&raw) {
                    ParseOutcome::Parsed(recipe) => {
                        if seen.contains(&recipe) {
                            debug!(title = %recipe.title, "skipping duplicate candidate");
                            continue;
                        }
                        seen.push(recipe.clone());
                        let recipe = self.enhance(recipe);
                        let score = self.scorer.score(&recipe, &normalized.items);
                        recipes.push(ScoredRecipe { recipe, score });
                    }
                    ParseOutcome::Unparsed(text) => {
                        warn!(chars = text.len(), "discarding unparseable output");
                        warnings.push("a generated candidate could not be parsed".to_string());
                    }
                }
            }
        }

        recipes.sort_by(|a, b| {
            b.score
                .overall
                .partial_cmp(&a.score.overall)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        recipes.truncate(self.config.num_candidates);

        info!(
            recipes = recipes.len(),
            warnings = warnings.len(),
            "generation complete"
        );

        Ok(GenerationOutcome {
            recipes,
            processed_ingredients: normalized.items,
            warnings,
        })
    }

    /// Run the enhancement pass, keeping the original recipe on any failure
    fn enhance(&self, recipe: Recipe) -> Recipe {
        let Some(enhancer) = &self.enhancer else {
            return recipe;
        };

        let rewrite_config = GenerationConfig {
            temperature: enhance::REWRITE_TEMPERATURE,
            top_k: None,
            top_p: Some(enhance::REWRITE_TOP_P),
            max_tokens: enhance::REWRITE_MAX_TOKENS,
            repeat_penalty: 1.0,
            seed: self.config.seed,
            ..Default::default()
        };

        let prompt = enhance::rewrite_prompt(&recipe);
        match enhancer.rewrite(&prompt, &rewrite_config) {
            Ok(response) => enhance::parse_rewrite(&response, &recipe),
            Err(e) => {
                warn!(error = %e, "enhancement failed, keeping original recipe");
                recipe
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};

    /// Generator returning canned raw outputs
    struct FakeGenerator {
        outputs: Vec<String>,
    }

    impl Generator for FakeGenerator {
        fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> Result<Vec<String>> {
            Ok(self.outputs.clone())
        }
    }

    /// Generator that records the seed it was handed on each call
    struct RecordingGenerator {
        seeds: std::sync::Mutex<Vec<Option<u64>>>,
        outputs: Vec<String>,
    }

    impl Generator for RecordingGenerator {
        fn generate(&self, _prompt: &str, config: &GenerationConfig) -> Result<Vec<String>> {
            self.seeds.lock().unwrap().push(config.seed);
            Ok(self.outputs.clone())
        }
    }

    /// Enhancer that always fails
    struct BrokenEnhancer;

    impl Enhancer for BrokenEnhancer {
        fn rewrite(&self, _prompt: &str, _config: &GenerationConfig) -> Result<String> {
            Err(anyhow!("model exploded"))
        }
    }

    fn raw_recipe(title: &str) -> String {
        format!(
            "title: {} <section> ingredients: 1 cup rice <sep> 2 cups water \
             <sep> salt <section> directions: rinse the rice well. <sep> \
             boil the water. <sep> simmer until tender.",
            title
        )
    }

    fn inputs() -> Vec<String> {
        vec!["rice".to_string(), "water".to_string(), "salt".to_string()]
    }

    fn pipeline(outputs: Vec<String>, enhancer: Option<Arc<dyn Enhancer>>) -> RecipePipeline {
        RecipePipeline::new(
            Arc::new(FakeGenerator { outputs }),
            enhancer,
            GenerationConfig::default(),
        )
    }

    #[test]
    fn test_generates_scored_recipes() {
        let p = pipeline(vec![raw_recipe("steamed rice")], None);
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 1);
        assert_eq!(outcome.recipes[0].recipe.title, "Steamed rice");
        assert!(outcome.recipes[0].score.overall > 0.0);
        assert_eq!(outcome.processed_ingredients, inputs());
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        let p = pipeline(vec![raw_recipe("anything")], None);
        let err = p.generate(&["".to_string(), "x".to_string()]).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyIngredients));
    }

    #[test]
    fn test_unparseable_outputs_discarded_with_warning() {
        let p = pipeline(
            vec![raw_recipe("rice bowl"), "total nonsense".to_string()],
            None,
        );
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 1);
        assert!(outcome
            .warnings
            .iter()
            .any(|w| w.contains("could not be parsed")));
    }

    #[test]
    fn test_all_unparseable_yields_empty_result() {
        let p = pipeline(vec!["garbage".to_string(), "more garbage".to_string()], None);
        let outcome = p.generate(&inputs()).unwrap();
        assert!(outcome.recipes.is_empty());
        assert_eq!(outcome.warnings.len(), 2);
    }

    #[test]
    fn test_recipes_sorted_by_score() {
        // Second output omits most input ingredients so it scores lower
        let weak = "title: plain bread <section> ingredients: flour <sep> \
                    yeast <section> directions: mix the dough well. <sep> \
                    bake until golden brown.";
        let p = pipeline(vec![weak.to_string(), raw_recipe("steamed rice")], None);
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 2);
        assert!(outcome.recipes[0].score.overall >= outcome.recipes[1].score.overall);
        assert_eq!(outcome.recipes[0].recipe.title, "Steamed rice");
    }

    #[test]
    fn test_candidate_cap_respected() {
        let outputs = vec![
            raw_recipe("rice one"),
            raw_recipe("rice two"),
            raw_recipe("rice three"),
        ];
        let p = pipeline(outputs, None);
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 2);
    }

    #[test]
    fn test_fixed_seed_varies_across_rounds() {
        let generator = Arc::new(RecordingGenerator {
            seeds: std::sync::Mutex::new(Vec::new()),
            outputs: vec![raw_recipe("steamed rice")],
        });
        let config = GenerationConfig {
            seed: Some(42),
            num_candidates: 2,
            num_rounds: 3,
            ..Default::default()
        };
        let p = RecipePipeline::new(generator.clone(), None, config);
        p.generate(&inputs()).unwrap();

        let seeds = generator.seeds.lock().unwrap().clone();
        assert_eq!(seeds, vec![Some(42), Some(44), Some(46)]);
    }

    #[test]
    fn test_unseeded_rounds_leave_seed_random() {
        let generator = Arc::new(RecordingGenerator {
            seeds: std::sync::Mutex::new(Vec::new()),
            outputs: vec![raw_recipe("steamed rice")],
        });
        let config = GenerationConfig {
            num_rounds: 2,
            ..Default::default()
        };
        let p = RecipePipeline::new(generator.clone(), None, config);
        p.generate(&inputs()).unwrap();

        let seeds = generator.seeds.lock().unwrap().clone();
        assert_eq!(seeds, vec![None, None]);
    }

    #[test]
    fn test_identical_candidates_collapse_to_one() {
        let p = pipeline(
            vec![raw_recipe("steamed rice"), raw_recipe("steamed rice")],
            None,
        );
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 1);
    }

    #[test]
    fn test_enhancer_failure_falls_back_to_original() {
        let p = pipeline(vec![raw_recipe("steamed rice")], Some(Arc::new(BrokenEnhancer)));
        let outcome = p.generate(&inputs()).unwrap();
        assert_eq!(outcome.recipes.len(), 1);
        assert_eq!(outcome.recipes[0].recipe.title, "Steamed rice");
        assert_eq!(
            outcome.recipes[0].recipe.directions,
            vec![
                "rinse the rice well.",
                "boil the water.",
                "simmer until tender."
            ]
        );
    }
}
