//! Recipe types, raw-output parsing, and quality scoring

mod parse;
mod score;

pub use parse::{OutputParser, ParseOutcome};
pub use score::{RecipeScore, RecipeScorer};

use serde::{Deserialize, Serialize};

/// A structured recipe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Recipe title
    pub title: String,
    /// Ingredient lines, with quantities where the model produced them
    pub ingredients: Vec<String>,
    /// Preparation steps in order
    pub directions: Vec<String>,
}

/// A recipe together with its quality score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    #[serde(flatten)]
    pub recipe: Recipe,
    /// Heuristic quality score in [0, 1]
    pub score: RecipeScore,
}
