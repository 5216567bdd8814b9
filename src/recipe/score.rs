//! Heuristic recipe quality scoring
//!
//! Scores are pure functions of the recipe and the input ingredients; the
//! same pair always yields the same score. Four components are combined
//! into a weighted overall score in `[0, 1]`:
//!
//! - completeness: all three sections present with sensible sizes
//! - ingredient coverage: how many input ingredients the recipe uses
//! - coherence: sections look like readable text rather than noise
//! - length: ingredient and direction counts near the ideal ranges

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Recipe;

/// Score breakdown for a generated recipe
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeScore {
    /// Weighted combination of the component scores
    pub overall: f64,
    /// Section presence and sizing
    pub completeness: f64,
    /// Fraction of input ingredients used by the recipe
    pub ingredient_coverage: f64,
    /// Text readability heuristic
    pub coherence: f64,
    /// Closeness to the ideal section lengths
    pub length: f64,
}

/// Component weights and ideal section sizes
#[derive(Debug, Clone, Copy)]
pub struct RecipeScorer {
    completeness_weight: f64,
    coverage_weight: f64,
    coherence_weight: f64,
    length_weight: f64,
    ideal_ingredients: (usize, usize),
    ideal_directions: (usize, usize),
}

impl Default for RecipeScorer {
    fn default() -> Self {
        Self::new(0.3, 0.3, 0.2, 0.2)
    }
}

impl RecipeScorer {
    /// Create a scorer with the given component weights
    ///
    /// Weights are normalized so they sum to one.
    pub fn new(completeness: f64, coverage: f64, coherence: f64, length: f64) -> Self {
        let total = completeness + coverage + coherence + length;
        Self {
            completeness_weight: completeness / total,
            coverage_weight: coverage / total,
            coherence_weight: coherence / total,
            length_weight: length / total,
            ideal_ingredients: (3, 15),
            ideal_directions: (3, 12),
        }
    }

    /// Score a recipe against the ingredients the client submitted
    pub fn score(&self, recipe: &Recipe, input_ingredients: &[String]) -> RecipeScore {
        let completeness = self.completeness(recipe);
        let ingredient_coverage = self.coverage(&recipe.ingredients, input_ingredients);
        let coherence = self.coherence(recipe);
        let length = self.length(recipe);

        let overall = self.completeness_weight * completeness
            + self.coverage_weight * ingredient_coverage
            + self.coherence_weight * coherence
            + self.length_weight * length;

        RecipeScore {
            overall: round3(overall),
            completeness: round3(completeness),
            ingredient_coverage: round3(ingredient_coverage),
            coherence: round3(coherence),
            length: round3(length),
        }
    }

    fn completeness(&self, recipe: &Recipe) -> f64 {
        let mut score = 0.0;

        if !recipe.title.is_empty() {
            let len = recipe.title.chars().count();
            score += if (5..=50).contains(&len) { 0.3 } else { 0.15 };
        }

        let (min_ing, max_ing) = self.ideal_ingredients;
        if !recipe.ingredients.is_empty() {
            let n = recipe.ingredients.len();
            score += if (min_ing..=max_ing).contains(&n) { 0.35 } else { 0.2 };
        }

        let (min_dir, max_dir) = self.ideal_directions;
        if !recipe.directions.is_empty() {
            let n = recipe.directions.len();
            score += if (min_dir..=max_dir).contains(&n) { 0.35 } else { 0.2 };
        }

        score
    }

    fn coverage(&self, recipe_ingredients: &[String], input_ingredients: &[String]) -> f64 {
        if input_ingredients.is_empty() {
            return 1.0;
        }
        if recipe_ingredients.is_empty() {
            return 0.0;
        }

        let input_words = ingredient_words(input_ingredients);
        if input_words.is_empty() {
            return 1.0;
        }
        let recipe_text = recipe_ingredients.join(" ").to_lowercase();

        let matches = input_words
            .iter()
            .filter(|word| word_in_text(word, &recipe_text))
            .count();

        let mut coverage = matches as f64 / input_words.len() as f64;
        if coverage >= 0.8 {
            coverage = (coverage * 1.1).min(1.0);
        }
        coverage
    }

    fn coherence(&self, recipe: &Recipe) -> f64 {
        let mut score = 0.0;

        if !recipe.title.is_empty() {
            score += if is_clean_title(&recipe.title) {
                0.3
            } else if recipe.title.starts_with(|c: char| c.is_ascii_alphabetic()) {
                0.2
            } else {
                0.0
            };
        }

        if !recipe.ingredients.is_empty() {
            let valid = recipe
                .ingredients
                .iter()
                .filter(|item| is_readable_ingredient(item))
                .count();
            score += 0.35 * valid as f64 / recipe.ingredients.len() as f64;
        }

        if !recipe.directions.is_empty() {
            let valid = recipe
                .directions
                .iter()
                .filter(|step| is_readable_direction(step))
                .count();
            score += 0.35 * valid as f64 / recipe.directions.len() as f64;
        }

        score
    }

    fn length(&self, recipe: &Recipe) -> f64 {
        section_length_score(recipe.ingredients.len(), self.ideal_ingredients)
            + section_length_score(recipe.directions.len(), self.ideal_directions)
    }
}

/// Half-point score for one section's item count against its ideal range
fn section_length_score(count: usize, (min, max): (usize, usize)) -> f64 {
    if count == 0 {
        return 0.0;
    }
    if (min..=max).contains(&count) {
        return 0.5;
    }
    let dist = count.abs_diff(min).min(count.abs_diff(max)) as f64;
    0.5 * (1.0 - dist / max as f64).max(0.0)
}

/// Meaningful lowercase words from the input ingredient list
fn ingredient_words(ingredients: &[String]) -> BTreeSet<String> {
    ingredients
        .iter()
        .flat_map(|ing| ing.to_lowercase().split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .filter(|word| word.chars().count() > 2 && !word.chars().all(|c| c.is_ascii_digit()))
        .collect()
}

/// Check whether a word (or a simple singular/plural variant) appears in text
fn word_in_text(word: &str, text: &str) -> bool {
    if text.contains(word) {
        return true;
    }
    let singular = word.strip_suffix('s').unwrap_or(word);
    text.contains(&format!("{}s", word))
        || text.contains(&format!("{}es", word))
        || text.contains(singular)
}

/// Titles made only of letters, spaces, hyphens and apostrophes, starting
/// with an uppercase letter
fn is_clean_title(title: &str) -> bool {
    let mut chars = title.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_uppercase()
        && chars.all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-' || c == '\'')
}

fn is_readable_ingredient(text: &str) -> bool {
    if text.chars().count() < 2 {
        return false;
    }
    if !text.chars().any(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    let readable = text
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .count();
    readable as f64 / text.chars().count() as f64 > 0.6
}

fn is_readable_direction(text: &str) -> bool {
    text.chars().count() >= 5
        && text.starts_with(|c: char| c.is_ascii_alphanumeric())
        && text.contains(' ')
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
