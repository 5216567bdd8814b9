//! Language enhancement pass
//!
//! Builds the rewrite instruction for the enhancement model and parses its
//! free-form response back into a structured recipe. Parsing is lenient:
//! any section the response omits keeps the original recipe's content.

use crate::recipe::Recipe;

/// Sampling settings used for the rewrite pass regardless of the
/// generation preset; rewrites want less variance than generation
pub(crate) const REWRITE_TEMPERATURE: f64 = 0.7;
pub(crate) const REWRITE_TOP_P: f64 = 0.9;
pub(crate) const REWRITE_MAX_TOKENS: usize = 1024;

/// Build the rewrite instruction for a recipe
pub(crate) fn rewrite_prompt(recipe: &Recipe) -> String {
    let ingredients = recipe
        .ingredients
        .iter()
        .map(|ing| format!("- {}", ing))
        .collect::<Vec<_>>()
        .join("\n");
    let directions = recipe
        .directions
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}", i + 1, step))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a professional culinary writer. Rewrite the following recipe \
         with elegant, professional cookbook-style language.\n\n\
         Rules:\n\
         - Keep all the same steps and ingredients\n\
         - Make descriptions more vivid and precise\n\
         - Use proper culinary terminology\n\
         - Add helpful cooking tips where appropriate\n\
         - Maintain the same structure (title, ingredients, directions)\n\
         - Do not add new ingredients or steps\n\
         - Keep it concise but refined\n\n\
         Original Recipe:\n\
         Title: {}\n\n\
         Ingredients:\n{}\n\n\
         Directions:\n{}\n\n\
         ---\n\
         Rewrite the recipe below in the exact same format \
         (Title:, Ingredients:, Directions:):\n",
        recipe.title, ingredients, directions
    )
}

/// Parse a rewrite response, falling back to the original per section
pub(crate) fn parse_rewrite(response: &str, original: &Recipe) -> Recipe {
    let lines: Vec<&str> = response.lines().collect();

    let mut recipe = original.clone();

    let mut title_seen = false;
    let mut ingredients_start = None;
    let mut directions_start = None;
    for (i, line) in lines.iter().enumerate() {
        let lower = line.to_lowercase();
        if lower.starts_with("title:") && !title_seen {
            let title = line.splitn(2, ':').nth(1).unwrap_or("").trim();
            if !title.is_empty() {
                recipe.title = title.to_string();
                title_seen = true;
            }
        } else if lower.contains("ingredients:") && ingredients_start.is_none() {
            ingredients_start = Some(i + 1);
        } else if lower.contains("directions:") && directions_start.is_none() {
            directions_start = Some(i + 1);
        }
    }

    if let Some(start) = ingredients_start {
        let end = directions_start.map(|d| d - 1).unwrap_or(lines.len());
        let items = collect_items(&lines[start..end.max(start)], strip_bullet);
        if !items.is_empty() {
            recipe.ingredients = items;
        }
    }

    if let Some(start) = directions_start {
        let items = collect_items(&lines[start..], strip_numbering);
        if !items.is_empty() {
            recipe.directions = items;
        }
    }

    recipe
}

fn collect_items(lines: &[&str], clean: fn(&str) -> String) -> Vec<String> {
    lines
        .iter()
        .map(|line| clean(line.trim()))
        .filter(|item| !item.is_empty())
        .collect()
}

fn strip_bullet(line: &str) -> String {
    line.trim_start_matches(['-', '*', '•', ' ']).trim().to_string()
}

fn strip_numbering(line: &str) -> String {
    let rest = line.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() < line.len() {
        rest.trim_start_matches(['.', ')']).trim().to_string()
    } else {
        line.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn original() -> Recipe {
        Recipe {
            title: "Plain toast".to_string(),
            ingredients: vec!["bread".to_string(), "butter".to_string()],
            directions: vec!["toast bread.".to_string(), "spread butter.".to_string()],
        }
    }

    #[test]
    fn test_prompt_contains_recipe() {
        let prompt = rewrite_prompt(&original());
        assert!(prompt.contains("Title: Plain toast"));
        assert!(prompt.contains("- bread"));
        assert!(prompt.contains("1. toast bread."));
    }

    #[test]
    fn test_full_response_parsed() {
        let response = "Title: Golden Buttered Toast\n\
            Ingredients:\n- 2 slices artisan bread\n- salted butter\n\
            Directions:\n1. Toast the bread until golden.\n2. Spread the butter generously.";
        let recipe = parse_rewrite(response, &original());
        assert_eq!(recipe.title, "Golden Buttered Toast");
        assert_eq!(
            recipe.ingredients,
            vec!["2 slices artisan bread", "salted butter"]
        );
        assert_eq!(recipe.directions.len(), 2);
        assert_eq!(recipe.directions[0], "Toast the bread until golden.");
    }

    #[test]
    fn test_missing_sections_keep_original() {
        let response = "Title: Golden Toast\nSome chatter without any sections.";
        let recipe = parse_rewrite(response, &original());
        assert_eq!(recipe.title, "Golden Toast");
        assert_eq!(recipe.ingredients, original().ingredients);
        assert_eq!(recipe.directions, original().directions);
    }

    #[test]
    fn test_garbage_response_keeps_everything() {
        let recipe = parse_rewrite("I cannot help with that.", &original());
        assert_eq!(recipe, original());
    }
}
