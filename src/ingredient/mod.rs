//! Ingredient preprocessing
//!
//! Normalizes the raw ingredient strings supplied by the client before they
//! reach the model: trim, lowercase, expand common kitchen abbreviations,
//! drop junk entries, and deduplicate while preserving order. A generation
//! request proceeds only when at least one ingredient survives.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Shortest accepted ingredient, in characters
const MIN_LEN: usize = 2;

/// Longest accepted ingredient; longer entries are truncated
const MAX_LEN: usize = 50;

/// Maximum number of ingredients passed to the model
const MAX_ITEMS: usize = 20;

/// Common kitchen abbreviations expanded word-by-word during normalization
static ABBREVIATIONS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        // Volume
        ("tbsp", "tablespoon"),
        ("tbsps", "tablespoons"),
        ("tbs", "tablespoon"),
        ("tsp", "teaspoon"),
        ("tsps", "teaspoons"),
        ("qt", "quart"),
        ("gal", "gallon"),
        ("ml", "milliliter"),
        // Weight
        ("oz", "ounce"),
        ("ozs", "ounces"),
        ("lb", "pound"),
        ("lbs", "pounds"),
        ("g", "gram"),
        ("kg", "kilogram"),
        // Size and packaging
        ("sm", "small"),
        ("med", "medium"),
        ("lg", "large"),
        ("pkg", "package"),
        ("pkt", "packet"),
        // Preparation
        ("chpd", "chopped"),
        ("grnd", "ground"),
        ("frsh", "fresh"),
        ("frz", "frozen"),
        ("bnls", "boneless"),
        // Foods
        ("evoo", "extra virgin olive oil"),
        ("veg", "vegetable"),
        ("chkn", "chicken"),
        ("chx", "chicken"),
        ("bf", "beef"),
        ("tom", "tomato"),
        ("toms", "tomatoes"),
        ("mush", "mushroom"),
        ("parm", "parmesan"),
        ("mozz", "mozzarella"),
        ("mayo", "mayonnaise"),
        // Misc
        ("w/", "with"),
        ("w/o", "without"),
        ("approx", "approximately"),
    ])
});

/// Regional and British ingredient names mapped to the forms the model
/// saw in training; scanned in order, so multi-word entries come before
/// their substrings
const SYNONYMS: &[(&str, &str)] = &[
    ("capsicum", "bell pepper"),
    ("aubergine", "eggplant"),
    ("courgette", "zucchini"),
    ("coriander", "cilantro"),
    ("rocket", "arugula"),
    ("prawns", "shrimp"),
    ("minced beef", "ground beef"),
    ("beef mince", "ground beef"),
    ("minced pork", "ground pork"),
    ("minced lamb", "ground lamb"),
    ("mince", "ground meat"),
    ("spring onions", "green onions"),
    ("spring onion", "green onion"),
    ("scallions", "green onions"),
    ("scallion", "green onion"),
    ("caster sugar", "superfine sugar"),
    ("icing sugar", "powdered sugar"),
    ("bicarbonate of soda", "baking soda"),
    ("bicarb", "baking soda"),
    ("plain flour", "all-purpose flour"),
    ("self-raising flour", "self-rising flour"),
    ("wholemeal flour", "whole wheat flour"),
    ("cornflour", "cornstarch"),
    ("polenta", "cornmeal"),
    ("double cream", "heavy cream"),
    ("single cream", "light cream"),
    ("soured cream", "sour cream"),
    ("natural yoghurt", "plain yogurt"),
    ("full fat milk", "whole milk"),
    ("skimmed milk", "skim milk"),
];

/// Result of preprocessing a raw ingredient list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedIngredients {
    /// Normalized, deduplicated ingredients in submission order
    pub items: Vec<String>,
    /// Human-readable notes about entries that were altered or dropped
    pub warnings: Vec<String>,
}

impl NormalizedIngredients {
    /// Check whether any ingredient survived preprocessing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Normalize a raw ingredient list
pub fn normalize(raw: &[String]) -> NormalizedIngredients {
    let mut out = NormalizedIngredients::default();
    let mut seen = HashSet::new();

    for entry in raw {
        let Some(cleaned) = normalize_one(entry, &mut out.warnings) else {
            continue;
        };

        if !seen.insert(cleaned.clone()) {
            out.warnings
                .push(format!("duplicate ingredient removed: '{}'", cleaned));
            continue;
        }

        out.items.push(cleaned);
    }

    if out.items.len() > MAX_ITEMS {
        out.items.truncate(MAX_ITEMS);
        out.warnings
            .push(format!("ingredient list truncated to {} items", MAX_ITEMS));
    }

    out
}

/// Normalize a single ingredient, returning None when it should be dropped
fn normalize_one(raw: &str, warnings: &mut Vec<String>) -> Option<String> {
    let mut cleaned = raw.trim().to_lowercase();
    cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");

    if cleaned.chars().count() < MIN_LEN {
        warnings.push(format!("ingredient too short, dropped: '{}'", raw));
        return None;
    }

    if cleaned.chars().count() > MAX_LEN {
        cleaned = cleaned.chars().take(MAX_LEN).collect();
        warnings.push(format!("ingredient truncated: '{}'", raw));
    }

    let expanded = cleaned
        .split(' ')
        .map(|word| ABBREVIATIONS.get(word).copied().unwrap_or(word))
        .collect::<Vec<_>>()
        .join(" ");

    Some(normalize_synonyms(&expanded))
}

/// Map a synonym to its canonical form: exact match first, then a single
/// substring replacement
fn normalize_synonyms(ingredient: &str) -> String {
    for (synonym, canonical) in SYNONYMS {
        if ingredient == *synonym {
            return canonical.to_string();
        }
    }
    for (synonym, canonical) in SYNONYMS {
        if ingredient.contains(synonym) {
            return ingredient.replace(synonym, canonical);
        }
    }
    ingredient.to_string()
}
