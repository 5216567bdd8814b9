//! Parsing of raw model output into structured recipes
//!
//! The generation model emits a flat string with `title:`, `ingredients:` and
//! `directions:` sections, list items separated by `<sep>` and sections by
//! `<section>`. The parser recovers a [`Recipe`] from that string; output
//! missing any of the three sections is reported as unparsed.

use super::Recipe;

/// Tokenizer artifacts stripped from raw output before parsing
const SPECIAL_TOKENS: [&str; 3] = ["<pad>", "</s>", "<unk>"];

/// Section keys, in the order the model emits them
const SECTION_KEYS: [&str; 3] = ["title:", "ingredients:", "directions:"];

/// Result of parsing one raw model output
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOutcome {
    /// All three sections were found and non-empty
    Parsed(Recipe),
    /// The output could not be parsed; carries the cleaned raw text
    Unparsed(String),
}

/// Parser for raw generation output
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputParser;

impl OutputParser {
    /// Parse raw model output into a structured recipe
    pub fn parse(&self, raw: &str) -> ParseOutcome {
        let cleaned = clean_raw(raw);

        let title = clean_title(&extract_section(&cleaned, "title:"));
        let ingredients = split_list(&extract_section(&cleaned, "ingredients:"), 1);
        let directions = split_list(&extract_section(&cleaned, "directions:"), 2);

        if title.is_empty() || ingredients.is_empty() || directions.is_empty() {
            return ParseOutcome::Unparsed(cleaned);
        }

        ParseOutcome::Parsed(Recipe {
            title,
            ingredients,
            directions,
        })
    }
}

/// Lowercase, strip special tokens, map separator tokens, and collapse
/// whitespace
fn clean_raw(raw: &str) -> String {
    let mut text = raw
        .to_lowercase()
        .replace("<sep>", " -- ")
        .replace("<section>", "\n");
    for token in SPECIAL_TOKENS {
        text = text.replace(token, " ");
    }
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extract the text between a section key and the next key (or end of text)
///
/// Sections may appear in any order; the input is already lowercased.
fn extract_section(text: &str, key: &str) -> String {
    let Some(start) = text.find(key) else {
        return String::new();
    };
    let body_start = start + key.len();

    let end = SECTION_KEYS
        .iter()
        .filter(|other| **other != key)
        .filter_map(|other| text[body_start..].find(other))
        .min()
        .map(|offset| body_start + offset)
        .unwrap_or(text.len());

    text[body_start..end].trim().to_string()
}

/// Split a section body on `--` item separators, cleaning each item
///
/// Items at or below `min_len` characters are dropped.
fn split_list(body: &str, min_len: usize) -> Vec<String> {
    body.split("--")
        .map(clean_item)
        .filter(|item| item.chars().count() > min_len)
        .collect()
}

/// Strip leading enumeration markers ("1.", "2)", "-", "*") and trim
///
/// Bare leading numbers are quantities ("3 cloves garlic") and are kept.
fn clean_item(item: &str) -> String {
    let mut rest = item.trim();
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let after = &rest[digits..];
        if let Some(stripped) = after.strip_prefix('.').or_else(|| after.strip_prefix(')')) {
            rest = stripped;
        }
    }
    rest.trim_start_matches(['-', '*']).trim().to_string()
}

/// Strip stray punctuation from a title and capitalize the first letter
fn clean_title(title: &str) -> String {
    let trimmed = title.trim_matches(|c: char| ".,!?:;-_".contains(c) || c.is_whitespace());
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
