use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::PlannerError;

/// Matches the first `{...}` or `[...]` block, spanning newlines
static JSON_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{.*\}|\[.*\]").expect("JSON block pattern is valid")
});

/// Extracts the first JSON block embedded in model output
///
/// Models are prompted to answer with JSON but routinely wrap the payload in
/// commentary. This returns the first brace- or bracket-delimited span
/// verbatim so callers can decode just the data portion. The first block
/// wins even when a later one holds the intended answer, so prompts must
/// stay free of JSON-shaped examples.
///
/// # Arguments
/// * `text` - Raw completion text
///
/// # Returns
/// The matched block as a slice of `text`
///
/// # Errors
/// Returns [`PlannerError::NoJsonBlock`] if no block is present
pub fn extract_json_block(text: &str) -> Result<&str, PlannerError> {
    JSON_BLOCK
        .find(text)
        .map(|m| m.as_str())
        .ok_or(PlannerError::NoJsonBlock)
}

/// Parses a list of ingredient names out of model output
///
/// Prefers the structured path: the first JSON block is decoded and read as
/// an array of strings, either bare or under an `ingredients` key. Anything
/// that fails along the way falls back to splitting the raw text on commas
/// and newlines. The result is trimmed, empties are dropped, and duplicates
/// are removed case-insensitively keeping the first-seen casing.
///
/// Never fails: unusable input yields an empty list.
pub fn parse_ingredient_list(text: &str) -> Vec<String> {
    let candidates = structured_items(text)
        .unwrap_or_else(|| text.split([',', '\n']).map(str::to_string).collect());
    dedupe_ingredients(candidates)
}

/// Structured path: JSON block -> decode -> array of strings
fn structured_items(text: &str) -> Option<Vec<String>> {
    let block = extract_json_block(text).ok()?;
    let decoded: Value = serde_json::from_str(block).ok()?;
    let items = match decoded.get("ingredients") {
        Some(inner) => inner,
        None => &decoded,
    };
    Some(
        items
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
    )
}

/// Trims candidates, drops empties, and deduplicates case-insensitively
/// while preserving first-seen order and casing
pub(crate) fn dedupe_ingredients<I>(candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    let mut unique = Vec::new();
    for candidate in candidates {
        let trimmed = candidate.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            unique.push(trimmed.to_string());
        }
    }
    unique
}
