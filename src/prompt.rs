use crate::model::RecipeMetadata;

/// Hint sentences appended on regeneration requests so repeated calls over
/// the same fridge contents steer toward different dishes
pub const VARIETY_HINTS: [&str; 5] = [
    "Suggest a completely different dish than an obvious first choice.",
    "Lean toward a comforting, home-style preparation.",
    "Lean toward a light and fresh preparation.",
    "Favor a quick preparation that is ready in under thirty minutes.",
    "Favor a slow-cooked or oven-baked preparation.",
];

/// Picks the hint for a regeneration index, wrapping around the fixed set
pub fn variety_hint(index: u32) -> &'static str {
    VARIETY_HINTS[index as usize % VARIETY_HINTS.len()]
}

/// Prompt sent alongside an uploaded photo or document
pub fn ingredient_prompt(max_ingredients: u32) -> String {
    format!(
        "You are assisting with meal planning. \
         Identify every distinct ingredient visible in this fridge photo or document. \
         Return a JSON array of ingredient names in lowercase. \
         Limit the list to {max_ingredients} items."
    )
}

/// Prompt asking for a structured recipe over the detected ingredients
///
/// Ingredients are sorted so identical fridge contents produce an identical
/// prompt. Each present constraint appends one sentence in a fixed order:
/// dietary preferences, allergies, cuisine, servings, then the variety hint.
pub fn recipe_prompt(
    ingredients: &[String],
    constraints: &RecipeMetadata,
    variety_hint: Option<&str>,
) -> String {
    let mut sorted: Vec<&str> = ingredients.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    let joined_ingredients = sorted.join(", ");

    let mut prompt = format!(
        "Create a recipe using the following fridge ingredients: {joined_ingredients}. \
         Provide the answer as a JSON object with keys 'title', 'summary', \
         'ingredients' (array of strings), and 'steps' (array of objects with \
         'order' and 'instruction'). Ensure steps are detailed and actionable. "
    );

    let mut preferences = Vec::new();
    if let Some(dietary) = non_blank(&constraints.dietary_preferences) {
        preferences.push(format!("Dietary preferences: {dietary}."));
    }
    if let Some(allergies) = non_blank(&constraints.allergies) {
        preferences.push(format!("Avoid: {allergies}."));
    }
    if let Some(cuisine) = non_blank(&constraints.cuisine) {
        preferences.push(format!("Cuisine inspiration: {cuisine} cuisine."));
    }
    if let Some(servings) = constraints.servings.filter(|&servings| servings > 0) {
        preferences.push(format!("Servings: {servings}."));
    }
    if let Some(hint) = variety_hint {
        preferences.push(hint.to_string());
    }
    prompt.push_str(&preferences.join(" "));
    prompt
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|value| !value.is_empty())
}
