/// Ingredients assumed to be on hand in every kitchen.
pub const STAPLES: [&str; 5] = ["water", "salt", "pepper", "oil", "olive oil"];

/// Tolerant containment: either folded name contains the other.
pub fn ingredient_matches(pantry_name: &str, recipe_name: &str) -> bool {
    let pantry = pantry_name.trim().to_lowercase();
    let recipe = recipe_name.trim().to_lowercase();
    recipe.contains(&pantry) || pantry.contains(&recipe)
}

pub fn is_staple(recipe_name: &str) -> bool {
    contains_staple(recipe_name, &STAPLES)
}

pub(crate) fn contains_staple(recipe_name: &str, staples: &[&str]) -> bool {
    let lowered = recipe_name.to_lowercase();
    staples.iter().any(|staple| lowered.contains(*staple))
}
