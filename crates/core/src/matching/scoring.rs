//! Recipe completion scoring against pantry contents

use serde::{Deserialize, Serialize};

use super::matcher::{contains_staple, ingredient_matches, STAPLES};
use crate::domain::pantry::PantryItem;
use crate::domain::recipe::{IngredientName, Recipe, RecipeIngredient};

/// Stable partition of a recipe's ingredients plus the completion percentage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Ingredients covered by the pantry or by a staple, in recipe order
    pub matched: Vec<RecipeIngredient>,
    /// Ingredients still needed, in recipe order
    pub missing: Vec<RecipeIngredient>,
    /// Integer percentage (0 - 100)
    pub score: u32,
}

impl MatchResult {
    pub fn total(&self) -> usize {
        self.matched.len() + self.missing.len()
    }

    /// Whether an ingredient with exactly this name was matched.
    pub fn has(&self, name: &IngredientName) -> bool {
        self.matched.iter().any(|ingredient| &ingredient.name == name)
    }
}

/// Scores recipes against a pantry snapshot. Holds no state between calls.
#[derive(Debug, Clone)]
pub struct RecipeScorer {
    staples: &'static [&'static str],
}

impl Default for RecipeScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeScorer {
    /// Create a scorer using the standard staple list
    pub fn new() -> Self {
        Self { staples: &STAPLES }
    }

    /// Create a scorer with a custom staple list
    pub fn with_staples(staples: &'static [&'static str]) -> Self {
        Self { staples }
    }

    /// Whether a recipe ingredient is covered regardless of pantry contents
    pub fn is_staple(&self, ingredient: &RecipeIngredient) -> bool {
        contains_staple(ingredient.name.as_str(), self.staples)
    }

    /// Whether any pantry item satisfies the ingredient
    pub fn in_pantry(&self, ingredient: &RecipeIngredient, pantry: &[PantryItem]) -> bool {
        pantry.iter().any(|item| ingredient_matches(item.name.as_str(), ingredient.name.as_str()))
    }

    /// Partition the recipe's ingredients and compute the completion score.
    ///
    /// A recipe without ingredients scores zero so it never looks ready to cook.
    pub fn score(&self, recipe: &Recipe, pantry: &[PantryItem]) -> MatchResult {
        let ingredients = &recipe.ingredients;
        if ingredients.is_empty() {
            return MatchResult::default();
        }

        let (matched, missing): (Vec<_>, Vec<_>) =
            ingredients.iter().cloned().partition(|ingredient| {
                self.is_staple(ingredient) || self.in_pantry(ingredient, pantry)
            });

        let score = percentage(matched.len(), ingredients.len());
        MatchResult { matched, missing, score }
    }
}

/// Score a recipe with the standard staple list.
pub fn score_recipe(recipe: &Recipe, pantry: &[PantryItem]) -> MatchResult {
    RecipeScorer::new().score(recipe, pantry)
}

// Exact integer rounding, half away from zero: round(part / total * 100).
fn percentage(part: usize, total: usize) -> u32 {
    let scaled = (part * 200 + total) / (total * 2);
    u32::try_from(scaled).unwrap_or(100).min(100)
}
