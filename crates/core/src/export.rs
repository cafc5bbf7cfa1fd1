//! Building recipe documents from form input and writing them out as JSON.

use serde::{Deserialize, Serialize};

use crate::domain::recipe::{
    join_quantity, IngredientName, Recipe, RecipeId, RecipeIngredient, Unit,
};
use crate::errors::DomainError;

pub const MAX_COMPLEXITY: u8 = 5;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub name: String,
    pub amount: String,
    pub unit: String,
}

impl IngredientRow {
    pub fn new(name: impl Into<String>, amount: impl Into<String>, unit: impl Into<String>) -> Self {
        Self { name: name.into(), amount: amount.into(), unit: unit.into() }
    }
}

/// Unvalidated recipe form contents.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDraft {
    pub name: String,
    pub meal: String,
    pub cuisine: String,
    pub cook_time: String,
    pub servings: String,
    pub complexity: u8,
    pub image: String,
    pub source: String,
    pub ingredients: Vec<IngredientRow>,
    pub steps: Vec<String>,
}

impl RecipeDraft {
    /// Validates the draft and produces the recipe record.
    ///
    /// Rows without a name and blank steps are dropped rather than rejected.
    pub fn build(&self, id: RecipeId) -> Result<Recipe, DomainError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(DomainError::input("name", "please enter a recipe name"));
        }
        if self.meal.trim().is_empty() {
            return Err(DomainError::input("meal", "please select a meal type"));
        }

        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for row in &self.ingredients {
            let row_name = row.name.trim();
            if row_name.is_empty() {
                continue;
            }
            let unit = row.unit.parse::<Unit>()?;
            ingredients.push(RecipeIngredient::new(
                IngredientName::parse(row_name)?,
                join_quantity(&row.amount, unit.as_str()),
            ));
        }

        let instructions = self
            .steps
            .iter()
            .map(|step| step.trim())
            .filter(|step| !step.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Recipe {
            id,
            name: name.to_string(),
            meal: self.meal.trim().to_string(),
            cuisine: self.cuisine.trim().to_string(),
            cook_time: leading_positive_int(&self.cook_time),
            servings: leading_positive_int(&self.servings),
            complexity: self.complexity.min(MAX_COMPLEXITY),
            image: self.image.trim().to_string(),
            source: self.source.trim().to_string(),
            ingredients,
            instructions,
        })
    }
}

/// `"Coconut Miso Salmon Curry!"` becomes `"coconut-miso-salmon-curry-.json"`.
pub fn export_filename(recipe_name: &str) -> String {
    let mut slug = String::with_capacity(recipe_name.len() + 5);
    let mut in_gap = false;
    for ch in recipe_name.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            slug.push(ch);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug.push_str(".json");
    slug
}

/// Two-space indented JSON, matching hand-exported recipe files.
pub fn export_document(recipe: &Recipe) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(recipe)
}

// Reads leading digits the way form number fields are parsed; zero and garbage become None.
fn leading_positive_int(text: &str) -> Option<u32> {
    let digits: String = text.trim().chars().take_while(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().filter(|value| *value > 0)
}
