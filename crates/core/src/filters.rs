use serde::{Deserialize, Serialize};

use crate::domain::recipe::Recipe;

/// Search box plus meal and cuisine drop-downs. Empty criteria match everything.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeFilter {
    pub query: String,
    pub meal: String,
    pub cuisine: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    Matches(Vec<&'a Recipe>),
    /// Nothing matched an active filter.
    NoResults,
    /// There are no recipes at all.
    Empty,
}

impl RecipeFilter {
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.meal.is_empty() || !self.cuisine.is_empty()
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        let query = self.query.trim().to_lowercase();
        let by_name = query.is_empty() || recipe.name.to_lowercase().contains(&query);
        let by_meal = self.meal.is_empty() || recipe.meal == self.meal;
        let by_cuisine = self.cuisine.is_empty() || recipe.cuisine == self.cuisine;
        by_name && by_meal && by_cuisine
    }

    pub fn apply<'a>(&self, recipes: &'a [Recipe]) -> FilterOutcome<'a> {
        let matched: Vec<&Recipe> = recipes.iter().filter(|recipe| self.matches(recipe)).collect();
        if !matched.is_empty() {
            FilterOutcome::Matches(matched)
        } else if self.is_active() && !recipes.is_empty() {
            FilterOutcome::NoResults
        } else {
            FilterOutcome::Empty
        }
    }
}
