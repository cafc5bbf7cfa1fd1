use std::path::PathBuf;

use serde::Serialize;
use tracing::info;
use whatcanicook_core::domain::recipe::{Recipe, RecipeId};
use whatcanicook_core::errors::{ApplicationError, DomainError};
use whatcanicook_core::export::RecipeDraft;
use whatcanicook_core::filters::{FilterOutcome, RecipeFilter};
use whatcanicook_core::matching::score_recipe;
use whatcanicook_db::write_recipe_file;

use crate::commands::{recipe_source_failure, with_kitchen, CommandResult};

const NO_FAVORITES: &str = "No favorites yet. Use `favorite <id>` on any recipe to save it!";

#[derive(Debug, Serialize)]
struct RecipeList<'a> {
    outcome: &'static str,
    count: usize,
    message: Option<&'static str>,
    recipes: Vec<RecipeSummary<'a>>,
}

#[derive(Debug, Serialize)]
struct RecipeSummary<'a> {
    id: String,
    name: &'a str,
    meal: &'a str,
    cuisine: &'a str,
    cook_time: Option<u32>,
    servings: Option<u32>,
    complexity: Option<String>,
}

impl<'a> From<&'a Recipe> for RecipeSummary<'a> {
    fn from(recipe: &'a Recipe) -> Self {
        Self {
            id: recipe.id.to_string(),
            name: &recipe.name,
            meal: &recipe.meal,
            cuisine: &recipe.cuisine,
            cook_time: recipe.cook_time,
            servings: recipe.servings,
            complexity: recipe.complexity_stars(),
        }
    }
}

#[derive(Debug, Serialize)]
struct RecipeDetail<'a> {
    #[serde(flatten)]
    summary: RecipeSummary<'a>,
    favorite: bool,
    score: u32,
    image: Option<String>,
    source: Option<&'a str>,
    ingredients: Vec<IngredientLine<'a>>,
    instructions: &'a [String],
}

#[derive(Debug, Serialize)]
struct IngredientLine<'a> {
    name: &'a str,
    quantity: &'a str,
    have: bool,
}

#[derive(Debug, Serialize)]
struct SavedRecipe<'a> {
    message: String,
    path: String,
    recipe: &'a Recipe,
}

/// Lists recipe files, or the saved favorites when `favorites_only` is set.
/// The filter applies to either collection.
pub fn list(filter: RecipeFilter, favorites_only: bool) -> CommandResult {
    with_kitchen("recipes", |kitchen| async move {
        if favorites_only {
            let favorites = kitchen.favorites.load().await.recipes();
            if favorites.is_empty() {
                let view = RecipeList {
                    outcome: "no_favorites",
                    count: 0,
                    message: Some(NO_FAVORITES),
                    recipes: Vec::new(),
                };
                return CommandResult::report("recipes", &view);
            }
            return CommandResult::report("recipes", &listing(filter.apply(&favorites)));
        }

        let catalog = match kitchen.recipes.load_all().await {
            Ok(catalog) => catalog,
            Err(error) => return recipe_source_failure("recipes", error),
        };
        CommandResult::report("recipes", &listing(filter.apply(&catalog.recipes)))
    })
}

fn listing(outcome: FilterOutcome<'_>) -> RecipeList<'_> {
    match outcome {
        FilterOutcome::Matches(recipes) => RecipeList {
            outcome: "matches",
            count: recipes.len(),
            message: None,
            recipes: recipes.into_iter().map(RecipeSummary::from).collect(),
        },
        FilterOutcome::NoResults => RecipeList {
            outcome: "no_results",
            count: 0,
            message: Some("No recipes match your filters."),
            recipes: Vec::new(),
        },
        FilterOutcome::Empty => RecipeList {
            outcome: "empty",
            count: 0,
            message: Some("No recipes yet."),
            recipes: Vec::new(),
        },
    }
}

/// Full recipe with each ingredient marked against the current pantry.
pub fn show(id: &str) -> CommandResult {
    let id = id.trim().to_string();
    with_kitchen("recipe", |kitchen| async move {
        let pantry = kitchen.pantry.load().await;
        let favorites = kitchen.favorites.load().await;
        let catalog = match kitchen.recipes.load_all().await {
            Ok(catalog) => catalog,
            Err(error) => return recipe_source_failure("recipe", error),
        };

        let found = catalog
            .recipes
            .iter()
            .find(|recipe| recipe.id.to_string() == id)
            .or_else(|| favorites.find(&id));
        let Some(recipe) = found else {
            return unknown_recipe("recipe", &id);
        };

        let result = score_recipe(recipe, pantry.items());
        let detail = RecipeDetail {
            summary: RecipeSummary::from(recipe),
            favorite: favorites.is_favorite(&recipe.id),
            score: result.score,
            image: recipe.image_path(),
            source: Some(recipe.source.as_str()).filter(|source| !source.is_empty()),
            ingredients: recipe
                .ingredients
                .iter()
                .map(|ingredient| IngredientLine {
                    name: ingredient.name.as_str(),
                    quantity: &ingredient.quantity,
                    have: result.has(&ingredient.name),
                })
                .collect(),
            instructions: &recipe.instructions,
        };
        CommandResult::report("recipe", &detail)
    })
}

/// Builds a recipe from the draft and writes it as a recipe file.
///
/// Without `out` the file lands in the recipes directory, where the next scan picks it up.
pub fn create(draft: RecipeDraft, id: RecipeId, out: Option<PathBuf>) -> CommandResult {
    let recipe = match draft.build(id) {
        Ok(recipe) => recipe,
        Err(error) => return CommandResult::from_application_error("new-recipe", error.into()),
    };

    with_kitchen("new-recipe", |kitchen| async move {
        let written = match out {
            Some(path) => write_recipe_file(&path, &recipe).await.map(|()| path),
            None => kitchen.recipes.save(&recipe).await,
        };
        let path = match written {
            Ok(path) => path,
            Err(error) => return recipe_source_failure("new-recipe", error),
        };

        info!(
            event_name = "cli.recipes.exported",
            recipe_id = %recipe.id,
            path = %path.display(),
            "recipe file written"
        );
        let saved = SavedRecipe {
            message: format!("saved `{}`", recipe.name),
            path: path.display().to_string(),
            recipe: &recipe,
        };
        CommandResult::report("new-recipe", &saved)
    })
}

pub(crate) fn unknown_recipe(command: &str, id: &str) -> CommandResult {
    let error = DomainError::input("id", format!("no recipe with id `{id}`"));
    CommandResult::from_application_error(command, ApplicationError::from(error))
}
