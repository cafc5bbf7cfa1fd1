use std::path::PathBuf;

use serde::Serialize;
use tracing::info;

use crate::commands::recipes::unknown_recipe;
use crate::commands::{persistence_failure, recipe_source_failure, with_kitchen, CommandResult};

pub const DEFAULT_EXPORT_FILE: &str = "favorites.json";

#[derive(Debug, Serialize)]
struct ToggledFavorite {
    message: String,
    id: String,
    favorite: bool,
    count: usize,
}

/// Flips the favorite state of the recipe with this id.
///
/// A favorite whose file has since disappeared can still be removed from its snapshot.
pub fn toggle(id: &str) -> CommandResult {
    let id = id.trim().to_string();
    with_kitchen("favorite", |kitchen| async move {
        let mut favorites = kitchen.favorites.load().await;
        let catalog = match kitchen.recipes.load_all().await {
            Ok(catalog) => catalog,
            Err(error) => return recipe_source_failure("favorite", error),
        };

        let recipe = catalog
            .recipes
            .into_iter()
            .find(|recipe| recipe.id.to_string() == id)
            .or_else(|| favorites.find(&id).cloned());
        let Some(recipe) = recipe else {
            return unknown_recipe("favorite", &id);
        };

        let favorite = favorites.toggle(&recipe);
        if let Err(error) = kitchen.favorites.save(&favorites).await {
            return persistence_failure("favorite", error);
        }

        info!(event_name = "cli.favorites.toggled", recipe_id = %id, favorite, "favorite toggled");
        let verb = if favorite { "added to" } else { "removed from" };
        let toggled = ToggledFavorite {
            message: format!("`{}` {verb} favorites", recipe.name),
            id,
            favorite,
            count: favorites.len(),
        };
        CommandResult::report("favorite", &toggled)
    })
}

/// Writes every favorite to `out` (default `favorites.json`) as one pretty document.
pub fn export(out: Option<PathBuf>) -> CommandResult {
    let path = out.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
    with_kitchen("export-favorites", |kitchen| async move {
        let favorites = kitchen.favorites.load().await;
        let document = match favorites.export() {
            Ok(document) => document,
            Err(error) => {
                return CommandResult::from_application_error("export-favorites", error.into())
            }
        };

        if let Err(error) = tokio::fs::write(&path, document).await {
            return persistence_failure(
                "export-favorites",
                format!("could not write `{}`: {error}", path.display()),
            );
        }

        info!(
            event_name = "cli.favorites.exported",
            count = favorites.len(),
            path = %path.display(),
            "favorites exported"
        );
        CommandResult::success(
            "export-favorites",
            format!("exported {} favorites to `{}`", favorites.len(), path.display()),
        )
    })
}
