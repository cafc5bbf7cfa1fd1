pub mod connection;
pub mod migrations;
pub mod recipes;
pub mod repositories;

pub use connection::{connect_with_config, connect_with_settings, DbPool};
pub use recipes::{
    write_recipe_file, RecipeCatalog, RecipeLoader, RecipeSourceError, SkippedRecipe,
};
pub use repositories::{
    FavoritesRepository, InMemoryKeyValueStore, KeyValueStore, PantryRepository,
    RepositoryError, SqlKeyValueStore,
};
