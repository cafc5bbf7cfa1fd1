pub mod config;
pub mod domain;
pub mod errors;
pub mod expiry;
pub mod export;
pub mod filters;
pub mod matching;
pub mod shelf_life;

pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::favorites::Favorites;
pub use domain::pantry::{Pantry, PantryInput, PantryItem, PantryListing};
pub use domain::recipe::{IngredientName, Recipe, RecipeId, RecipeIngredient, Unit};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use expiry::{classify, ExpiryState, ExpiryStatus};
pub use export::{export_document, export_filename, IngredientRow, RecipeDraft};
pub use filters::{FilterOutcome, RecipeFilter};
pub use matching::{
    group_by_tier, missing_preview, rank_recipes, score_recipe, MatchResult, MissingPreview,
    RecipeScorer, ScoredRecipe, Tier, TierGroup,
};
pub use shelf_life::{estimate_expiry, estimate_shelf_life_days};
