//! Pantry-to-recipe ingredient matching.
//!
//! `matcher` decides whether one pantry item covers one recipe ingredient,
//! `scoring` partitions a whole recipe into matched and missing ingredients,
//! and `ranking` orders scored recipes and buckets them into tiers.

mod matcher;
mod ranking;
mod scoring;

pub use matcher::{ingredient_matches, is_staple, STAPLES};
pub use ranking::{
    group_by_tier, missing_preview, rank_recipes, MissingPreview, ScoredRecipe, Tier, TierGroup,
};
pub use scoring::{score_recipe, MatchResult, RecipeScorer};

/// Score at or above which a recipe is ready to cook.
pub const READY_SCORE: u32 = 100;

/// Score at or above which a recipe is almost there.
pub const ALMOST_SCORE: u32 = 50;

/// Missing ingredients listed by name before collapsing into "+N more".
pub const MISSING_PREVIEW_LIMIT: usize = 4;
