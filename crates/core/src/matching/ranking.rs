use serde::{Deserialize, Serialize};

use super::scoring::{MatchResult, RecipeScorer};
use super::{ALMOST_SCORE, READY_SCORE};
use crate::domain::pantry::PantryItem;
use crate::domain::recipe::Recipe;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredRecipe {
    pub recipe: Recipe,
    #[serde(flatten)]
    pub result: MatchResult,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Ready,
    Almost,
    NeedMore,
}

impl Tier {
    pub fn from_score(score: u32) -> Self {
        if score >= READY_SCORE {
            Self::Ready
        } else if score >= ALMOST_SCORE {
            Self::Almost
        } else {
            Self::NeedMore
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Ready => "Ready to Cook",
            Self::Almost => "Almost There",
            Self::NeedMore => "Need More Ingredients",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierGroup {
    pub tier: Tier,
    pub title: String,
    pub recipes: Vec<ScoredRecipe>,
}

/// Scores every recipe and orders them by score, highest first. Ties keep input order.
pub fn rank_recipes(recipes: Vec<Recipe>, pantry: &[PantryItem]) -> Vec<ScoredRecipe> {
    let scorer = RecipeScorer::new();
    let mut scored: Vec<ScoredRecipe> = recipes
        .into_iter()
        .map(|recipe| {
            let result = scorer.score(&recipe, pantry);
            ScoredRecipe { recipe, result }
        })
        .collect();
    scored.sort_by(|left, right| right.result.score.cmp(&left.result.score));
    scored
}

/// Buckets ranked recipes into ready / almost / need-more groups, dropping empty groups.
pub fn group_by_tier(scored: Vec<ScoredRecipe>) -> Vec<TierGroup> {
    let mut groups: Vec<TierGroup> = [Tier::Ready, Tier::Almost, Tier::NeedMore]
        .into_iter()
        .map(|tier| TierGroup { tier, title: tier.title().to_string(), recipes: Vec::new() })
        .collect();

    for entry in scored {
        let tier = Tier::from_score(entry.result.score);
        if let Some(group) = groups.iter_mut().find(|group| group.tier == tier) {
            group.recipes.push(entry);
        }
    }

    groups.retain(|group| !group.recipes.is_empty());
    groups
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingPreview {
    pub shown: Vec<String>,
    pub overflow: usize,
}

impl MissingPreview {
    pub fn is_complete(&self) -> bool {
        self.shown.is_empty() && self.overflow == 0
    }

    pub fn render(&self) -> String {
        if self.is_complete() {
            return "You have everything!".to_string();
        }
        let mut parts = self.shown.clone();
        if self.overflow > 0 {
            parts.push(format!("+{} more", self.overflow));
        }
        format!("Still need: {}", parts.join(", "))
    }
}

pub fn missing_preview(result: &MatchResult, limit: usize) -> MissingPreview {
    let shown = result
        .missing
        .iter()
        .take(limit)
        .map(|ingredient| ingredient.name.as_str().to_string())
        .collect::<Vec<_>>();
    let overflow = result.missing.len().saturating_sub(limit);
    MissingPreview { shown, overflow }
}
