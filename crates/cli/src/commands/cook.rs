use serde::Serialize;
use whatcanicook_core::domain::pantry::Pantry;
use whatcanicook_core::domain::recipe::Recipe;
use whatcanicook_core::matching::{
    group_by_tier, missing_preview, rank_recipes, ScoredRecipe, Tier, TierGroup,
    MISSING_PREVIEW_LIMIT,
};

use crate::commands::{recipe_source_failure, with_kitchen, CommandResult};

#[derive(Debug, Serialize)]
struct CookView {
    pantry: PantrySummary,
    favorites: Vec<CookCard>,
    tiers: Vec<TierView>,
    notice: Option<String>,
}

#[derive(Debug, Serialize)]
struct PantrySummary {
    count: usize,
    names: Vec<String>,
}

#[derive(Debug, Serialize)]
struct TierView {
    tier: Tier,
    title: String,
    recipes: Vec<CookCard>,
}

#[derive(Debug, Serialize)]
struct CookCard {
    id: String,
    name: String,
    meal: String,
    score: u32,
    have: usize,
    total: usize,
    missing: Vec<String>,
    still_need: String,
}

impl From<&ScoredRecipe> for CookCard {
    fn from(entry: &ScoredRecipe) -> Self {
        Self {
            id: entry.recipe.id.to_string(),
            name: entry.recipe.name.clone(),
            meal: entry.recipe.meal.clone(),
            score: entry.result.score,
            have: entry.result.matched.len(),
            total: entry.result.total(),
            missing: entry
                .result
                .missing
                .iter()
                .map(|ingredient| ingredient.name.as_str().to_string())
                .collect(),
            still_need: missing_preview(&entry.result, MISSING_PREVIEW_LIMIT).render(),
        }
    }
}

impl From<TierGroup> for TierView {
    fn from(group: TierGroup) -> Self {
        Self {
            tier: group.tier,
            title: group.title,
            recipes: group.recipes.iter().map(CookCard::from).collect(),
        }
    }
}

pub fn run(json_output: bool) -> CommandResult {
    with_kitchen("cook", |kitchen| async move {
        let pantry = kitchen.pantry.load().await;
        let favorites = kitchen.favorites.load().await;
        let catalog = match kitchen.recipes.load_all().await {
            Ok(catalog) => catalog,
            Err(error) => return recipe_source_failure("cook", error),
        };

        let view = build_view(&pantry, catalog.recipes, favorites.recipes());
        if json_output {
            CommandResult::report("cook", &view)
        } else {
            CommandResult::text(render_human(&view))
        }
    })
}

fn build_view(
    pantry: &Pantry,
    recipes: Vec<Recipe>,
    favorites: Vec<Recipe>,
) -> CookView {
    let items = pantry.items();
    let notice = recipes.is_empty().then_some("No recipes yet. Add some recipes to get started!");

    CookView {
        pantry: PantrySummary {
            count: items.len(),
            names: items.iter().map(|item| item.name.as_str().to_string()).collect(),
        },
        favorites: rank_recipes(favorites, items).iter().map(CookCard::from).collect(),
        tiers: group_by_tier(rank_recipes(recipes, items))
            .into_iter()
            .map(TierView::from)
            .collect(),
        notice: notice.map(str::to_string),
    }
}

fn render_human(view: &CookView) -> String {
    let mut lines = Vec::new();

    if view.pantry.count == 0 {
        lines.push("Your pantry is empty. Add ingredients with `pantry add`.".to_string());
    } else {
        let plural = if view.pantry.count == 1 { "" } else { "s" };
        lines.push(format!("{} ingredient{plural} in your pantry", view.pantry.count));
        lines.push(format!("  {}", view.pantry.names.join(", ")));
    }

    if !view.favorites.is_empty() {
        lines.push(String::new());
        lines.push("Your Favorites".to_string());
        lines.extend(view.favorites.iter().map(render_card));
    }

    if let Some(notice) = &view.notice {
        lines.push(String::new());
        lines.push(notice.clone());
    }

    for tier in &view.tiers {
        lines.push(String::new());
        lines.push(tier.title.clone());
        lines.extend(tier.recipes.iter().map(render_card));
    }

    lines.join("\n")
}

fn render_card(card: &CookCard) -> String {
    format!(
        "  - {} [{}%] {} / {} ingredients. {}",
        card.name, card.score, card.have, card.total, card.still_need
    )
}
