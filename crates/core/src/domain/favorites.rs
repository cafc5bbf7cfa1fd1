use std::collections::BTreeMap;

use crate::domain::recipe::{Recipe, RecipeId};
use crate::errors::DomainError;

/// Saved recipes keyed by the string form of their id, each a full snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites {
    entries: BTreeMap<String, Recipe>,
}

impl Favorites {
    pub fn is_favorite(&self, id: &RecipeId) -> bool {
        self.entries.contains_key(&id.to_string())
    }

    /// Adds or removes the recipe; returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, recipe: &Recipe) -> bool {
        let key = recipe.id.to_string();
        if self.entries.remove(&key).is_some() {
            return false;
        }
        self.entries.insert(key, recipe.clone());
        true
    }

    pub fn recipes(&self) -> Vec<Recipe> {
        self.entries.values().cloned().collect()
    }

    pub fn find(&self, key: &str) -> Option<&Recipe> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn from_json(raw: Option<&str>) -> Self {
        raw.and_then(|raw| Self::parse_json(raw).ok()).unwrap_or_default()
    }

    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        let entries = serde_json::from_str::<Option<BTreeMap<String, Recipe>>>(raw)?;
        Ok(Self { entries: entries.unwrap_or_default() })
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Pretty document for download. Refuses to export an empty collection.
    pub fn export(&self) -> Result<String, DomainError> {
        if self.is_empty() {
            return Err(DomainError::NothingToExport("no favorites to export yet".to_string()));
        }
        serde_json::to_string_pretty(&self.entries)
            .map_err(|error| DomainError::input("favorites", error.to_string()))
    }
}
