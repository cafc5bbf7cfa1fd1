use std::sync::Arc;

use tracing::debug;
use whatcanicook_core::domain::favorites::Favorites;

use super::{load_fail_open, KeyValueStore, RepositoryError, FAVORITES_KEY};

pub struct FavoritesRepository {
    store: Arc<dyn KeyValueStore>,
}

impl FavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Favorites {
        load_fail_open(self.store.as_ref(), FAVORITES_KEY, Favorites::parse_json).await
    }

    pub async fn save(&self, favorites: &Favorites) -> Result<(), RepositoryError> {
        let document = favorites.to_json().map_err(|e| RepositoryError::Encode(e.to_string()))?;
        self.store.put(FAVORITES_KEY, &document).await?;
        debug!(event_name = "storage.favorites.saved", count = favorites.len(), "favorites saved");
        Ok(())
    }
}
