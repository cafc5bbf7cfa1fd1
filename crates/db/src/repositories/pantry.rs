use std::sync::Arc;

use tracing::debug;
use whatcanicook_core::domain::pantry::Pantry;

use super::{load_fail_open, KeyValueStore, RepositoryError, PANTRY_KEY};

pub struct PantryRepository {
    store: Arc<dyn KeyValueStore>,
}

impl PantryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Never fails: a missing, unreadable, or malformed document loads as an empty pantry.
    pub async fn load(&self) -> Pantry {
        load_fail_open(self.store.as_ref(), PANTRY_KEY, Pantry::parse_json).await
    }

    pub async fn save(&self, pantry: &Pantry) -> Result<(), RepositoryError> {
        let document = pantry.to_json().map_err(|e| RepositoryError::Encode(e.to_string()))?;
        self.store.put(PANTRY_KEY, &document).await?;
        debug!(event_name = "storage.pantry.saved", items = pantry.len(), "pantry saved");
        Ok(())
    }
}
