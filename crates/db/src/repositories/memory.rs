use std::collections::HashMap;

use tokio::sync::RwLock;

use super::{KeyValueStore, RepositoryError};

#[derive(Default)]
pub struct InMemoryKeyValueStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKeyValueStore {
    /// Store pre-populated with raw documents, for exercising stored-data quirks.
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let entries = entries.into_iter().map(|(key, value)| (key.into(), value.into())).collect();
        Self { entries: RwLock::new(entries) }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for InMemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryKeyValueStore;
    use crate::repositories::KeyValueStore;

    #[tokio::test]
    async fn in_memory_store_round_trip() {
        let store = InMemoryKeyValueStore::default();

        store.put("whatcanicook_favorites", "{}").await.expect("put");
        assert_eq!(
            store.get("whatcanicook_favorites").await.expect("get"),
            Some("{}".to_string())
        );

        store.put("whatcanicook_favorites", "{\"1\": null}").await.expect("overwrite");
        assert_eq!(
            store.get("whatcanicook_favorites").await.expect("get"),
            Some("{\"1\": null}".to_string())
        );
    }

    #[tokio::test]
    async fn seeded_entries_are_readable() {
        let store = InMemoryKeyValueStore::with_entries([("whatcanicook_pantry", "[\"Milk\"]")]);
        assert_eq!(
            store.get("whatcanicook_pantry").await.expect("get"),
            Some("[\"Milk\"]".to_string())
        );
    }
}
