use async_trait::async_trait;
use thiserror::Error;

pub mod favorites;
pub mod memory;
pub mod pantry;
pub mod sql;

pub use favorites::FavoritesRepository;
pub use memory::InMemoryKeyValueStore;
pub use pantry::PantryRepository;
pub use sql::SqlKeyValueStore;

/// Storage key holding the pantry document.
pub const PANTRY_KEY: &str = "whatcanicook_pantry";
/// Storage key holding the favorites document.
pub const FAVORITES_KEY: &str = "whatcanicook_favorites";

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("encode error: {0}")]
    Encode(String),
    #[error("decode error: {0}")]
    Decode(String),
}

/// String documents stored under well-known keys.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError>;
    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError>;
}

/// Reads and parses the document under `key`, degrading to `T::default()` when
/// the read fails or the stored value is unreadable.
pub(crate) async fn load_fail_open<T, F>(store: &dyn KeyValueStore, key: &str, parse: F) -> T
where
    T: Default,
    F: FnOnce(&str) -> Result<T, serde_json::Error>,
{
    let raw = match store.get(key).await {
        Ok(raw) => raw,
        Err(error) => {
            tracing::warn!(
                event_name = "storage.document.read_failed",
                key,
                error = %error,
                "stored document could not be read; starting empty"
            );
            return T::default();
        }
    };

    let Some(raw) = raw else {
        return T::default();
    };

    parse(&raw).unwrap_or_else(|error| {
        tracing::warn!(
            event_name = "storage.document.decode_failed",
            key,
            error = %error,
            "stored document is unreadable; starting empty"
        );
        T::default()
    })
}
