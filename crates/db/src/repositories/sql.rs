use chrono::Utc;
use sqlx::Row;

use super::{KeyValueStore, RepositoryError};
use crate::DbPool;

pub struct SqlKeyValueStore {
    pool: DbPool,
}

impl SqlKeyValueStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for SqlKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(ref r) => {
                let value: String =
                    r.try_get("value").map_err(|e| RepositoryError::Decode(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sqlx::Row;

    use super::SqlKeyValueStore;
    use crate::repositories::KeyValueStore;
    use crate::{connect_with_settings, migrations, DbPool};

    async fn setup() -> DbPool {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        migrations::run_pending(&pool).await.expect("migrations");
        pool
    }

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = SqlKeyValueStore::new(setup().await);
        assert_eq!(store.get("absent").await.expect("get"), None);
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let pool = setup().await;
        let store = SqlKeyValueStore::new(pool.clone());

        store.put("whatcanicook_pantry", "[]").await.expect("first put");
        store.put("whatcanicook_pantry", r#"["Eggs"]"#).await.expect("second put");

        assert_eq!(
            store.get("whatcanicook_pantry").await.expect("get"),
            Some(r#"["Eggs"]"#.to_string())
        );

        let rows =
            sqlx::query("SELECT COUNT(*) AS count, MAX(updated_at) AS updated_at FROM kv_store")
                .fetch_one(&pool)
                .await
                .expect("count rows");
        assert_eq!(rows.get::<i64, _>("count"), 1);
        assert!(!rows.get::<String, _>("updated_at").is_empty());
    }

    #[tokio::test]
    async fn keys_are_stored_independently() {
        let store = SqlKeyValueStore::new(setup().await);
        store.put("a", "1").await.expect("put a");
        store.put("b", "2").await.expect("put b");
        store.put("a", "3").await.expect("overwrite a");

        assert_eq!(store.get("a").await.expect("get a"), Some("3".to_string()));
        assert_eq!(store.get("b").await.expect("get b"), Some("2".to_string()));
    }

    #[tokio::test]
    async fn unmigrated_database_surfaces_database_error() {
        let pool = connect_with_settings("sqlite::memory:", 1, 30).await.expect("connect");
        let store = SqlKeyValueStore::new(pool);

        let error = store.get("whatcanicook_pantry").await.expect_err("no table");
        assert!(error.to_string().starts_with("database error"));
    }
}
