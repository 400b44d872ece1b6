/**
 * SQLite Document Store
 *
 * Stores each document as a JSON text column next to its collection name.
 * Lookups filter with `json_extract`, and the `name` field has an expression
 * index so username lookups do not scan the table.
 *
 * # Schema
 *
 * ```sql
 * CREATE TABLE documents (
 *     id         INTEGER PRIMARY KEY AUTOINCREMENT,
 *     collection TEXT NOT NULL,
 *     body       TEXT NOT NULL
 * );
 * CREATE INDEX idx_documents_name ON documents (collection, json_extract(body, '$.name'));
 * ```
 *
 * # Timeouts
 *
 * The pool's acquire timeout bounds how long a call waits for a connection.
 * A timeout surfaces as `StoreError::Timeout`.
 *
 * # Unique Inserts
 *
 * `insert_unique` is one `INSERT ... SELECT ... WHERE NOT EXISTS` statement.
 * SQLite takes the write lock before the statement reads, so the check and
 * the insert cannot interleave with another writer.
 */

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::str::FromStr;
use std::time::Duration;

use serde_json::Value;

use super::{Document, DocumentStore, Filter, StoreError};

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        collection TEXT NOT NULL,
        body TEXT NOT NULL
    )
"#;

const CREATE_NAME_INDEX: &str = r#"
    CREATE INDEX IF NOT EXISTS idx_documents_name
    ON documents (collection, json_extract(body, '$.name'))
"#;

/// JSON document store on top of a SQLite connection pool
#[derive(Debug, Clone)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
}

impl SqliteDocumentStore {
    /// Open (creating if needed) the database at `url` and prepare the schema
    ///
    /// # Arguments
    ///
    /// * `url` - A `sqlite:` URL, e.g. `sqlite://docauth.db?mode=rwc` or `sqlite::memory:`
    /// * `acquire_timeout` - How long a call may wait for a pooled connection
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the URL is invalid or the database
    /// cannot be opened.
    pub async fn connect(url: &str, acquire_timeout: Duration) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(map_sqlx_error)?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new().acquire_timeout(acquire_timeout);

        // Every connection to `:memory:` is a separate database, so keep exactly one alive.
        if url.contains(":memory:") {
            pool_options = pool_options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        tracing::info!("Opening SQLite document store");
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        let store = Self { pool };
        store.ensure_schema().await?;
        tracing::info!("SQLite document store ready");
        Ok(store)
    }

    /// Open a private in-memory database
    pub async fn in_memory() -> Result<Self, StoreError> {
        Self::connect("sqlite::memory:", Duration::from_secs(5)).await
    }

    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        sqlx::query(CREATE_NAME_INDEX)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }
}

/// Field names are spliced into the JSON path, so only plain identifiers are allowed
fn is_valid_field(field: &str) -> bool {
    let mut chars = field.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        other => StoreError::unavailable(other.to_string()),
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError> {
        let body = serde_json::to_string(&document)?;

        sqlx::query("INSERT INTO documents (collection, body) VALUES (?, ?)")
            .bind(collection)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(())
    }

    async fn insert_unique(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<(), StoreError> {
        if !is_valid_field(key) {
            return Err(StoreError::InvalidFilter(key.to_string()));
        }
        let Some(Value::String(value)) = document.get(key).cloned() else {
            return Err(StoreError::InvalidFilter(key.to_string()));
        };
        let body = serde_json::to_string(&document)?;

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("INSERT INTO documents (collection, body) SELECT ");
        query.push_bind(collection.to_string());
        query.push(", ");
        query.push_bind(body);
        query.push(" WHERE NOT EXISTS (SELECT 1 FROM documents WHERE collection = ");
        query.push_bind(collection.to_string());
        query.push(" AND json_extract(body, '$.");
        query.push(key);
        query.push("') = ");
        query.push_bind(value);
        query.push(")");

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Duplicate {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        if let Some((field, _)) = filter
            .conditions()
            .iter()
            .find(|(field, _)| !is_valid_field(field))
        {
            return Err(StoreError::InvalidFilter(field.clone()));
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT body FROM documents WHERE collection = ");
        query.push_bind(collection.to_string());
        for (field, value) in filter.conditions() {
            query.push(" AND json_extract(body, '$.");
            query.push(field);
            query.push("') = ");
            query.push_bind(value.clone());
        }
        query.push(" ORDER BY id LIMIT 1");

        let body: Option<String> = query
            .build_query_scalar()
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        match body {
            Some(body) => Ok(Some(serde_json::from_str::<Document>(&body)?)),
            None => Ok(None),
        }
    }

    async fn close(&self) {
        tracing::info!("Closing SQLite document store");
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_is_valid_field() {
        assert!(is_valid_field("name"));
        assert!(is_valid_field("_id"));
        assert!(is_valid_field("field_2"));
        assert!(!is_valid_field(""));
        assert!(!is_valid_field("2field"));
        assert!(!is_valid_field("name') OR 1=1 --"));
        assert!(!is_valid_field("a.b"));
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        store
            .insert_one("user_details", doc(json!({"name": "alice", "email": "a@x.com", "password": "h"})))
            .await
            .unwrap();

        let found = store
            .find_one("user_details", &Filter::by_name("alice"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.get("email"), Some(&json!("a@x.com")));
        assert_eq!(found.get("password"), Some(&json!("h")));
    }

    #[tokio::test]
    async fn test_find_missing_and_other_collection() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        store
            .insert_one("a", doc(json!({"name": "alice"})))
            .await
            .unwrap();

        assert!(store.find_one("a", &Filter::by_name("bob")).await.unwrap().is_none());
        assert!(store.find_one("b", &Filter::by_name("alice")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_multiple_conditions() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        store
            .insert_one("users", doc(json!({"name": "alice", "email": "a@x.com"})))
            .await
            .unwrap();

        let hit = Filter::eq("name", "alice").and("email", "a@x.com");
        let miss = Filter::eq("name", "alice").and("email", "z@x.com");
        assert!(store.find_one("users", &hit).await.unwrap().is_some());
        assert!(store.find_one("users", &miss).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rejects_injected_field_name() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        let filter = Filter::eq("name') = 'x' OR ('1", "1");
        let err = store.find_one("users", &filter).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter(_)));
    }

    #[tokio::test]
    async fn test_data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("docs.db").display());

        let store = SqliteDocumentStore::connect(&url, Duration::from_secs(5)).await.unwrap();
        store
            .insert_one("users", doc(json!({"name": "alice"})))
            .await
            .unwrap();
        store.close().await;

        let reopened = SqliteDocumentStore::connect(&url, Duration::from_secs(5)).await.unwrap();
        assert!(reopened
            .find_one("users", &Filter::by_name("alice"))
            .await
            .unwrap()
            .is_some());
        reopened.close().await;
    }

    #[tokio::test]
    async fn test_insert_unique_refuses_taken_key() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        store
            .insert_unique("users", "name", doc(json!({"name": "alice", "n": "1"})))
            .await
            .unwrap();

        let err = store
            .insert_unique("users", "name", doc(json!({"name": "alice", "n": "2"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Duplicate { ref key } if key == "name"));

        let found = store.find_one("users", &Filter::by_name("alice")).await.unwrap().unwrap();
        assert_eq!(found.get("n"), Some(&json!("1")));

        store
            .insert_unique("admins", "name", doc(json!({"name": "alice"})))
            .await
            .unwrap();
        store
            .insert_unique("users", "name", doc(json!({"name": "bob"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_insert_unique_rejects_bad_key() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();

        let err = store
            .insert_unique("users", "name') --", doc(json!({"name": "alice"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter(_)));

        let err = store
            .insert_unique("users", "name", doc(json!({"email": "a@x.com"})))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidFilter(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_insert_unique_on_file_keeps_one() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("docs.db").display());
        let store = SqliteDocumentStore::connect(&url, Duration::from_secs(5)).await.unwrap();

        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .insert_unique("users", "name", doc(json!({"name": "alice", "n": n})))
                        .await
                })
            })
            .collect();

        let mut inserted = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(()) => inserted += 1,
                Err(StoreError::Duplicate { .. }) => {}
                Err(other) => panic!("Unexpected store error: {}", other),
            }
        }
        assert_eq!(inserted, 1);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = 'users'")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(count, 1);
        store.close().await;
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let store = SqliteDocumentStore::in_memory().await.unwrap();
        store.close().await;

        let err = store.find_one("users", &Filter::by_name("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable { .. }));
    }
}
