//! Document Store Module
//!
//! The persistence boundary for user records. The credential core needs
//! three operations: insert one document, insert one document unless its key
//! is already taken, and find one document by field equality. Everything else about the store (connection handling,
//! timeouts, indexing) stays behind this trait.
//!
//! # Implementations
//!
//! - **`memory`** - `MemoryDocumentStore`, process-local, for tests and development
//! - **`sqlite`** - `SqliteDocumentStore`, JSON documents in SQLite via sqlx
//!
//! # Lifecycle
//!
//! A store is opened once at process start, shared as
//! `Arc<dyn DocumentStore>`, and closed at shutdown with [`DocumentStore::close`].

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use crate::shared::identity::Document;

/// In-memory document store
pub mod memory;

/// SQLite-backed document store
pub mod sqlite;

pub use memory::MemoryDocumentStore;
pub use sqlite::SqliteDocumentStore;

/// Errors raised by a document store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached or the operation failed
    #[error("Document store unavailable: {message}")]
    Unavailable {
        /// Human-readable error message
        message: String,
    },

    /// The store did not answer in time
    #[error("Document store timed out")]
    Timeout,

    /// A filter referenced a field name the store cannot address
    #[error("Invalid filter field: {0}")]
    InvalidFilter(String),

    /// A document could not be encoded or decoded
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A document with the same key value already exists
    #[error("Duplicate value for key '{key}'")]
    Duplicate {
        /// The unique key that collided
        key: String,
    },
}

impl StoreError {
    /// Create a new unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Equality filter on `key` taking its value from `document`
///
/// # Errors
///
/// Returns `StoreError::InvalidFilter` if the document has no string under `key`.
pub fn key_filter(key: &str, document: &Document) -> Result<Filter, StoreError> {
    match document.get(key) {
        Some(Value::String(value)) => Ok(Filter::eq(key, value.as_str())),
        _ => Err(StoreError::InvalidFilter(key.to_string())),
    }
}

/// Field-equality filter, the equivalent of `{"name": "alice"}`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    conditions: Vec<(String, String)>,
}

impl Filter {
    /// Filter on a single field
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::default().and(field, value)
    }

    /// Add another equality condition
    pub fn and(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Filter on the username key of a user document
    pub fn by_name(username: &str) -> Self {
        Self::eq("name", username)
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    /// Whether a document satisfies every condition
    ///
    /// Only string-valued fields can match.
    pub fn matches(&self, doc: &Document) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            matches!(doc.get(field), Some(Value::String(actual)) if actual == expected)
        })
    }
}

/// Opaque document persistence
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert one document into a collection
    async fn insert_one(&self, collection: &str, document: Document) -> Result<(), StoreError>;

    /// Insert one document unless another in the collection has the same
    /// string value under `key`
    ///
    /// The check and the insert are atomic: of two concurrent calls with the
    /// same key value, at most one succeeds.
    ///
    /// # Errors
    ///
    /// * `Duplicate` - The key value is taken
    /// * `InvalidFilter` - The document has no string under `key`
    async fn insert_unique(
        &self,
        collection: &str,
        key: &str,
        document: Document,
    ) -> Result<(), StoreError>;

    /// Find the first document in a collection matching the filter
    async fn find_one(
        &self,
        collection: &str,
        filter: &Filter,
    ) -> Result<Option<Document>, StoreError>;

    /// Release the store's resources
    async fn close(&self) {}
}
