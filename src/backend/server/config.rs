/**
 * Server Configuration
 *
 * Opens the document store named by the configuration. This happens once
 * at startup; the returned handle is shared by every request and closed at
 * shutdown.
 *
 * # Error Handling
 *
 * Unlike optional services, the store is required: if it cannot be opened
 * the server does not start.
 */

use std::sync::Arc;

use crate::backend::store::{DocumentStore, MemoryDocumentStore, SqliteDocumentStore, StoreError};
use crate::shared::{AppConfig, StoreBackend};

/// Open the configured document store
///
/// # Returns
///
/// A shared store handle
///
/// # Errors
///
/// Returns `StoreError` if the SQLite database cannot be opened.
pub async fn open_store(config: &AppConfig) -> Result<Arc<dyn DocumentStore>, StoreError> {
    match &config.store {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory document store. Users are lost on restart.");
            Ok(Arc::new(MemoryDocumentStore::new()))
        }
        StoreBackend::Sqlite(url) => {
            tracing::info!("Connecting to document store...");
            let store = SqliteDocumentStore::connect(url, config.store_timeout).await?;
            Ok(Arc::new(store))
        }
    }
}
