/**
 * User Records and Store Operations
 *
 * Reading and writing user documents in the `user_details` collection.
 * Lookups always go through the `name` key, which is the username.
 */

use async_trait::async_trait;

use crate::backend::auth::error::AuthError;
use crate::backend::store::{DocumentStore, Filter, StoreError};
use crate::shared::identity::{StoredRecord, USERS_COLLECTION};

/// Document key holding the username
const USERNAME_KEY: &str = "name";

/// Resolves a username to its stored record
///
/// Every `DocumentStore` is a `UserLookup` over the users collection.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredRecord>, AuthError>;
}

#[async_trait]
impl<S> UserLookup for S
where
    S: DocumentStore + ?Sized,
{
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredRecord>, AuthError> {
        get_user_by_username(self, username).await
    }
}

/// Insert a new user document, refusing a username that is already stored
///
/// # Arguments
/// * `store` - Document store
/// * `record` - Hashed, storage-shaped record
///
/// # Errors
/// * `UsernameTaken` - A document with this `name` exists
/// * `StoreUnavailable` - If the store call fails
pub async fn create_user<S>(store: &S, record: &StoredRecord) -> Result<(), AuthError>
where
    S: DocumentStore + ?Sized,
{
    match store
        .insert_unique(USERS_COLLECTION, USERNAME_KEY, record.to_document())
        .await
    {
        Ok(()) => Ok(()),
        Err(StoreError::Duplicate { .. }) => Err(AuthError::UsernameTaken(record.username().to_string())),
        Err(e) => Err(AuthError::StoreUnavailable(e)),
    }
}

/// Get user by username
///
/// # Returns
/// User or None if not found
///
/// # Errors
/// * `StoreUnavailable` - If the store call fails
/// * `CorruptRecord` - If the stored document is missing required keys
pub async fn get_user_by_username<S>(
    store: &S,
    username: &str,
) -> Result<Option<StoredRecord>, AuthError>
where
    S: DocumentStore + ?Sized,
{
    let Some(doc) = store
        .find_one(USERS_COLLECTION, &Filter::by_name(username))
        .await?
    else {
        return Ok(None);
    };

    StoredRecord::from_document(doc)
        .map(Some)
        .map_err(|e| {
            tracing::error!("Stored user document for {} could not be decoded", username);
            AuthError::CorruptRecord(e)
        })
}
