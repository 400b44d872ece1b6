/**
 * Account Service
 *
 * The two operations the session layer calls: register and authenticate.
 * Holds the injected document store and the credential verifier, and runs
 * bcrypt work on the blocking thread pool.
 */

use std::sync::Arc;

use crate::backend::auth::credentials::{check_registration_input, AuthOutcome, CredentialVerifier};
use crate::backend::auth::error::AuthError;
use crate::backend::auth::users::{create_user, get_user_by_username};
use crate::backend::store::DocumentStore;
use crate::shared::identity::{IdentityRecord, StoredRecord};

/// Registration and login over a shared document store
#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn DocumentStore>,
    verifier: CredentialVerifier,
}

impl std::fmt::Debug for AccountService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountService")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl AccountService {
    pub fn new(store: Arc<dyn DocumentStore>, verifier: CredentialVerifier) -> Self {
        Self { store, verifier }
    }

    /// The store handle, for lifecycle management
    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn verifier(&self) -> CredentialVerifier {
        self.verifier
    }

    /// Register a new user
    ///
    /// # Arguments
    /// * `username` - Unique username, becomes the session principal
    /// * `email` - Informational email address
    /// * `password` - Plaintext password, hashed before storage
    ///
    /// # Returns
    /// The record as inserted
    ///
    /// # Errors
    /// * `InvalidInput` - Empty username, empty or overlong password (no store call is made)
    /// * `UsernameTaken` - A record with this username exists, including one
    ///   inserted by a concurrent registration
    /// * `StoreUnavailable` - The lookup or insert failed
    /// * `Hashing` - bcrypt failed
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<StoredRecord, AuthError> {
        check_registration_input(username, password)?;

        // Early exit before paying for bcrypt; `create_user` enforces uniqueness.
        if get_user_by_username(self.store.as_ref(), username)
            .await?
            .is_some()
        {
            tracing::warn!("Username already exists: {}", username);
            return Err(AuthError::UsernameTaken(username.to_string()));
        }

        let verifier = self.verifier;
        let record = IdentityRecord::new(username, email);
        let password = password.to_string();
        let stored =
            tokio::task::spawn_blocking(move || verifier.register(record, &password)).await??;

        if let Err(e) = create_user(self.store.as_ref(), &stored).await {
            match &e {
                AuthError::UsernameTaken(_) => {
                    tracing::warn!("Username taken during registration: {}", username)
                }
                _ => tracing::error!("Failed to insert user {}: {}", username, e),
            }
            return Err(e);
        }

        tracing::info!("User registered: {} ({})", stored.username(), stored.email());
        Ok(stored)
    }

    /// Run a login attempt
    ///
    /// # Errors
    /// * `StoreUnavailable` - The lookup failed
    /// * `CorruptRecord` - The stored record could not be decoded
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthOutcome, AuthError> {
        self.verifier
            .authenticate(self.store.as_ref(), username, password)
            .await
    }

    /// Load a user for an existing session
    pub async fn find_user(&self, username: &str) -> Result<Option<StoredRecord>, AuthError> {
        get_user_by_username(self.store.as_ref(), username).await
    }
}
