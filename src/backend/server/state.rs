/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The account service (document store handle + credential verifier)
 * - The session table
 *
 * Both are cheap to clone and share their contents across clones.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::accounts::AccountService;
use crate::backend::auth::credentials::CredentialVerifier;
use crate::backend::auth::sessions::SessionStore;
use crate::backend::store::DocumentStore;
use crate::shared::AppConfig;

/// Application state shared by all handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Registration and login
    pub accounts: AccountService,
    /// Live sessions
    pub sessions: SessionStore,
}

impl AppState {
    /// Build state around an opened store
    pub fn new(store: Arc<dyn DocumentStore>, config: &AppConfig) -> Self {
        Self {
            accounts: AccountService::new(store, CredentialVerifier::new(config.bcrypt_cost)),
            sessions: SessionStore::new(config.session_ttl()),
        }
    }
}

impl FromRef<AppState> for AccountService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.accounts.clone()
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}
