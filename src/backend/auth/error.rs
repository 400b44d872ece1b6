/**
 * Authentication Error Types
 *
 * Errors produced by the credential core. A failed login is not an error:
 * it is an `AuthOutcome::Rejected`. These variants cover bad input, store
 * failures, and internal faults, none of which may be reported to a caller
 * as "wrong password".
 */

use thiserror::Error;

use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Errors from registration and authentication
#[derive(Debug, Error)]
pub enum AuthError {
    /// Empty username or password, caught before any store call
    #[error("Invalid input: {0}")]
    InvalidInput(SharedError),

    /// A record with this username already exists
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// The document store failed or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),

    /// A stored document could not be decoded into a user record
    #[error("Corrupt user record: {0}")]
    CorruptRecord(SharedError),

    /// Password hashing failed
    #[error("Password hashing failed: {message}")]
    Hashing {
        /// Human-readable error message
        message: String,
    },
}

impl AuthError {
    /// Create an invalid input error for a field
    pub fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput(SharedError::validation(field, message))
    }

    /// Create a hashing error
    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }
}

impl From<bcrypt::BcryptError> for AuthError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::hashing(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::hashing(format!("hashing task failed: {}", err))
    }
}
