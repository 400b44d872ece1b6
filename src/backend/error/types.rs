/**
 * Backend Error Types
 *
 * This module defines error types specific to the HTTP layer.
 * These errors are used in handlers and middleware and can be converted to HTTP responses.
 *
 * # Error Categories
 *
 * ## Handler Errors
 *
 * Handler errors carry an explicit status and message:
 * - Missing or invalid session
 * - Rejected login (always the same message)
 *
 * ## Authentication Errors
 *
 * Errors from the account service, mapped to a status code:
 * - `InvalidInput` → 400
 * - `UsernameTaken` → 409
 * - `StoreUnavailable` → 503
 * - `CorruptRecord`, `Hashing` → 500
 *
 * Internal details (store messages, hashing failures) are logged, not sent
 * to the client.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::error::AuthError;
use crate::shared::SharedError;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Error from the account service
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// 401 with a fixed message
    pub fn unauthorized() -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, "Not logged in")
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Auth(err) => match err {
                AuthError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AuthError::UsernameTaken(_) => StatusCode::CONFLICT,
                AuthError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                AuthError::CorruptRecord(_) | AuthError::Hashing { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Auth(err) => match err {
                AuthError::InvalidInput(SharedError::ValidationError { field, message }) => {
                    format!("{} {}", field, message)
                }
                AuthError::InvalidInput(_) => "Invalid input".to_string(),
                AuthError::UsernameTaken(_) => "Username already taken".to_string(),
                AuthError::StoreUnavailable(_) => "Service unavailable".to_string(),
                AuthError::CorruptRecord(_) | AuthError::Hashing { .. } => {
                    "Internal server error".to_string()
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::store::StoreError;

    #[test]
    fn test_handler_error() {
        let error = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid request");
        match error {
            BackendError::HandlerError { status, message } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(message, "Invalid request");
            }
            _ => panic!("Expected HandlerError"),
        }
    }

    #[test]
    fn test_auth_status_codes() {
        let cases = [
            (AuthError::invalid_input("username", "must not be empty"), StatusCode::BAD_REQUEST),
            (AuthError::UsernameTaken("alice".into()), StatusCode::CONFLICT),
            (StoreError::Timeout.into(), StatusCode::SERVICE_UNAVAILABLE),
            (AuthError::hashing("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(BackendError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_messages_hide_internals() {
        let err = BackendError::from(AuthError::from(StoreError::unavailable("disk I/O error at /var/db")));
        assert_eq!(err.message(), "Service unavailable");

        let err = BackendError::from(AuthError::invalid_input("password", "must not be empty"));
        assert_eq!(err.message(), "password must not be empty");
    }
}
