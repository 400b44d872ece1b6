/**
 * Authentication Handler Types
 *
 * This module defines the request and response types used by authentication handlers.
 * Request types hold plaintext passwords, so their `Debug` output redacts them.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::identity::StoredRecord;

/// Register request
///
/// Contains the username, email and password for user registration.
#[derive(Deserialize, Serialize)]
pub struct RegisterRequest {
    /// User's chosen username
    pub username: String,
    /// User's email address
    #[serde(default)]
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login request
#[derive(Deserialize, Serialize)]
pub struct LoginRequest {
    /// User's username
    pub username: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Login response
///
/// The session itself travels in the `Set-Cookie` header.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LoginResponse {
    /// Authenticated principal
    pub username: String,
}

/// User response (without sensitive data)
///
/// Does not include the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    /// User's username
    pub username: String,
    /// User's email address
    pub email: String,
}

impl From<StoredRecord> for UserResponse {
    fn from(record: StoredRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_passwords() {
        let register = RegisterRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password: "secret123".to_string(),
        };
        let login = LoginRequest {
            username: "alice".to_string(),
            password: "secret123".to_string(),
        };

        assert!(!format!("{:?}", register).contains("secret123"));
        assert!(!format!("{:?}", login).contains("secret123"));
    }

    #[test]
    fn test_user_response_drops_hash() {
        let response = UserResponse::from(StoredRecord {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
        });
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("$2b$04$hash"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_register_request_email_optional() {
        let request: RegisterRequest =
            serde_json::from_str(r#"{"username":"alice","password":"secret123"}"#).unwrap();
        assert_eq!(request.email, "");
    }
}
