//! Identity Record
//!
//! The in-memory representation of a registered principal and the fixed
//! document shape it is persisted in.
//!
//! # Storage Shape
//!
//! Records live in the `user_details` collection as JSON objects:
//!
//! ```json
//! {
//!   "name": "alice",
//!   "email": "a@x.com",
//!   "password": "$2b$12$..."
//! }
//! ```
//!
//! The `password` key only ever holds a bcrypt hash. Extra keys a store may
//! add (for example `_id`) are ignored when a document is decoded.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::error::SharedError;

/// Collection holding user documents
pub const USERS_COLLECTION: &str = "user_details";

/// A schema-less stored document
pub type Document = Map<String, Value>;

/// A registered (or registering) principal
///
/// The username is the record's identity for lookups and for sessions; there
/// is no surrogate id. The password hash is attached exactly once, by the
/// credential verifier, during registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    username: String,
    email: String,
    password_hash: Option<String>,
}

impl IdentityRecord {
    /// Create a record without a password hash
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_hash: None,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> Option<&str> {
        self.password_hash.as_deref()
    }

    /// Attach the password hash. Only the credential verifier calls this.
    #[cfg_attr(not(feature = "server"), allow(dead_code))]
    pub(crate) fn set_password_hash(&mut self, hash: String) {
        self.password_hash = Some(hash);
    }

    /// Map the record onto its storage keys
    ///
    /// No validation is performed. A record whose hash was never set stores
    /// `password: null`, which later decodes as a corrupt record.
    pub fn to_storage_shape(&self) -> Document {
        let mut doc = Map::new();
        doc.insert("name".to_string(), Value::String(self.username.clone()));
        doc.insert("email".to_string(), Value::String(self.email.clone()));
        doc.insert(
            "password".to_string(),
            self.password_hash
                .clone()
                .map(Value::String)
                .unwrap_or(Value::Null),
        );
        doc
    }

    /// Convert into the typed storage record
    ///
    /// # Errors
    ///
    /// Returns a validation error if the password hash has not been set.
    pub fn into_stored(self) -> Result<StoredRecord, SharedError> {
        let password_hash = self
            .password_hash
            .ok_or_else(|| SharedError::validation("password", "password hash has not been set"))?;

        Ok(StoredRecord {
            username: self.username,
            email: self.email,
            password_hash,
        })
    }
}

/// A user record as it exists in the document store
///
/// Outside the crate this is read-only: records come from registration
/// (which sets the hash) or from decoding a stored document.
///
/// ```compile_fail
/// use docauth::shared::StoredRecord;
///
/// let forged = StoredRecord {
///     username: "alice".to_string(),
///     email: String::new(),
///     password_hash: "$2b$04$chosen".to_string(),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Username, stored under `name`
    #[serde(rename = "name")]
    pub(crate) username: String,
    /// Email address (informational)
    #[serde(default)]
    pub(crate) email: String,
    /// bcrypt hash, stored under `password`
    #[serde(rename = "password")]
    pub(crate) password_hash: String,
}

impl StoredRecord {
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Encode as a store document
    pub fn to_document(&self) -> Document {
        let mut doc = Map::new();
        doc.insert("name".to_string(), Value::String(self.username.clone()));
        doc.insert("email".to_string(), Value::String(self.email.clone()));
        doc.insert("password".to_string(), Value::String(self.password_hash.clone()));
        doc
    }

    /// Decode a store document
    ///
    /// # Errors
    ///
    /// Returns a serialization error if `name` or `password` is missing or
    /// not a string.
    pub fn from_document(doc: Document) -> Result<Self, SharedError> {
        Ok(serde_json::from_value(Value::Object(doc))?)
    }
}
