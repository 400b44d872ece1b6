//! Shared Module
//!
//! This module contains types that do not depend on the server runtime:
//! the identity record and its storage shape, application configuration,
//! and the shared error type.
//!
//! # Overview
//!
//! The shared module provides platform-agnostic types that can be used
//! by the server, by tooling, and by tests. All record types are designed
//! for JSON serialization.

/// Identity record and storage shape
pub mod identity;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use identity::{Document, IdentityRecord, StoredRecord, USERS_COLLECTION};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, StoreBackend};
