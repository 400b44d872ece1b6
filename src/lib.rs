//! docauth - Main Library
//!
//! docauth is a small user-authentication service (registration, login,
//! logout) that keeps its user records in a document store instead of a
//! relational schema.
//!
//! # Overview
//!
//! This library provides:
//! - An identity record with a fixed storage shape (`name`, `email`, `password`)
//! - A credential verifier built on bcrypt (salted, constant-time comparison)
//! - A pluggable document store (in-memory and SQLite-backed)
//! - An Axum HTTP surface with cookie sessions
//!
//! # Module Structure
//!
//! - **`shared`** - Platform-agnostic types
//!   - Identity record and its storage shape
//!   - Configuration
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with the `server` feature)
//!   - Credential verification and account service
//!   - Document store trait and implementations
//!   - Session table, middleware, and HTTP handlers
//!
//! # Feature Flags
//!
//! - **`server`** (default) - Enables the backend modules and the
//!   `docauth-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docauth::backend::auth::{AccountService, CredentialVerifier};
//! use docauth::backend::store::MemoryDocumentStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(MemoryDocumentStore::new());
//! let accounts = AccountService::new(store, CredentialVerifier::default());
//!
//! accounts.register("alice", "a@x.com", "secret123").await?;
//! let outcome = accounts.authenticate("alice", "secret123").await?;
//! assert!(outcome.is_accepted());
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations
//! - Custom error types in `shared::error`, `backend::store`, `backend::auth`
//!   and `backend::error`
//! - A rejected login is an `AuthOutcome`, not an error

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "server")]
pub mod backend;
