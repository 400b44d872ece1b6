//! Backend Module
//!
//! This module contains all server-side code for docauth: the credential
//! verifier, the account service, the document store, and the Axum HTTP
//! surface around them.
//!
//! This module is only compiled when the `server` feature is enabled.
//!
//! # Architecture
//!
//! - **`auth`** - Credential verification, accounts, sessions, handlers
//! - **`store`** - Document store trait, in-memory and SQLite backends
//! - **`server`** - Server initialization, application state, store opening
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`middleware`** - Session middleware and the `AuthUser` extractor
//! - **`error`** - Backend error type and HTTP conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - docauth-server entry point
//! ├── auth/           - Authentication
//! ├── store/          - Document store
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the account service and the session table. The store
//! handle inside the account service is an `Arc<dyn DocumentStore>` opened
//! once at startup and closed at shutdown.
//!
//! # Error Handling
//!
//! - `StoreError` for document store failures
//! - `AuthError` for registration and lookup failures
//! - `BackendError` for HTTP responses
//! - A rejected login is an `AuthOutcome`, never an error

/// Authentication and user management
pub mod auth;

/// Document persistence
pub mod store;

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Middleware for request processing
pub mod middleware;

/// Backend error types
pub mod error;

/// Re-export commonly used types
pub use error::BackendError;
pub use server::{build_state, create_app, AppState, SessionReaper};
