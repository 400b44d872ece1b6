//! Middleware Module
//!
//! Request processing middleware.
//!
//! - **`auth`** - Session middleware and the `AuthUser` extractor

/// Session authentication middleware
pub mod auth;

pub use auth::{require_session, AuthUser, AuthenticatedUser};
