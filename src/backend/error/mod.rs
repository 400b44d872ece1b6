//! Backend Error Module
//!
//! This module defines the error type used by HTTP handlers and middleware.
//!
//! # Error Types
//!
//! - `HandlerError` - Explicit status and message (unauthorized, rejected login)
//! - `Auth` - Errors from the account service
//!
//! # HTTP Response Conversion
//!
//! All backend errors implement `IntoResponse` from Axum, allowing them to be
//! returned directly from handlers. The error is automatically converted to an
//! appropriate HTTP status code and JSON response body.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
