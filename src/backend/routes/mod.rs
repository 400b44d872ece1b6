//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation and route assembly
//! - **`api_routes`** - Authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint handlers
//! ```
//!
//! # Route Types
//!
//! ## API Routes
//!
//! - `POST /api/auth/register` - User registration
//! - `POST /api/auth/login` - User login (sets the session cookie)
//! - `POST /api/auth/logout` - End the current session
//! - `GET /api/auth/me` - Get current user (requires a session)
//!
//! ## Operational
//!
//! - `GET /health` - Liveness probe
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use docauth::backend::routes::create_router;
//! use docauth::backend::server::state::AppState;
//! use docauth::backend::store::MemoryDocumentStore;
//! use docauth::shared::AppConfig;
//!
//! let state = AppState::new(Arc::new(MemoryDocumentStore::new()), &AppConfig::default());
//! let router = create_router(state);
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

// Re-export commonly used functions
pub use router::create_router;
