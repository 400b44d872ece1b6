//! Authentication Module
//!
//! This module handles user registration, login, logout, and session
//! management on top of the document store.
//!
//! # Architecture
//!
//! - **`credentials`** - Credential verifier: bcrypt hashing and the login decision
//! - **`users`** - User document reads and writes
//! - **`accounts`** - Account service combining the store and the verifier
//! - **`sessions`** - Session table, cookies, and the principal adapter
//! - **`error`** - Authentication error type
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── credentials.rs  - Hash, verify, register, authenticate
//! ├── users.rs        - User lookups against the document store
//! ├── accounts.rs     - AccountService
//! ├── sessions.rs     - SessionStore and SessionUser adapter
//! ├── error.rs        - AuthError
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── register.rs - User registration handler
//!     ├── login.rs    - Login handler
//!     ├── logout.rs   - Logout handler
//!     └── me.rs       - Current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username, email, password → password hashed → document inserted
//! 2. **Login**: username, password → record looked up → hash checked → session cookie set
//! 3. **Me**: session cookie → session resolved → user reloaded → user info returned
//! 4. **Logout**: session cookie → session removed → cookie expired
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage and never logged
//! - Unknown user and wrong password produce the same 401 response
//! - A store outage is reported as 503, never as a failed login

/// Credential verifier
pub mod credentials;

/// User document operations
pub mod users;

/// Account service
pub mod accounts;

/// Session management
pub mod sessions;

/// Authentication errors
pub mod error;

/// HTTP handlers for authentication endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use accounts::AccountService;
pub use credentials::{AuthOutcome, CredentialVerifier, Rejection, INVALID_CREDENTIALS};
pub use error::AuthError;
pub use sessions::{AnonymousUser, SessionPrincipal, SessionStore, SessionUser};
pub use users::UserLookup;
pub use handlers::types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, logout, register};
