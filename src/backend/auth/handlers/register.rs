/**
 * Register Handler
 *
 * This module implements the user registration handler for POST /api/auth/register.
 *
 * # Registration Process
 *
 * 1. Reject an empty username or password
 * 2. Check that the username is free
 * 3. Hash password using bcrypt
 * 4. Insert the user document
 * 5. Return the public user info
 *
 * Registration does not log the user in; the client calls login next.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::accounts::AccountService;
use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::error::BackendError;

/// Register handler
///
/// # Errors
///
/// * `400 Bad Request` - If username or password is empty
/// * `409 Conflict` - If the username is already registered
/// * `503 Service Unavailable` - If the document store is unreachable
/// * `500 Internal Server Error` - If password hashing fails
///
/// # Example Request
///
/// ```http
/// POST /api/auth/register HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "a@x.com",
///   "password": "secret123"
/// }
/// ```
///
/// # Example Response
///
/// ```json
/// {
///   "username": "alice",
///   "email": "a@x.com"
/// }
/// ```
pub async fn register(
    State(accounts): State<AccountService>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BackendError> {
    tracing::info!("Register request for username: {}", request.username);

    let record = accounts
        .register(&request.username, &request.email, &request.password)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}
