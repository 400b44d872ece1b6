/**
 * Get Current User Handler
 *
 * This module implements the handler for GET /api/auth/me, which returns
 * information about the currently logged-in user.
 *
 * # Authentication
 *
 * The route sits behind the session middleware, which resolves the session
 * cookie and reloads the user record before this handler runs.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::middleware::auth::AuthUser;

/// Get current user handler
///
/// # Example Response
///
/// ```json
/// {
///   "username": "alice",
///   "email": "a@x.com"
/// }
/// ```
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserResponse> {
    Json(user.record.into())
}
