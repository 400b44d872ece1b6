/**
 * Logout Handler
 *
 * POST /api/auth/logout ends the caller's session and expires the cookie.
 * Logging out without a session is not an error.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
};

use crate::backend::auth::sessions::{expired_session_cookie, session_id_from_headers, SessionStore};

/// Logout handler
///
/// Always returns `204 No Content`.
pub async fn logout(State(sessions): State<SessionStore>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(id) = session_id_from_headers(&headers) {
        if sessions.remove(id).await {
            tracing::info!("Session ended");
        }
    }

    (StatusCode::NO_CONTENT, [(SET_COOKIE, expired_session_cookie())])
}
