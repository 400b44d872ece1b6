/**
 * Login Handler
 *
 * This module implements the login handler for POST /api/auth/login.
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt
 * 3. Start a session for the username
 * 4. Return the session cookie and the principal
 *
 * # Security
 *
 * - Unknown user and wrong password return the same 401 body
 * - A store outage returns 503, never 401
 * - Any session the client already carried is ended first
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};

use crate::backend::auth::credentials::AuthOutcome;
use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::sessions::{session_cookie, session_id_from_headers};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - If user is not found or password is incorrect
/// * `503 Service Unavailable` - If the document store is unreachable
/// * `500 Internal Server Error` - If the stored record is corrupt
///
/// # Example Request
///
/// ```http
/// POST /api/auth/login HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "password": "secret123"
/// }
/// ```
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Set-Cookie: docauth_session=4f6c...; HttpOnly; SameSite=Lax; Path=/; Max-Age=2592000
///
/// {"username": "alice"}
/// ```
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<LoginRequest>,
) -> Result<Response, BackendError> {
    tracing::info!("Login request for: {}", request.username);

    let outcome = state
        .accounts
        .authenticate(&request.username, &request.password)
        .await?;

    match outcome {
        AuthOutcome::Accepted { principal } => {
            if let Some(previous) = session_id_from_headers(&headers) {
                state.sessions.remove(previous).await;
            }

            let session_id = state.sessions.create(principal.clone()).await;
            let cookie = session_cookie(session_id, state.sessions.ttl());

            Ok((
                [(SET_COOKIE, cookie)],
                Json(LoginResponse {
                    username: principal,
                }),
            )
                .into_response())
        }
        AuthOutcome::Rejected(rejection) => Err(BackendError::handler(
            StatusCode::UNAUTHORIZED,
            rejection.to_string(),
        )),
    }
}
