/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require a
 * logged-in user. It resolves the session cookie, reloads the user record
 * from the document store, and hands both to handlers.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};

use crate::backend::auth::sessions::{session_id_from_headers, AnonymousUser, SessionPrincipal, SessionUser};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::identity::StoredRecord;
use uuid::Uuid;

/// Logged-in user attached to the request by `require_session`
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub principal: SessionPrincipal,
    pub record: StoredRecord,
}

/// Resolve the request's user, falling back to anonymous
async fn current_user(state: &AppState, session_id: Option<Uuid>) -> Box<dyn SessionUser + Send + Sync> {
    let principal = match session_id {
        Some(id) => state.sessions.resolve(id).await,
        None => None,
    };

    match principal {
        Some(principal) => Box::new(principal),
        None => Box::new(AnonymousUser),
    }
}

/// Session middleware
///
/// This middleware:
/// 1. Resolves the session cookie to a principal
/// 2. Rejects anonymous or inactive users
/// 3. Reloads the user record (a deleted user ends the session)
/// 4. Attaches `AuthenticatedUser` to request extensions
///
/// Returns 401 Unauthorized if there is no live session.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let session_id = session_id_from_headers(request.headers());
    let user = current_user(&state, session_id).await;
    if !user.is_authenticated() || !user.is_active() || user.is_anonymous() {
        tracing::warn!("Request without a live session");
        return Err(BackendError::unauthorized());
    }
    let Some(username) = user.id().map(str::to_string) else {
        return Err(BackendError::unauthorized());
    };

    let record = match state.accounts.find_user(&username).await? {
        Some(record) => record,
        None => {
            tracing::warn!("Session user no longer exists: {}", username);
            if let Some(id) = session_id {
                state.sessions.remove(id).await;
            }
            return Err(BackendError::unauthorized());
        }
    };

    let principal = SessionPrincipal::new(username);
    request
        .extensions_mut()
        .insert(AuthenticatedUser { principal, record });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Only valid on routes behind `require_session`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized()
            })?;

        Ok(AuthUser(user))
    }
}
