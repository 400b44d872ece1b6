/**
 * Session Management
 *
 * This module holds the session side of login: a table of live sessions
 * keyed by random ids, the cookie that carries the id, and the principal
 * adapter the rest of the server uses to ask "who is this request?".
 *
 * Sessions are in memory. Restarting the server logs everybody out.
 */

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "docauth_session";

/// Capabilities a request's user exposes to route guards
pub trait SessionUser {
    fn is_authenticated(&self) -> bool;
    fn is_active(&self) -> bool;
    fn is_anonymous(&self) -> bool;
    /// Principal id (the username), `None` for anonymous users
    fn id(&self) -> Option<&str>;
}

/// A logged-in principal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPrincipal {
    username: String,
}

impl SessionPrincipal {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

impl SessionUser for SessionPrincipal {
    fn is_authenticated(&self) -> bool {
        true
    }

    fn is_active(&self) -> bool {
        true
    }

    fn is_anonymous(&self) -> bool {
        false
    }

    fn id(&self) -> Option<&str> {
        Some(&self.username)
    }
}

/// A request without a valid session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnonymousUser;

impl SessionUser for AnonymousUser {
    fn is_authenticated(&self) -> bool {
        false
    }

    fn is_active(&self) -> bool {
        false
    }

    fn is_anonymous(&self) -> bool {
        true
    }

    fn id(&self) -> Option<&str> {
        None
    }
}

/// One live session
#[derive(Debug, Clone)]
pub struct Session {
    pub principal: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Shared table of live sessions
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty table whose sessions live for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for a principal
    pub async fn create(&self, principal: impl Into<String>) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let session = Session {
            principal: principal.into(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        tracing::debug!("Session created for {}", session.principal);
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Look up the principal behind a session id
    ///
    /// Expired sessions are removed and resolve to `None`.
    pub async fn resolve(&self, id: Uuid) -> Option<SessionPrincipal> {
        let now = Utc::now();
        {
            let sessions = self.sessions.read().await;
            match sessions.get(&id) {
                None => return None,
                Some(session) if !session.is_expired(now) => {
                    return Some(SessionPrincipal::new(session.principal.clone()));
                }
                Some(_) => {}
            }
        }

        tracing::debug!("Session expired");
        self.sessions.write().await.remove(&id);
        None
    }

    /// End a session. Returns whether it existed.
    pub async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Drop every expired session, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired(now));
        before - sessions.len()
    }

    /// Number of sessions held, including expired ones not yet purged
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// `Set-Cookie` value carrying a session id
pub fn session_cookie(id: Uuid, ttl: Duration) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        id,
        ttl.num_seconds()
    )
}

/// `Set-Cookie` value that clears the session cookie
pub fn expired_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// Extract the session id from the request's `Cookie` headers
///
/// Returns `None` if the cookie is absent or does not hold a UUID.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
