//! Common test utilities and helpers
//!
//! Builds an in-process server over an in-memory document store with a
//! cheap bcrypt cost, plus a store that fails every call.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header, HeaderValue};
use axum_test::{TestResponse, TestServer};
use docauth::backend::routes::create_router;
use docauth::backend::server::AppState;
use docauth::backend::store::{DocumentStore, Filter, MemoryDocumentStore, StoreError};
use docauth::shared::{AppConfig, Document};

/// Test configuration: in-memory store, minimum bcrypt cost
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .database_url("memory")
        .bcrypt_cost(4)
        .build()
        .expect("test config is valid")
}

/// Server over the given store
pub fn server_with_store(store: Arc<dyn DocumentStore>) -> TestServer {
    let state = AppState::new(store, &test_config());
    TestServer::new(create_router(state)).expect("Failed to start test server")
}

/// Server over a fresh in-memory store
pub fn test_server() -> TestServer {
    server_with_store(Arc::new(MemoryDocumentStore::new()))
}

/// Register a user through the API
pub async fn register_user(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/register")
        .json(&serde_json::json!({
            "username": username,
            "email": format!("{}@example.com", username),
            "password": password,
        }))
        .await
}

/// Log in through the API
pub async fn login_user(server: &TestServer, username: &str, password: &str) -> TestResponse {
    server
        .post("/api/auth/login")
        .json(&serde_json::json!({
            "username": username,
            "password": password,
        }))
        .await
}

/// `Cookie` header value for the session set by a login response
pub fn session_cookie(response: &TestResponse) -> HeaderValue {
    let set_cookie = response.header(header::SET_COOKIE);
    let pair = set_cookie
        .to_str()
        .expect("Set-Cookie is ASCII")
        .split(';')
        .next()
        .expect("Set-Cookie has a name=value pair")
        .to_string();
    HeaderValue::from_str(&pair).expect("valid cookie header")
}

/// Document store whose backend is down
#[derive(Debug, Default)]
pub struct UnavailableStore;

#[async_trait]
impl DocumentStore for UnavailableStore {
    async fn insert_one(&self, _collection: &str, _document: Document) -> Result<(), StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn insert_unique(
        &self,
        _collection: &str,
        _key: &str,
        _document: Document,
    ) -> Result<(), StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }

    async fn find_one(
        &self,
        _collection: &str,
        _filter: &Filter,
    ) -> Result<Option<Document>, StoreError> {
        Err(StoreError::unavailable("connection refused"))
    }
}
