//! Authentication API integration tests
//!
//! Drives register, login, logout and the session guard through the full
//! router.

#![cfg(feature = "server")]

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use common::{login_user, register_user, server_with_store, session_cookie, test_server, UnavailableStore};
use docauth::backend::auth::INVALID_CREDENTIALS;
use pretty_assertions::assert_eq;
use serde_json::Value;

#[tokio::test]
async fn test_register_success() {
    let server = test_server();

    let response = register_user(&server, "alice", "secret123").await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;

    let response = register_user(&server, "alice", "another1").await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"], "Username already taken");
}

#[tokio::test]
async fn test_register_empty_password() {
    let server = test_server();

    let response = register_user(&server, "alice", "").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_blank_username() {
    let server = test_server();

    let response = register_user(&server, "   ", "secret123").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_overlong_password() {
    let server = test_server();
    let password = "a".repeat(73);

    let response = register_user(&server, "alice", &password).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "password must be at most 72 bytes");
}

#[tokio::test]
async fn test_login_with_shared_72_byte_prefix_is_rejected() {
    let server = test_server();
    let password = "a".repeat(72);
    register_user(&server, "alice", &password).await;

    let response = login_user(&server, "alice", &format!("{}WRONG", password)).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"], INVALID_CREDENTIALS);
}

#[tokio::test]
async fn test_login_success_sets_session_cookie() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;

    let response = login_user(&server, "alice", "secret123").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");

    let set_cookie = response.header(header::SET_COOKIE);
    let set_cookie = set_cookie.to_str().unwrap();
    assert!(set_cookie.starts_with("docauth_session="));
    assert!(set_cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_login_rejections_are_indistinguishable() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;

    let wrong_password = login_user(&server, "alice", "wrongpass").await;
    let unknown_user = login_user(&server, "mallory", "secret123").await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.text(), unknown_user.text());

    let body: Value = wrong_password.json();
    assert_eq!(body["error"], INVALID_CREDENTIALS);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;

    let response = login_user(&server, "alice", "Secret123").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_session() {
    let server = test_server();

    let response = server.get("/api/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_session() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;
    let login = login_user(&server, "alice", "secret123").await;
    let cookie = session_cookie(&login);

    let response = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, cookie)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "alice@example.com");
}

#[tokio::test]
async fn test_me_with_garbage_cookie() {
    let server = test_server();

    let response = server
        .get("/api/auth/me")
        .add_header(
            header::COOKIE,
            axum::http::HeaderValue::from_static("docauth_session=not-a-uuid"),
        )
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_ends_session() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;
    let login = login_user(&server, "alice", "secret123").await;
    let cookie = session_cookie(&login);

    let logout = server
        .post("/api/auth/logout")
        .add_header(header::COOKIE, cookie.clone())
        .await;
    assert_eq!(logout.status_code(), StatusCode::NO_CONTENT);
    let cleared = logout.header(header::SET_COOKIE);
    assert!(cleared.to_str().unwrap().contains("Max-Age=0"));

    let me = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, cookie)
        .await;
    assert_eq!(me.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session() {
    let server = test_server();

    let response = server.post("/api/auth/logout").await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_relogin_replaces_previous_session() {
    let server = test_server();
    register_user(&server, "alice", "secret123").await;
    let first = session_cookie(&login_user(&server, "alice", "secret123").await);

    let second = server
        .post("/api/auth/login")
        .add_header(header::COOKIE, first.clone())
        .json(&serde_json::json!({ "username": "alice", "password": "secret123" }))
        .await;
    assert_eq!(second.status_code(), StatusCode::OK);

    let stale = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, first)
        .await;
    assert_eq!(stale.status_code(), StatusCode::UNAUTHORIZED);

    let fresh = server
        .get("/api/auth/me")
        .add_header(header::COOKIE, session_cookie(&second))
        .await;
    assert_eq!(fresh.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_store_outage_is_not_a_rejection() {
    let server = server_with_store(Arc::new(UnavailableStore));

    let login = login_user(&server, "alice", "secret123").await;
    assert_eq!(login.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = login.json();
    assert_eq!(body["error"], "Service unavailable");

    let register = register_user(&server, "alice", "secret123").await;
    assert_eq!(register.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_health_and_fallback() {
    let server = test_server();

    let health = server.get("/health").await;
    assert_eq!(health.status_code(), StatusCode::OK);
    assert_eq!(health.text(), "ok");

    let missing = server.get("/nope").await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}
