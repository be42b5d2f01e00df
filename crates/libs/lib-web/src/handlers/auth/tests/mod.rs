//! # Auth Handler Tests
//!
//! Requests go through the full application router against an in-memory
//! database.


use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use lib_core::_dev_utils::init_test_db;
use lib_core::{Config, DbPool};
use serde_json::Value;
use tower::ServiceExt;

pub const SIGNUP_URI: &str = "/api/v1/auth/signup";
pub const LOGIN_URI: &str = "/api/v1/auth/login";

/// Create test config
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test-secret-key-must-be-at-least-32-characters-long!".to_string(),
        jwt_expiration_secs: 3600,
    }
}

/// Router and state over a fresh database.
pub async fn test_app() -> (Router, AppState) {
    let pool: DbPool = init_test_db().await;
    let state = AppState::new(pool, test_config());
    (create_router(state.clone(), &[]), state)
}

/// POST a JSON body; returns status and parsed JSON response.
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, "application/json", body.to_string()).await
}

/// POST an arbitrary body with the given content type.
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: &str,
    body: impl Into<String>,
) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", content_type)
                .body(Body::from(body.into()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub fn signup_body(username: &str, email: &str, password: &str) -> Value {
    serde_json::json!({ "username": username, "email": email, "password": password })
}

pub fn login_body(email: &str, password: &str) -> Value {
    serde_json::json!({ "email": email, "password": password })
}
