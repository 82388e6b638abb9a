#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use fasl_api::auth::password::hash_password;
use fasl_api::config::{ServerConfig, SessionConfig};
use fasl_api::router::build_app_router;
use fasl_api::state::AppState;
use fasl_db::models::account::Account;
use fasl_db::provisioning::{self, NewAccount, RoleProfileInput};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        session: SessionConfig { ttl_hours: 24 },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This reuses the production router builder so integration tests exercise
/// the same middleware stack (CORS, request ID, timeout, tracing, panic
/// recovery) that `main.rs` uses. No mailer is configured, so contact-form
/// submissions fail with 502 in tests.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer: None,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Account seeding
// ---------------------------------------------------------------------------

/// Plaintext password used for every seeded test account.
pub const TEST_PASSWORD: &str = "test_password_123!";

/// Provision a test account directly in the database.
pub async fn seed_account(pool: &PgPool, username: &str, profile: RoleProfileInput) -> Account {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    provisioning::create_account(
        pool,
        NewAccount {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            phone: None,
            address: None,
            date_of_birth: None,
            profile,
        },
    )
    .await
    .expect("account provisioning should succeed")
}

/// Log in via the API and return the JSON response containing `token`,
/// `csrf_token`, and `account` info.
pub async fn login(app: Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app, "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body, no authentication.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a JSON request with Bearer token and CSRF header, any method.
pub async fn send_csrf(
    app: Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: &str,
    csrf: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .header("x-csrf-token", csrf)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with Bearer token and CSRF header.
pub async fn delete_csrf(app: Router, uri: &str, token: &str, csrf: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .header("x-csrf-token", csrf)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("response body should be valid JSON")
}

/// Fetch a fresh CSRF token for the session behind `token`.
pub async fn fetch_csrf(app: Router, token: &str) -> String {
    let response = get_auth(app, "/api/v1/auth/csrf", token).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["csrf_token"].as_str().unwrap().to_string()
}
