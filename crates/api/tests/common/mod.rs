#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use stencil_api::auth::jwt::JwtConfig;
use stencil_api::config::{ServerConfig, StoreBackend};
use stencil_api::router::build_app_router;
use stencil_api::state::AppState;
use stencil_db::store::{MemoryTemplateStore, MemoryUserStore};

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` backed by the in-memory stores.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
        min_password_length: 8,
    }
}

/// Build the full application router over fresh in-memory stores, with the
/// same middleware stack production uses.
pub fn build_test_app() -> Router {
    let config = test_config();
    let state = AppState::new(
        config.clone(),
        Arc::new(MemoryTemplateStore::new()),
        Arc::new(MemoryUserStore::new()),
    );
    build_app_router(state, &config)
}

/// Send a request with an optional JSON body and bearer token.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register `username` and return a bearer token for it.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let credentials = json!({"username": username, "password": "password123"});

    let response = post_json(app.clone(), "/api/v1/auth/register", credentials.clone()).await;
    assert_eq!(response.status(), 201, "registration should succeed");

    let response = post_json(app.clone(), "/api/v1/auth/login", credentials).await;
    assert_eq!(response.status(), 200, "login should succeed");
    body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Create a template through the API and return its JSON representation.
pub async fn create_template(app: &Router, token: &str, body: Value) -> Value {
    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/templates",
        Some(body),
        Some(token),
    )
    .await;
    assert_eq!(response.status(), 201, "template creation should succeed");
    body_json(response).await["data"].clone()
}
