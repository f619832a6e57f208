#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use standboard_api::config::ServerConfig;
use standboard_api::router::build_app_router;
use standboard_api::state::AppState;
use standboard_core::memory::InMemoryRepository;
use standboard_core::slot::GridConfig;
use standboard_core::store::AssignmentStore;
use standboard_core::types::StandId;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(stand_count: StandId) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        stand_count,
    }
}

/// Build the full application router over the given in-memory repository.
pub fn build_test_app_with(repo: Arc<InMemoryRepository>, stand_count: StandId) -> Router {
    let config = test_config(stand_count);
    let store = AssignmentStore::new(repo, GridConfig::with_stand_count(stand_count));
    let state = AppState { store };
    build_app_router(state, &config)
}

/// Build the full application router over an empty repository.
pub fn build_test_app(stand_count: StandId) -> Router {
    build_test_app_with(Arc::new(InMemoryRepository::new()), stand_count)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the parsed body.
pub async fn expect_json(response: Response, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}
