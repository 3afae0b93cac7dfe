#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use inci_core::store::InMemoryStore;
use tempfile::TempDir;
use tower::ServiceExt;

use inci_api::config::ServerConfig;
use inci_api::router::build_app_router;
use inci_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and writes uploads into `upload_dir`.
pub fn test_config(upload_dir: &std::path::Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: upload_dir.to_path_buf(),
        seed_demo_data: false,
        database_url: None,
    }
}

/// A router over a fresh in-memory store.
///
/// The store handle lets tests arrange data directly; the temp directory
/// holds uploads and is removed on drop.
pub struct TestApp {
    pub app: Router,
    pub store: Arc<InMemoryStore>,
    _upload_dir: TempDir,
}

/// Build the full application router with all middleware layers, exactly
/// as `main.rs` does.
pub fn build_test_app() -> TestApp {
    let upload_dir = TempDir::new().expect("temp upload dir");
    let config = test_config(upload_dir.path());
    let store = Arc::new(InMemoryStore::new());

    let state = AppState::new(store.clone(), "memory", Arc::new(config.clone()));
    let app = build_app_router(state, &config);

    TestApp {
        app,
        store,
        _upload_dir: upload_dir,
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::POST, uri, body).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    json_request(app, Method::PATCH, uri, body).await
}

pub async fn body_bytes(response: Response<Body>) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a student through the API and return its id.
pub async fn create_student(app: &Router, first: &str, school: &str, city: &str) -> String {
    let response = post_json(
        app.clone(),
        "/api/students",
        serde_json::json!({
            "firstName": first,
            "lastName": "Test",
            "schoolName": school,
            "city": city,
            "coordinatorTeacherName": "Ayşe Yılmaz",
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Log an activity through the API and return its id.
pub async fn log_activity(app: &Router, student_id: &str, date: &str, kind: &str, hours: f64) -> String {
    let response = post_json(
        app.clone(),
        &format!("/api/students/{student_id}/activities"),
        serde_json::json!({
            "date": date,
            "type": kind,
            "hours": hours,
            "description": "test",
        }),
    )
    .await;
    assert_eq!(response.status(), 201);
    body_json(response).await["data"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Set an activity's status through the review endpoint.
pub async fn review(app: &Router, activity_id: &str, status: &str) {
    let response = patch_json(
        app.clone(),
        &format!("/api/activities/{activity_id}/status"),
        serde_json::json!({ "status": status }),
    )
    .await;
    assert_eq!(response.status(), 200);
}
