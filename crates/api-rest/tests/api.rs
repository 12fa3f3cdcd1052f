use api_rest::{router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use folio_core::{CoreConfig, InMemoryStore, NonEmptyText, PageService, PageStore};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

struct TestApp {
    app: Router,
    _frontend: TempDir,
}

fn test_cfg() -> Arc<CoreConfig> {
    Arc::new(
        CoreConfig::new(
            PathBuf::from("unused/pages.json"),
            NonEmptyText::new("Untitled").unwrap(),
        )
        .expect("CoreConfig::new should succeed"),
    )
}

fn test_app_with_store(store: Arc<dyn PageStore>) -> TestApp {
    let frontend = TempDir::new().expect("Failed to create temp dir");
    std::fs::write(
        frontend.path().join("index.html"),
        "<!doctype html><title>Folio</title>",
    )
    .unwrap();

    let state = AppState::new(PageService::new(test_cfg(), store));
    TestApp {
        app: router(state, frontend.path()),
        _frontend: frontend,
    }
}

fn test_app() -> TestApp {
    test_app_with_store(Arc::new(InMemoryStore::new()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

#[tokio::test]
async fn health_reports_ok() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::GET, "/api/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "OK");
    assert!(body["timestamp"].is_string());
    assert!(body["uptime"].is_number());
}

#[tokio::test]
async fn list_is_empty_initially() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::GET, "/api/pages", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_with_only_content_gets_default_title() {
    let t = test_app();

    let (status, body) = send(
        &t.app,
        Method::POST,
        "/api/pages",
        Some(json!({"content": "Test content"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Untitled");
    assert_eq!(body["content"], "Test content");
}

#[tokio::test]
async fn create_without_title_or_content_is_bad_request() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::POST, "/api/pages", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title or content required");

    let (status, _) = send(
        &t.app,
        Method::POST,
        "/api/pages",
        Some(json!({"title": "", "content": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let t = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/pages")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = t.app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let t = test_app();

    for method in [Method::GET, Method::DELETE] {
        let (status, body) = send(&t.app, method, "/api/pages/non-existent-id", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Page not found");
    }

    let (status, body) = send(
        &t.app,
        Method::PUT,
        "/api/pages/non-existent-id",
        Some(json!({"title": "Updated"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn page_lifecycle_end_to_end() {
    let t = test_app();

    let (status, created) = send(
        &t.app,
        Method::POST,
        "/api/pages",
        Some(json!({"title": "Test Page", "content": "Test content"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id should be a string").to_string();
    assert!(!id.is_empty());
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let uri = format!("/api/pages/{id}");
    let (status, fetched) = send(&t.app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &t.app,
        Method::PUT,
        &uri,
        Some(json!({"title": "Updated Title"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Updated Title");
    assert_eq!(updated["content"], "Test content");
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let (status, deleted) = send(&t.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(deleted["message"].is_string());
    assert_eq!(deleted["page"]["id"], id.as_str());

    let (status, _) = send(&t.app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_created_pages_in_order() {
    let t = test_app();
    for title in ["One", "Two"] {
        send(&t.app, Method::POST, "/api/pages", Some(json!({"title": title}))).await;
    }

    let (_, body) = send(&t.app, Method::GET, "/api/pages", None).await;

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["One", "Two"]);
}

#[tokio::test]
async fn storage_failure_is_internal_error() {
    let t = test_app_with_store(Arc::new(InMemoryStore::unavailable()));

    let (status, body) = send(&t.app, Method::GET, "/api/pages", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
}

#[tokio::test]
async fn root_serves_front_end() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("<title>Folio</title>"));
}

#[tokio::test]
async fn unmatched_routes_are_not_found() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::GET, "/api/unknown", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Route not found");

    let (status, _) = send(&t.app, Method::GET, "/missing.js", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_page_routes() {
    let t = test_app();

    let (status, body) = send(&t.app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/pages/{id}"].is_object());
}
