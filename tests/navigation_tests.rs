mod common;

use axum::http::{header, StatusCode};
use serde_json::Value;

use common::spawn_app;

#[tokio::test]
async fn test_root_redirects_to_api_index() {
    let app = spawn_app().await;

    let response = app.server.get("/").await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header(header::LOCATION), "/api/");
}

#[tokio::test]
async fn test_api_index_is_public() {
    let app = spawn_app().await;

    let response = app.server.get("/api/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["customer"], "http://testserver/api/customer/");
    assert_eq!(body["product"], "http://testserver/api/product/");
    assert_eq!(body["wishlist"], "http://testserver/api/wishlist/");
    assert_eq!(body["user"], "http://testserver/api/user/");
}

#[tokio::test]
async fn test_schema_and_docs_page() {
    let app = spawn_app().await;

    let response = app.server.get("/schema/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["openapi"].as_str().unwrap().starts_with("3."));
    assert!(body["paths"]["/api/customer/{id}/"]["patch"].is_object());
    assert!(body["paths"]["/api/user/{id}/"]["put"].is_null());

    let response = app.server.get("/swagger-ui/").await;
    response.assert_status_ok();
    let page = response.text();
    assert!(page.contains("SwaggerUIBundle"));
    assert!(page.contains(r##"dom_id: "#swagger-ui""##));
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app().await;

    let response = app.server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");
}
