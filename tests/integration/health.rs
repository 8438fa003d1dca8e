use crate::common;

use axum::http::StatusCode;
use serial_test::serial;

#[tokio::test]
async fn test_health_endpoint_in_memory() {
    let app = common::in_memory_app();

    let (status, body) = common::send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
}

#[tokio::test]
#[serial]
async fn test_health_endpoint_postgres() {
    let pool = setup_test_db_or_skip!();
    let app = common::postgres_app(pool);

    let (status, body) = common::send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["store"], "connected");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = common::in_memory_app();

    let (status, body) = common::send(&app, "GET", "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/administrators/{id}/restore"].is_object());
}
