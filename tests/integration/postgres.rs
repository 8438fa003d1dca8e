use crate::common::{self, candidate_json, create_admin, send};

use axum::http::StatusCode;
use serde_json::json;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_postgres_create_and_get_admin() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::postgres_app(pool.clone());
    let id = create_admin(&app, "ada@example.com").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/administrators/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["fullName"], "Ada Lovelace");

    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/administrators",
        Some(candidate_json("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_postgres_soft_delete_lifecycle() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let app = common::postgres_app(pool.clone());
    let id = create_admin(&app, "ada@example.com").await;
    create_admin(&app, "grace@example.com").await;
    let uri = format!("/api/v1/administrators/{id}");

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/v1/administrators", None).await;
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["attributes"]["email"], "grace@example.com");

    // soft-deleted records still hold their email
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/administrators",
        Some(candidate_json("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // updates still reach the deleted record
    let (status, body) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "name": { "lastName": "King" } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["fullName"], "Ada King");

    let (status, _) = send(&app, "POST", &format!("{uri}/restore"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/v1/administrators", None).await;
    assert_eq!(body["meta"]["total"], 2);

    common::cleanup_test_db(&pool).await;
}
