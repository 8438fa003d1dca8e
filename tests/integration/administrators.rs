use crate::common::{self, candidate_json, create_admin, send};

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn test_create_admin() {
    let app = common::in_memory_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/administrators",
        Some(candidate_json("ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["type"], "administrators");
    let attributes = &body["data"]["attributes"];
    assert_eq!(attributes["fullName"], "Ada Lovelace");
    assert_eq!(attributes["email"], "ada@example.com");
    assert_eq!(attributes["bloodGroup"], "O+");
    assert_eq!(attributes["dateOfBirth"], "1815-12-10");
    assert_eq!(attributes["profileImg"], "");
    assert_eq!(attributes["isDeleted"], false);
}

#[tokio::test]
async fn test_create_admin_duplicate_email() {
    let app = common::in_memory_app();
    create_admin(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/v1/administrators",
        Some(candidate_json("ada@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["errors"][0]["code"], "unique");
    assert_eq!(body["errors"][0]["source"]["pointer"], "/data/attributes/email");
}

#[tokio::test]
async fn test_create_admin_validation_errors() {
    let app = common::in_memory_app();
    let mut candidate = candidate_json("ada@example.com");
    let object = candidate.as_object_mut().unwrap();
    object.remove("gender");
    object.insert("name".to_string(), json!({ "firstName": "A".repeat(31) }));

    let (status, body) = send(&app, "POST", "/api/v1/administrators", Some(candidate)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = body["errors"].as_array().unwrap();
    let pointers: Vec<&str> = errors
        .iter()
        .filter_map(|e| e["source"]["pointer"].as_str())
        .collect();
    assert!(pointers.contains(&"/data/attributes/gender"));
    assert!(pointers.contains(&"/data/attributes/name/firstName"));
    assert!(pointers.contains(&"/data/attributes/name/lastName"));

    let gender = errors
        .iter()
        .find(|e| e["source"]["pointer"] == "/data/attributes/gender")
        .unwrap();
    assert_eq!(gender["detail"], "Gender is required");
    assert_eq!(gender["code"], "required");
}

#[tokio::test]
async fn test_create_admin_invalid_body_with_taken_email() {
    let app = common::in_memory_app();
    create_admin(&app, "ada@example.com").await;

    let mut candidate = candidate_json("ada@example.com");
    candidate.as_object_mut().unwrap().remove("designation");

    let (status, body) = send(&app, "POST", "/api/v1/administrators", Some(candidate)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["code"], "required");
    assert_eq!(
        body["errors"][0]["source"]["pointer"],
        "/data/attributes/designation"
    );
}

#[tokio::test]
async fn test_create_admin_malformed_body() {
    let app = common::in_memory_app();
    let mut candidate = candidate_json("ada@example.com");
    candidate["userRef"] = json!("not-a-uuid");

    let (status, body) = send(&app, "POST", "/api/v1/administrators", Some(candidate)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["code"], "malformed");
    assert_eq!(body["errors"][0]["source"]["pointer"], "/data/attributes/userRef");
}

#[tokio::test]
async fn test_get_admin() {
    let app = common::in_memory_app();
    let id = create_admin(&app, "ada@example.com").await;

    let (status, body) = send(&app, "GET", &format!("/api/v1/administrators/{id}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());
    assert_eq!(body["data"]["attributes"]["fullName"], "Ada Lovelace");
}

#[tokio::test]
async fn test_get_admin_not_found() {
    let app = common::in_memory_app();

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/v1/administrators/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_admins_with_pagination() {
    let app = common::in_memory_app();
    for i in 0..3 {
        create_admin(&app, &format!("admin{i}@example.com")).await;
    }

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/administrators?page[number]=2&page[size]=2",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["meta"]["total"], 3);
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["meta"]["perPage"], 2);
    assert_eq!(
        body["links"]["prev"],
        "/api/v1/administrators?page[number]=1&page[size]=2"
    );
    assert!(body["links"].get("next").is_none());
}

#[tokio::test]
async fn test_list_admins_with_filter() {
    let app = common::in_memory_app();
    create_admin(&app, "ada@example.com").await;
    create_admin(&app, "grace@example.com").await;

    let (status, body) = send(
        &app,
        "GET",
        "/api/v1/administrators?filter[email]=grace@example.com",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["total"], 1);
    assert_eq!(body["data"][0]["attributes"]["email"], "grace@example.com");
}

#[tokio::test]
async fn test_list_admins_invalid_query() {
    let app = common::in_memory_app();

    let (status, body) = send(&app, "GET", "/api/v1/administrators?page[number]=first", None).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["source"]["pointer"], "/data/attributes/query");
}

#[tokio::test]
async fn test_update_admin() {
    let app = common::in_memory_app();
    let id = create_admin(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/api/v1/administrators/{id}"),
        Some(json!({ "name": { "firstName": "Augusta" }, "designation": "Dean" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let attributes = &body["data"]["attributes"];
    assert_eq!(attributes["fullName"], "Augusta Lovelace");
    assert_eq!(attributes["designation"], "Dean");
    assert_eq!(attributes["email"], "ada@example.com");
}

#[tokio::test]
async fn test_update_admin_validation_and_conflict() {
    let app = common::in_memory_app();
    let id = create_admin(&app, "ada@example.com").await;
    create_admin(&app, "grace@example.com").await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/administrators/{id}"),
        Some(json!({ "bloodGroup": "Z+" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/administrators/{id}"),
        Some(json!({ "email": "grace@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/v1/administrators/{}", Uuid::new_v4()),
        Some(json!({ "designation": "Dean" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_and_restore_admin() {
    let app = common::in_memory_app();
    let id = create_admin(&app, "ada@example.com").await;
    let uri = format!("/api/v1/administrators/{id}");

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["meta"]["deleted"], true);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/v1/administrators", None).await;
    assert_eq!(body["meta"]["total"], 0);

    // the email stays reserved while the record is soft-deleted
    let (status, _) = send(
        &app,
        "POST",
        "/api/v1/administrators",
        Some(candidate_json("ada@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, body) = send(&app, "POST", &format!("{uri}/restore"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["attributes"]["isDeleted"], false);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_unknown_admin() {
    let app = common::in_memory_app();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/v1/administrators/{}", Uuid::new_v4()),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
