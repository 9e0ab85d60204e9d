//! Integration tests for the user endpoints.

use axum::http::StatusCode;
use uuid::Uuid;

use tangelo_integration_tests::TestContext;

#[tokio::test]
async fn test_create_user_returns_record_and_lists_it() {
    let ctx = TestContext::new().await;

    let user = ctx.create_user("Ada", "ada@example.com").await;
    assert_eq!(user["name"], "Ada");
    assert_eq!(user["email"], "ada@example.com");

    let id = user["id"].as_str().expect("id is a string");
    assert!(Uuid::parse_str(id).is_ok(), "id is a generated UUID: {id}");

    let (status, body) = ctx.get("/users").await;
    assert_eq!(status, StatusCode::OK);

    let users = body.as_array().expect("array of users");
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], user["id"]);
    assert_eq!(users[0]["name"], "Ada");
}

#[tokio::test]
async fn test_create_user_allows_duplicate_emails() {
    let ctx = TestContext::new().await;

    let first = ctx.create_user("Ada", "shared@example.com").await;
    let second = ctx.create_user("Grace", "shared@example.com").await;
    assert_ne!(first["id"], second["id"]);

    let (_, body) = ctx.get("/users").await;
    assert_eq!(body.as_array().expect("array of users").len(), 2);
}

#[tokio::test]
async fn test_delete_user_returns_deleted_record() {
    let ctx = TestContext::new().await;

    let user = ctx.create_user("Ada", "ada@example.com").await;
    let id = user["id"].as_str().expect("id is a string");

    let (status, deleted) = ctx.delete(&format!("/users/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, user);

    let (_, body) = ctx.get("/users").await;
    assert_eq!(body.as_array().expect("array of users").len(), 0);
}

#[tokio::test]
async fn test_delete_missing_user_returns_not_found() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.delete(&format!("/users/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user not found");
}

#[tokio::test]
async fn test_delete_user_with_malformed_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.delete("/users/banana").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("Invalid id"), "unexpected body: {message}");
}
