//! Integration tests for the to-do endpoints.
//!
//! The referential-integrity behavior lives here: creating or re-homing a
//! to-do must verify the referenced user, while updates without a `user`
//! field and deletes never check anything.

use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use tangelo_integration_tests::TestContext;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_todo_for_missing_user_is_rejected() {
    let ctx = TestContext::new().await;

    // Well-formed but unassigned id: a business 404, not a format error.
    let (status, body) = ctx
        .post(
            "/to-do",
            &json!({"name": "water the plants", "user": Uuid::new_v4().to_string()}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("not found"), "unexpected body: {message}");

    // Nothing may have been written.
    assert_eq!(ctx.count_todos().await, 0);
}

#[tokio::test]
async fn test_create_todo_rejects_malformed_user_reference() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .post("/to-do", &json!({"name": "water the plants", "user": "banana"}))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = body["error"].as_str().expect("error message");
    assert!(message.contains("Invalid id"), "unexpected body: {message}");
    assert_eq!(ctx.count_todos().await, 0);
}

#[tokio::test]
async fn test_create_todo_defaults_is_complete_to_false() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;

    let (status, todo) = ctx
        .post(
            "/to-do",
            &json!({"name": "water the plants", "user": user["id"]}),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["name"], "water the plants");
    assert_eq!(todo["is_complete"], false);
    assert_eq!(todo["description"], Value::Null);
    // The created record carries the raw owner reference, not the projection.
    assert_eq!(todo["user"], user["id"]);
    assert!(todo["createdAt"].is_string());
    assert!(todo["updatedAt"].is_string());
}

#[tokio::test]
async fn test_create_todo_honors_explicit_fields() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;

    let (status, todo) = ctx
        .post(
            "/to-do",
            &json!({
                "name": "water the plants",
                "description": "the ficus first",
                "is_complete": true,
                "user": user["id"],
            }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(todo["description"], "the ficus first");
    assert_eq!(todo["is_complete"], true);
}

// ============================================================================
// Read
// ============================================================================

#[tokio::test]
async fn test_list_expands_owner_to_name_and_email_only() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;

    ctx.post("/to-do", &json!({"name": "one", "user": user["id"]}))
        .await;
    ctx.post("/to-do", &json!({"name": "two", "user": user["id"]}))
        .await;

    let (status, body) = ctx.get("/to-do").await;
    assert_eq!(status, StatusCode::OK);

    let todos = body.as_array().expect("array of todos");
    assert_eq!(todos.len(), 2);

    for todo in todos {
        let owner = todo["user"].as_object().expect("expanded owner");
        assert_eq!(owner.len(), 2, "projection has exactly name and email");
        assert_eq!(owner["name"], "Ada");
        assert_eq!(owner["email"], "ada@example.com");
    }
}

#[tokio::test]
async fn test_find_by_user_returns_exactly_that_users_todos() {
    let ctx = TestContext::new().await;
    let ada = ctx.create_user("Ada", "ada@example.com").await;
    let grace = ctx.create_user("Grace", "grace@example.com").await;

    ctx.post("/to-do", &json!({"name": "ada one", "user": ada["id"]}))
        .await;
    ctx.post("/to-do", &json!({"name": "ada two", "user": ada["id"]}))
        .await;
    ctx.post("/to-do", &json!({"name": "grace one", "user": grace["id"]}))
        .await;

    let ada_id = ada["id"].as_str().expect("id is a string");
    let (status, body) = ctx.get(&format!("/to-do/user/{ada_id}")).await;
    assert_eq!(status, StatusCode::OK);

    let todos = body.as_array().expect("array of todos");
    let names: Vec<&str> = todos
        .iter()
        .map(|t| t["name"].as_str().expect("name is a string"))
        .collect();
    assert_eq!(names, vec!["ada one", "ada two"]);

    for todo in todos {
        assert_eq!(todo["user"]["email"], "ada@example.com");
    }
}

#[tokio::test]
async fn test_find_by_unknown_user_returns_empty_array() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get(&format!("/to-do/user/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_find_by_malformed_user_id_is_bad_request() {
    let ctx = TestContext::new().await;

    let (status, _) = ctx.get("/to-do/user/banana").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_todo_returns_null() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx.get(&format!("/to-do/{}", Uuid::new_v4())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_deleted_owner_leaves_dangling_reference() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;
    let (_, todo) = ctx
        .post("/to-do", &json!({"name": "orphan me", "user": user["id"]}))
        .await;

    let user_id = user["id"].as_str().expect("id is a string");
    let (status, _) = ctx.delete(&format!("/users/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);

    // The to-do survives; its expanded owner is now null.
    let todo_id = todo["id"].as_str().expect("id is a string");
    let (status, fetched) = ctx.get(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["name"], "orphan me");
    assert_eq!(fetched["user"], Value::Null);
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_with_missing_user_is_rejected_and_record_unchanged() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;
    let (_, todo) = ctx
        .post("/to-do", &json!({"name": "before", "user": user["id"]}))
        .await;
    let todo_id = todo["id"].as_str().expect("id is a string");

    let (status, body) = ctx
        .patch(
            &format!("/to-do/{todo_id}"),
            &json!({"name": "after", "user": Uuid::new_v4().to_string()}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "user not found");

    let (_, fetched) = ctx.get(&format!("/to-do/{todo_id}")).await;
    assert_eq!(fetched["name"], "before");
    assert_eq!(fetched["user"]["name"], "Ada");
}

#[tokio::test]
async fn test_update_without_user_field_skips_the_existence_check() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;
    let (_, todo) = ctx
        .post("/to-do", &json!({"name": "keep me", "user": user["id"]}))
        .await;

    // Remove the owner; a patch without `user` must still go through.
    let user_id = user["id"].as_str().expect("id is a string");
    ctx.delete(&format!("/users/{user_id}")).await;

    let todo_id = todo["id"].as_str().expect("id is a string");
    let (status, updated) = ctx
        .patch(&format!("/to-do/{todo_id}"), &json!({"is_complete": true}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_complete"], true);
    assert_eq!(updated["name"], "keep me");
}

#[tokio::test]
async fn test_update_moves_todo_to_another_existing_user() {
    let ctx = TestContext::new().await;
    let ada = ctx.create_user("Ada", "ada@example.com").await;
    let grace = ctx.create_user("Grace", "grace@example.com").await;

    let (_, todo) = ctx
        .post("/to-do", &json!({"name": "handover", "user": ada["id"]}))
        .await;
    let todo_id = todo["id"].as_str().expect("id is a string");

    let (status, updated) = ctx
        .patch(&format!("/to-do/{todo_id}"), &json!({"user": grace["id"]}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["user"], grace["id"]);

    let grace_id = grace["id"].as_str().expect("id is a string");
    let (_, body) = ctx.get(&format!("/to-do/user/{grace_id}")).await;
    let todos = body.as_array().expect("array of todos");
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0]["id"], todo["id"]);
}

#[tokio::test]
async fn test_update_missing_todo_returns_null() {
    let ctx = TestContext::new().await;

    let (status, body) = ctx
        .patch(
            &format!("/to-do/{}", Uuid::new_v4()),
            &json!({"name": "anything"}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_todo_returns_record_then_null() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;
    let (_, todo) = ctx
        .post("/to-do", &json!({"name": "short-lived", "user": user["id"]}))
        .await;
    let todo_id = todo["id"].as_str().expect("id is a string");

    let (status, deleted) = ctx.delete(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], todo["id"]);
    assert_eq!(deleted["name"], "short-lived");

    // Deleting again is not an error; there is just nothing to return.
    let (status, body) = ctx.delete(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    assert_eq!(ctx.count_todos().await, 0);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_full_todo_lifecycle() {
    let ctx = TestContext::new().await;
    let user = ctx.create_user("Ada", "ada@example.com").await;

    let (status, todo) = ctx
        .post(
            "/to-do",
            &json!({"name": "water the plants", "user": user["id"]}),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let todo_id = todo["id"].as_str().expect("id is a string");

    let (status, fetched) = ctx.get(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["user"]["name"], user["name"]);

    let (status, updated) = ctx
        .patch(&format!("/to-do/{todo_id}"), &json!({"is_complete": true}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_complete"], true);

    let (status, deleted) = ctx.delete(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], todo["id"]);

    let (status, body) = ctx.get(&format!("/to-do/{todo_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}
