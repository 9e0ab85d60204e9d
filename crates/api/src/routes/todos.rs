//! To-do API routes.
//!
//! Read endpoints return to-dos with the owning user expanded to its public
//! projection; write endpoints return the raw record with the plain owner
//! reference. Single-item reads, updates and deletes respond `200` with a
//! JSON `null` body when nothing matched, leaving absence to the caller.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tangelo_core::{TodoId, UserId};

use crate::db::TodoRepository;
use crate::error::{AppError, Result};
use crate::models::{NewTodo, Todo, TodoPatch, TodoWithOwner};
use crate::state::AppState;

/// Request to create a to-do.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to false when omitted.
    #[serde(default)]
    pub is_complete: bool,
    /// ID of the owning user; must refer to an existing user.
    pub user: String,
}

/// Partial update for a to-do. Absent fields keep their stored value.
#[derive(Debug, Deserialize)]
pub struct UpdateTodoRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_complete: Option<bool>,
    pub user: Option<String>,
}

/// Create a new to-do for an existing user.
///
/// POST /to-do
///
/// # Errors
///
/// Returns a 404 if the referenced user does not exist and a 400 if the
/// reference is not well-formed.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<(StatusCode, Json<Todo>)> {
    let user = body
        .user
        .parse::<UserId>()
        .map_err(|_| AppError::InvalidId(body.user))?;

    let todo = TodoRepository::new(state.pool())
        .create(NewTodo {
            name: body.name,
            description: body.description,
            is_complete: body.is_complete,
            user,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(todo)))
}

/// List all to-dos with owners expanded.
///
/// GET /to-do
///
/// # Errors
///
/// Returns `AppError` if the query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<TodoWithOwner>>> {
    let todos = TodoRepository::new(state.pool()).list().await?;

    Ok(Json(todos))
}

/// List the to-dos owned by one user.
///
/// GET /to-do/user/{user_id}
///
/// An unknown user yields an empty array, not a 404.
///
/// # Errors
///
/// Returns a 400 if `user_id` is not well-formed.
pub async fn by_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<TodoWithOwner>>> {
    let user = user_id
        .parse::<UserId>()
        .map_err(|_| AppError::InvalidId(user_id))?;

    let todos = TodoRepository::new(state.pool()).list_by_user(user).await?;

    Ok(Json(todos))
}

/// Get a single to-do, or `null` if none matched.
///
/// GET /to-do/{id}
///
/// # Errors
///
/// Returns a 400 if `id` is not well-formed.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<TodoWithOwner>>> {
    let id = id.parse::<TodoId>().map_err(|_| AppError::InvalidId(id))?;

    let todo = TodoRepository::new(state.pool()).get_by_id(id).await?;

    Ok(Json(todo))
}

/// Partially update a to-do, returning the updated record or `null`.
///
/// PATCH /to-do/{id}
///
/// # Errors
///
/// Returns a 404 if the patch references a user that does not exist and a
/// 400 if an identifier is not well-formed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateTodoRequest>,
) -> Result<Json<Option<Todo>>> {
    let id = id.parse::<TodoId>().map_err(|_| AppError::InvalidId(id))?;

    let user = body
        .user
        .map(|raw| raw.parse::<UserId>().map_err(|_| AppError::InvalidId(raw)))
        .transpose()?;

    let todo = TodoRepository::new(state.pool())
        .update(
            id,
            TodoPatch {
                name: body.name,
                description: body.description,
                is_complete: body.is_complete,
                user,
            },
        )
        .await?;

    Ok(Json(todo))
}

/// Delete a to-do, returning the deleted record or `null`.
///
/// DELETE /to-do/{id}
///
/// # Errors
///
/// Returns a 400 if `id` is not well-formed.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Option<Todo>>> {
    let id = id.parse::<TodoId>().map_err(|_| AppError::InvalidId(id))?;

    let todo = TodoRepository::new(state.pool()).delete(id).await?;

    Ok(Json(todo))
}
