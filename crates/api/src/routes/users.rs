//! User API routes.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use tangelo_core::UserId;

use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::User;
use crate::state::AppState;

/// Request to create a user.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

/// Create a new user.
///
/// POST /users
///
/// Duplicate emails are accepted; there is no uniqueness requirement.
///
/// # Errors
///
/// Returns `AppError` if the insert fails.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let user = UserRepository::new(state.pool())
        .create(&body.name, &body.email)
        .await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users.
///
/// GET /users
///
/// # Errors
///
/// Returns `AppError` if the query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.pool()).list().await?;

    Ok(Json(users))
}

/// Delete a user, returning the deleted record.
///
/// DELETE /users/{id}
///
/// To-dos owned by the user are left in place.
///
/// # Errors
///
/// Returns a 404 if no user matched and a 400 if `id` is not well-formed.
pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<User>> {
    let id = id.parse::<UserId>().map_err(|_| AppError::InvalidId(id))?;

    let user = UserRepository::new(state.pool()).delete(id).await?;

    Ok(Json(user))
}
