//! HTTP route handlers for the api.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database ping)
//!
//! # Users
//! POST   /users                - Create a user
//! GET    /users                - List all users
//! DELETE /users/{id}           - Delete a user, returning it
//!
//! # To-dos
//! POST   /to-do                - Create a to-do (owner must exist)
//! GET    /to-do                - List all to-dos with owners expanded
//! GET    /to-do/user/{user_id} - List one user's to-dos
//! GET    /to-do/{id}           - Get a to-do, or null
//! PATCH  /to-do/{id}           - Partially update a to-do, or null
//! DELETE /to-do/{id}           - Delete a to-do, returning it or null
//! ```

pub mod todos;
pub mod users;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create).get(users::index))
        .route("/{id}", delete(users::remove))
}

/// Create the to-do routes router.
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(todos::create).get(todos::index))
        .route("/user/{user_id}", get(todos::by_user))
        .route(
            "/{id}",
            get(todos::show).patch(todos::update).delete(todos::remove),
        )
}

/// Create all routes for the api.
pub fn routes() -> Router<AppState> {
    Router::new()
        // User directory
        .nest("/users", user_routes())
        // To-do items
        .nest("/to-do", todo_routes())
}

/// Build the full application router with middleware and state applied.
///
/// Used by the binary and by integration tests, so both run the same app.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
