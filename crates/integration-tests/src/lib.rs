//! Integration tests for Tangelo.
//!
//! Each test builds the full application router on top of a throwaway
//! in-memory `SQLite` database, then drives it with one-shot requests.
//! No external services are required.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tangelo-integration-tests
//! ```

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use serde_json::Value;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use tangelo_api::config::ApiConfig;
use tangelo_api::state::AppState;
use tangelo_api::{db, routes};

/// A full application instance over a private in-memory database.
pub struct TestContext {
    pool: SqlitePool,
    app: Router,
}

impl TestContext {
    /// Build a fresh app with an empty schema.
    ///
    /// # Panics
    ///
    /// Panics if the database cannot be opened or the schema fails to apply.
    pub async fn new() -> Self {
        // One connection only: every further pool connection would get its
        // own private in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .expect("failed to open in-memory database");

        db::init_schema(&pool).await.expect("failed to apply schema");

        let app = routes::app(AppState::new(ApiConfig::default(), pool.clone()));

        Self { pool, app }
    }

    /// Send one request through the router.
    ///
    /// # Panics
    ///
    /// Panics if the service fails.
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("request failed")
    }

    /// GET `uri`, returning status and parsed JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the body is not JSON.
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");

        split_json(self.send(request).await).await
    }

    /// POST `body` as JSON to `uri`, returning status and parsed JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response body is not JSON.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");

        split_json(self.send(request).await).await
    }

    /// PATCH `body` as JSON to `uri`, returning status and parsed JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response body is not JSON.
    pub async fn patch(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("PATCH")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");

        split_json(self.send(request).await).await
    }

    /// DELETE `uri`, returning status and parsed JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response body is not JSON.
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .expect("failed to build request");

        split_json(self.send(request).await).await
    }

    /// Create a user through the API and return its JSON record.
    ///
    /// # Panics
    ///
    /// Panics if the create does not succeed.
    pub async fn create_user(&self, name: &str, email: &str) -> Value {
        let (status, body) = self
            .post("/users", &serde_json::json!({"name": name, "email": email}))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    /// Number of user rows, read directly from the store.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn count_users(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }

    /// Number of to-do rows, read directly from the store.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn count_todos(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM todos")
            .fetch_one(&self.pool)
            .await
            .expect("count query failed")
    }
}

/// Split a response into its status and parsed JSON body.
///
/// # Panics
///
/// Panics if the body cannot be read or is not valid JSON.
pub async fn split_json(response: Response<Body>) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    let value = serde_json::from_slice(&bytes).expect("body is not JSON");

    (status, value)
}
