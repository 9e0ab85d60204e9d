//! To-do repository for database operations.
//!
//! Reads expand the owning user through a `LEFT JOIN`, so to-dos whose user
//! was deleted afterwards still come back, with the owner absent. Writes that
//! set an owner run the existence check and the write in one transaction, so
//! a concurrent user delete cannot slip in between.

use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};

use tangelo_core::{TodoId, UserId};

use super::RepositoryError;
use crate::models::{NewTodo, Todo, TodoPatch, TodoWithOwner, UserSummary};

#[derive(sqlx::FromRow)]
struct TodoRow {
    id: String,
    name: String,
    description: Option<String>,
    is_complete: bool,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoRow {
    fn into_todo(self) -> Result<Todo, RepositoryError> {
        let id = self.id.parse::<TodoId>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid todo id in database: {e}"))
        })?;
        let user = self.user_id.parse::<UserId>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;

        Ok(Todo {
            id,
            name: self.name,
            description: self.description,
            is_complete: self.is_complete,
            user,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct TodoWithOwnerRow {
    id: String,
    name: String,
    description: Option<String>,
    is_complete: bool,
    owner_name: Option<String>,
    owner_email: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TodoWithOwnerRow {
    fn into_todo(self) -> Result<TodoWithOwner, RepositoryError> {
        let id = self.id.parse::<TodoId>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid todo id in database: {e}"))
        })?;

        // Both owner columns are NULL exactly when the join found no user.
        let user = self
            .owner_name
            .zip(self.owner_email)
            .map(|(name, email)| UserSummary { name, email });

        Ok(TodoWithOwner {
            id,
            name: self.name,
            description: self.description,
            is_complete: self.is_complete,
            user,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for to-do database operations.
pub struct TodoRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepository<'a> {
    /// Create a new to-do repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new to-do after confirming its owner exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UserNotFound` if the owning user does not
    /// exist; nothing is written in that case.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn create(&self, new: NewTodo) -> Result<Todo, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if !owner_exists(&mut tx, new.user).await? {
            return Err(RepositoryError::UserNotFound);
        }

        let id = TodoId::generate();
        let now = Utc::now();

        sqlx::query(
            r"
            INSERT INTO todos (id, name, description, is_complete, user_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.is_complete)
        .bind(new.user.to_string())
        .bind(now)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Todo {
            id,
            name: new.name,
            description: new.description,
            is_complete: new.is_complete,
            user: new.user,
            created_at: now,
            updated_at: now,
        })
    }

    /// List every to-do with its owner expanded, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored id is invalid.
    pub async fn list(&self) -> Result<Vec<TodoWithOwner>, RepositoryError> {
        let rows: Vec<TodoWithOwnerRow> = sqlx::query_as(
            r"
            SELECT t.id, t.name, t.description, t.is_complete,
                   u.name AS owner_name, u.email AS owner_email,
                   t.created_at, t.updated_at
            FROM todos t
            LEFT JOIN users u ON u.id = t.user_id
            ORDER BY t.rowid
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TodoWithOwnerRow::into_todo).collect()
    }

    /// List the to-dos owned by one user, oldest first.
    ///
    /// An unknown `user` is not an error; the result is simply empty.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored id is invalid.
    pub async fn list_by_user(&self, user: UserId) -> Result<Vec<TodoWithOwner>, RepositoryError> {
        let rows: Vec<TodoWithOwnerRow> = sqlx::query_as(
            r"
            SELECT t.id, t.name, t.description, t.is_complete,
                   u.name AS owner_name, u.email AS owner_email,
                   t.created_at, t.updated_at
            FROM todos t
            LEFT JOIN users u ON u.id = t.user_id
            WHERE t.user_id = ?
            ORDER BY t.rowid
            ",
        )
        .bind(user.to_string())
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TodoWithOwnerRow::into_todo).collect()
    }

    /// Get a single to-do by id with its owner expanded.
    ///
    /// Returns `Ok(None)` if no record matches; absence is for the caller
    /// to interpret.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored id is invalid.
    pub async fn get_by_id(&self, id: TodoId) -> Result<Option<TodoWithOwner>, RepositoryError> {
        let row: Option<TodoWithOwnerRow> = sqlx::query_as(
            r"
            SELECT t.id, t.name, t.description, t.is_complete,
                   u.name AS owner_name, u.email AS owner_email,
                   t.created_at, t.updated_at
            FROM todos t
            LEFT JOIN users u ON u.id = t.user_id
            WHERE t.id = ?
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TodoWithOwnerRow::into_todo).transpose()
    }

    /// Apply a partial update and return the post-update record.
    ///
    /// Unset patch fields keep their stored value. Returns `Ok(None)` if no
    /// to-do matched `id`. When the patch moves the to-do to a different
    /// user, that user's existence is checked in the same transaction as the
    /// write; a patch without a `user` field never runs the check.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UserNotFound` if the patch names a user that
    /// does not exist; the stored record is left untouched.
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn update(
        &self,
        id: TodoId,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        if let Some(user) = patch.user
            && !owner_exists(&mut tx, user).await?
        {
            return Err(RepositoryError::UserNotFound);
        }

        let row: Option<TodoRow> = sqlx::query_as(
            r"
            UPDATE todos
            SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                is_complete = COALESCE(?, is_complete),
                user_id = COALESCE(?, user_id),
                updated_at = ?
            WHERE id = ?
            RETURNING id, name, description, is_complete, user_id, created_at, updated_at
            ",
        )
        .bind(patch.name)
        .bind(patch.description)
        .bind(patch.is_complete)
        .bind(patch.user.map(|u| u.to_string()))
        .bind(Utc::now())
        .bind(id.to_string())
        .fetch_optional(&mut *tx)
        .await?;

        tx.commit().await?;

        row.map(TodoRow::into_todo).transpose()
    }

    /// Delete a to-do by id, returning the deleted record or `None`.
    ///
    /// Deleting an absent id is not an error.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: TodoId) -> Result<Option<Todo>, RepositoryError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r"
            DELETE FROM todos
            WHERE id = ?
            RETURNING id, name, description, is_complete, user_id, created_at, updated_at
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(TodoRow::into_todo).transpose()
    }
}

/// Check whether a user row exists, on the caller's connection.
async fn owner_exists(conn: &mut SqliteConnection, user: UserId) -> Result<bool, RepositoryError> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE id = ?)")
        .bind(user.to_string())
        .fetch_one(conn)
        .await?;

    Ok(exists)
}
