//! User repository for database operations.

use sqlx::SqlitePool;

use tangelo_core::UserId;

use super::RepositoryError;
use crate::models::User;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
}

impl UserRow {
    fn into_user(self) -> Result<User, RepositoryError> {
        let id = self.id.parse::<UserId>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid user id in database: {e}"))
        })?;

        Ok(User {
            id,
            name: self.name,
            email: self.email,
        })
    }
}

/// Repository for user database operations.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every user, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored id is invalid.
    pub async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        let rows: Vec<UserRow> = sqlx::query_as(
            r"
            SELECT id, name, email
            FROM users
            ORDER BY rowid
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    /// Insert a new user with a generated id and return it.
    ///
    /// Duplicate emails are allowed; there is no uniqueness constraint.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str, email: &str) -> Result<User, RepositoryError> {
        let id = UserId::generate();

        sqlx::query(
            r"
            INSERT INTO users (id, name, email)
            VALUES (?, ?, ?)
            ",
        )
        .bind(id.to_string())
        .bind(name)
        .bind(email)
        .execute(self.pool)
        .await?;

        Ok(User {
            id,
            name: name.to_owned(),
            email: email.to_owned(),
        })
    }

    /// Delete a user by id and return the deleted record.
    ///
    /// Dependent to-dos are left in place; their owner reference dangles
    /// from this point on.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UserNotFound` if no row matched.
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: UserId) -> Result<User, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            r"
            DELETE FROM users
            WHERE id = ?
            RETURNING id, name, email
            ",
        )
        .bind(id.to_string())
        .fetch_optional(self.pool)
        .await?;

        match row {
            Some(row) => row.into_user(),
            None => Err(RepositoryError::UserNotFound),
        }
    }
}
