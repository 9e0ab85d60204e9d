//! To-do domain model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tangelo_core::{TodoId, UserId};

use super::user::UserSummary;

/// A to-do item with its owner as a raw reference.
#[derive(Debug, Clone, Serialize)]
pub struct Todo {
    /// Unique to-do ID.
    pub id: TodoId,
    /// Short title.
    pub name: String,
    /// Optional free-form details.
    pub description: Option<String>,
    /// Completion flag; new items start out incomplete.
    pub is_complete: bool,
    /// ID of the owning user.
    pub user: UserId,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// A to-do item with its owner expanded to a [`UserSummary`].
///
/// `user` is `None` when the stored reference no longer resolves, which
/// happens after the owning user has been deleted.
#[derive(Debug, Clone, Serialize)]
pub struct TodoWithOwner {
    /// Unique to-do ID.
    pub id: TodoId,
    /// Short title.
    pub name: String,
    /// Optional free-form details.
    pub description: Option<String>,
    /// Completion flag.
    pub is_complete: bool,
    /// Owner projection, or `None` for a dangling reference.
    pub user: Option<UserSummary>,
    /// Creation time.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for inserting a new to-do.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub name: String,
    pub description: Option<String>,
    pub is_complete: bool,
    pub user: UserId,
}

/// Partial update for a to-do. `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_complete: Option<bool>,
    pub user: Option<UserId>,
}
