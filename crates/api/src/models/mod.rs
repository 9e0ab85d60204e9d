//! Domain models for the api.
//!
//! These types represent validated domain objects separate from database row
//! types; the `db` module converts rows into them at the repository boundary.

pub mod todo;
pub mod user;

pub use todo::{NewTodo, Todo, TodoPatch, TodoWithOwner};
pub use user::{User, UserSummary};
