//! SQL DDL for initializing the database schema.

/// SQLite schema includes:
/// - `users` table (accounts referenced by to-dos)
/// - `todos` table (to-do items; `user_id` is a plain reference, not a
///   foreign key, so deleting a user leaves dependent rows in place)
pub const SQLITE_INIT: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    email TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS todos (
    id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    description TEXT NULL,
    is_complete INTEGER NOT NULL DEFAULT 0,
    user_id TEXT NOT NULL, -- plain reference, user deletes never cascade here
    created_at TEXT NOT NULL, -- RFC3339
    updated_at TEXT NOT NULL -- RFC3339
);

CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos(user_id);
";
