//! User domain model.

use serde::Serialize;
use tangelo_core::UserId;

/// A user account.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

/// Restricted owner projection embedded in expanded to-do reads.
///
/// Carries only the public display fields; the owner's ID is already present
/// on the to-do itself as the raw reference.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}
