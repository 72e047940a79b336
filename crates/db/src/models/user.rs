//! sqlx row model bridging the `users` table and the domain [`User`].

use sqlx::FromRow;
use staffdir_core::types::{DbId, Timestamp};
use staffdir_core::user::User;

/// A `users` row as fetched by sqlx.
///
/// Kept separate from the domain type so `staffdir-core` stays free of
/// database dependencies.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub group: Option<String>,
    pub created_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            group: row.group,
            created_at: row.created_at,
        }
    }
}
