//! The storage capability consumed by the listing engine and HTTP handlers.

use async_trait::async_trait;

use crate::error::DirectoryError;
use crate::types::DbId;
use crate::user::{NewUser, User, UserPatch};

/// Durable storage for user records.
///
/// Implementations must enforce email uniqueness atomically with the
/// insert or update it guards: a concurrent reader never observes a
/// half-applied write that violates the constraint.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a validated user, assigning `id` and `created_at`.
    ///
    /// Fails with [`DirectoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn create(&self, input: &NewUser) -> Result<User, DirectoryError>;

    /// Fetch a user by id, or [`DirectoryError::NotFound`].
    async fn get(&self, id: DbId) -> Result<User, DirectoryError>;

    /// Apply a partial update; only supplied fields change.
    ///
    /// Fails with [`DirectoryError::NotFound`] for an unknown id and
    /// [`DirectoryError::DuplicateEmail`] when the new email collides
    /// with a different record.
    async fn update(&self, id: DbId, patch: &UserPatch) -> Result<User, DirectoryError>;

    /// All users in insertion (id) order. Consumed by the listing engine,
    /// never exposed directly.
    async fn list(&self) -> Result<Vec<User>, DirectoryError>;

    /// Sorted distinct non-null group names.
    async fn distinct_groups(&self) -> Result<Vec<String>, DirectoryError>;
}
