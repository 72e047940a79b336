use crate::types::DbId;

/// Domain-level error taxonomy.
///
/// Every failure a storage backend or a validated request can produce maps
/// onto one of these variants; the api crate translates them into HTTP
/// status codes and machine-readable error codes.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("User with id {0} not found")]
    NotFound(DbId),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Email is already in use")]
    DuplicateEmail,

    #[error("Patch contains no fields")]
    EmptyPatch,

    #[error("Storage error: {0}")]
    Storage(String),
}
