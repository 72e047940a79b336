//! sqlx implementation of the [`UserStore`] capability.

use async_trait::async_trait;
use staffdir_core::error::DirectoryError;
use staffdir_core::store::UserStore;
use staffdir_core::types::DbId;
use staffdir_core::user::{NewUser, User, UserPatch};

use crate::models::UserRow;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = r#"id, name, email, "group", created_at"#;

/// Postgres-backed user store.
///
/// Email uniqueness rides on the table's unique constraint, so the check
/// and the write it guards are one atomic statement.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, input: &NewUser) -> Result<User, DirectoryError> {
        let query = format!(
            r#"INSERT INTO users (name, email, "group") VALUES ($1, $2, $3) RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.group)
            .fetch_one(&self.pool)
            .await
            .map(User::from)
            .map_err(map_sqlx_error)
    }

    async fn get(&self, id: DbId) -> Result<User, DirectoryError> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(User::from)
            .ok_or(DirectoryError::NotFound(id))
    }

    async fn update(&self, id: DbId, patch: &UserPatch) -> Result<User, DirectoryError> {
        // `group` needs a supplied-flag ($4) because an explicit null must
        // clear the column, which COALESCE cannot express.
        let query = format!(
            r#"UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                "group" = CASE WHEN $4 THEN $5 ELSE "group" END
             WHERE id = $1
             RETURNING {COLUMNS}"#
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(&patch.name)
            .bind(&patch.email)
            .bind(patch.group.is_some())
            .bind(patch.group.as_ref().and_then(|g| g.as_deref()))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .map(User::from)
            .ok_or(DirectoryError::NotFound(id))
    }

    async fn list(&self) -> Result<Vec<User>, DirectoryError> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map(|rows| rows.into_iter().map(User::from).collect())
            .map_err(map_sqlx_error)
    }

    async fn distinct_groups(&self) -> Result<Vec<String>, DirectoryError> {
        sqlx::query_scalar::<_, String>(
            r#"SELECT DISTINCT "group" FROM users WHERE "group" IS NOT NULL ORDER BY "group""#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx_error)
    }
}

/// Map a sqlx error onto the domain taxonomy.
///
/// A unique violation (PostgreSQL error code 23505) on the email
/// constraint becomes [`DirectoryError::DuplicateEmail`]; everything else
/// is an opaque storage failure whose detail is logged, not surfaced.
fn map_sqlx_error(err: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("users_email_key")
        {
            return DirectoryError::DuplicateEmail;
        }
    }
    tracing::error!(error = %err, "database error");
    DirectoryError::Storage(err.to_string())
}
