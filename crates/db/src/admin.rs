//! Bulk operations used by the backup / restore / seed tools.
//!
//! These bypass the [`UserStore`](staffdir_core::store::UserStore)
//! capability on purpose: they write explicit ids and need
//! ignore-on-duplicate semantics that the request path must never have.

use serde::{Deserialize, Serialize};
use staffdir_core::types::{DbId, Timestamp};

use crate::DbPool;

/// One row of a backup document.
///
/// `created_at` is optional so hand-edited documents can omit it; restore
/// keeps the original timestamp when present and stamps `now()` otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupUser {
    pub id: DbId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub group: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

/// Upsert rows by id inside a single transaction, then realign the id
/// sequence so subsequent inserts continue past the highest restored id.
pub async fn restore_users(pool: &DbPool, rows: &[BackupUser]) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for row in rows {
        sqlx::query(
            r#"INSERT INTO users (id, name, email, "group", created_at)
               VALUES ($1, $2, $3, $4, COALESCE($5, now()))
               ON CONFLICT (id) DO UPDATE SET
                 name = excluded.name,
                 email = excluded.email,
                 "group" = excluded."group""#,
        )
        .bind(row.id)
        .bind(&row.name)
        .bind(&row.email)
        .bind(&row.group)
        .bind(row.created_at)
        .execute(&mut *tx)
        .await?;
    }
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('users', 'id'), \
         GREATEST((SELECT COALESCE(MAX(id), 1) FROM users), 1))",
    )
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}

/// Insert one user, ignoring an email collision. Returns whether a row
/// actually landed.
pub async fn insert_ignore_duplicate(
    pool: &DbPool,
    name: &str,
    email: &str,
    group: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"INSERT INTO users (name, email, "group") VALUES ($1, $2, $3)
           ON CONFLICT (email) DO NOTHING"#,
    )
    .bind(name)
    .bind(email)
    .bind(group)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Delete every user row (`seed --reset`). Returns the number removed.
pub async fn delete_all_users(pool: &DbPool) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Total number of user rows.
pub async fn count_users(pool: &DbPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
