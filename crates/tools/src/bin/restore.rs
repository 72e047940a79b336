//! Upsert users by id from a backup document.
//!
//! Usage: `restore [FILE]` (default `backup.json`). All rows land in one
//! transaction; existing ids are updated in place, missing timestamps are
//! stamped with now(), and the id sequence is realigned afterwards.

use anyhow::Context;
use staffdir_db::admin::{self, BackupUser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "backup.json".to_string());
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {file}"))?;
    let rows: Vec<BackupUser> =
        serde_json::from_str(&text).with_context(|| format!("{file} is not a backup document"))?;

    let pool = staffdir_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    admin::restore_users(&pool, &rows)
        .await
        .context("Restore transaction failed")?;

    tracing::info!(file = %file, count = rows.len(), "Restore complete");
    Ok(())
}
