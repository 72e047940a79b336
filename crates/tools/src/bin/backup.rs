//! Export every user row, ordered by id, to a JSON document.
//!
//! Usage: `backup [FILE]` (default `backup.json`). Reads `DATABASE_URL`
//! from the environment or a `.env` file.

use anyhow::Context;
use staffdir_core::store::UserStore;
use staffdir_db::PgStore;
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

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "backup.json".to_string());
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = staffdir_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;
    let store = PgStore::new(pool);

    let rows = store.list().await?;
    let document = serde_json::to_string_pretty(&rows)?;
    tokio::fs::write(&out, document)
        .await
        .with_context(|| format!("Failed to write {out}"))?;

    tracing::info!(file = %out, count = rows.len(), "Backup written");
    Ok(())
}
