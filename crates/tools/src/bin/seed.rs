//! Bulk-insert users from a JSON array of `{name, email, group}` records
//! with ignore-on-duplicate semantics.
//!
//! Usage: `seed [FILE] [--reset]` (default `seed.json`). Records with a
//! blank name or email are skipped, an empty group becomes null, and
//! `--reset` empties the table first.

use anyhow::Context;
use serde::Deserialize;
use staffdir_db::admin;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// One record of a seed document.
#[derive(Debug, Deserialize)]
struct SeedUser {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    group: Option<String>,
}

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

    let args: Vec<String> = std::env::args().skip(1).collect();
    let reset = args.iter().any(|a| a == "--reset");
    let file = args
        .iter()
        .find(|a| !a.starts_with("--"))
        .cloned()
        .unwrap_or_else(|| "seed.json".to_string());

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let text = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {file}"))?;
    let records: Vec<SeedUser> = serde_json::from_str(&text)
        .with_context(|| format!("{file} must be an array of {{name, email, group}} records"))?;

    let pool = staffdir_db::create_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    if reset {
        let removed = admin::delete_all_users(&pool).await?;
        tracing::info!(removed, "Existing rows deleted");
    }

    let mut inserted = 0usize;
    let mut skipped = 0usize;
    for record in &records {
        let name = record.name.trim();
        let email = record.email.trim();
        if name.is_empty() || email.is_empty() {
            skipped += 1;
            continue;
        }
        let group = record
            .group
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty());

        if admin::insert_ignore_duplicate(&pool, name, email, group).await? {
            inserted += 1;
        } else {
            skipped += 1;
        }
    }

    let total = admin::count_users(&pool).await?;
    tracing::info!(inserted, skipped, total, "Seed complete");
    Ok(())
}
