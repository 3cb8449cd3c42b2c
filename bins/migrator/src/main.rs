//! Database migration runner for Merchcoin.
//!
//! Usage:
//!   migrator up      - Run all pending migrations (default)
//!   migrator down    - Roll back the last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations
//!
//! The database URL is read from `MERCHCOIN__DATABASE__URL`, falling back to
//! `DATABASE_URL`.

use anyhow::{Context, bail};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use merchcoin_db::{connect, migration::Migrator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sqlx=warn".into()),
        )
        .init();

    let url = std::env::var("MERCHCOIN__DATABASE__URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .context("Set MERCHCOIN__DATABASE__URL or DATABASE_URL")?;
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let db = connect(&url).await.context("Failed to connect to database")?;

    match command.as_str() {
        "up" => Migrator::up(&db, None).await?,
        "down" => Migrator::down(&db, Some(1)).await?,
        "status" => Migrator::status(&db).await?,
        "fresh" => Migrator::fresh(&db).await?,
        other => bail!("Unknown command {other:?}; expected up, down, status, or fresh"),
    }

    info!(command = %command, "Migration command finished");
    Ok(())
}
