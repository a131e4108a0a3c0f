//! Database access layer for bundle-board
//!
//! One SQLite file holds two tables, `cards` (active board) and `archive`,
//! each mapping a trip id to the card's JSON document.

use bundle_common::Result;
use sqlx::SqlitePool;
use std::path::Path;
use tracing::info;

pub mod cards;
pub use cards::CardStore;

/// Connect to the board database, creating the file and its parent folder
/// on first start.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // mode=rwc: read-write, create if missing
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Create the active and archive card tables if missing. Idempotent.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS cards (
            trip_id TEXT PRIMARY KEY,
            data TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS archive (
            trip_id TEXT PRIMARY KEY,
            data TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema ready");
    Ok(())
}

/// In-memory database for unit tests. Single connection so every query
/// sees the same :memory: instance.
#[cfg(test)]
pub(crate) async fn memory_pool() -> SqlitePool {
    use sqlx::sqlite::SqlitePoolOptions;

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    init_schema(&pool).await.unwrap();
    pool
}
