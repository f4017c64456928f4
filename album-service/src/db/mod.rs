//! Album store: SQLite persistence for album records

use album_common::config::sqlite_file_path;
use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

pub mod albums;

pub use albums::{delete_album, find_album, insert_album, list_albums, update_album};

/// Open the store and create the albums table if needed
///
/// Creates the parent directory of a file-backed database.
pub async fn init_database_pool(database_url: &str) -> Result<SqlitePool> {
    if let Some(parent) = sqlite_file_path(database_url)
        .as_deref()
        .and_then(|p| p.parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create database directory {}", parent.display()))?;
    }

    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    create_albums_table(&pool).await?;
    info!("Database tables initialized (albums)");

    Ok(pool)
}

/// Create the albums table (idempotent)
pub async fn create_albums_table(pool: &SqlitePool) -> album_common::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS albums (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            artist TEXT NOT NULL CHECK (length(trim(artist)) > 0),
            year INTEGER CHECK (year IS NULL OR year BETWEEN 1900 AND 2100),
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
