//! Album database operations
//!
//! Concurrent writers to the same album race with last-write-wins semantics;
//! there is no version column.

use album_common::{uuid_utils, Album, AlbumPatch, Error, NewAlbum, Result};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteExecutor, SqlitePool};
use uuid::Uuid;

const SELECT_ALBUM: &str = r#"
    SELECT id, title, artist, year, created_at, updated_at
    FROM albums
"#;

/// Insert a validated album and return it with its generated id
pub async fn insert_album(pool: &SqlitePool, album: &NewAlbum) -> Result<Album> {
    let now = Utc::now();
    let stored = Album {
        id: uuid_utils::generate(),
        title: album.title.clone(),
        artist: album.artist.clone(),
        year: album.year,
        created_at: now,
        updated_at: now,
    };

    sqlx::query(
        r#"
        INSERT INTO albums (id, title, artist, year, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(stored.id.to_string())
    .bind(&stored.title)
    .bind(&stored.artist)
    .bind(stored.year)
    .bind(stored.created_at)
    .bind(stored.updated_at)
    .execute(pool)
    .await?;

    Ok(stored)
}

/// Load every album, oldest first
pub async fn list_albums(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!("{} ORDER BY rowid ASC", SELECT_ALBUM))
        .fetch_all(pool)
        .await?;

    rows.iter().map(album_from_row).collect()
}

/// Load one album
pub async fn find_album(pool: &SqlitePool, id: Uuid) -> Result<Album> {
    fetch_album(pool, id)
        .await?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

/// Apply `patch` to the stored album and return the result
///
/// The merge runs inside a single `UPDATE ... RETURNING`, so the write lock is
/// taken up front and concurrent writers wait on the busy timeout instead of
/// failing. A concurrent delete yields `NotFound` rather than resurrecting
/// the row. An unknown id is `NotFound` even when the patch is invalid.
pub async fn update_album(pool: &SqlitePool, id: Uuid, patch: AlbumPatch) -> Result<Album> {
    let changes = match patch.validate() {
        Ok(changes) => changes,
        Err(e) => {
            find_album(pool, id).await?;
            return Err(e);
        }
    };

    let row = sqlx::query(
        r#"
        UPDATE albums
        SET title = COALESCE(?, title),
            artist = COALESCE(?, artist),
            year = CASE WHEN ? THEN ? ELSE year END,
            updated_at = ?
        WHERE id = ?
        RETURNING id, title, artist, year, created_at, updated_at
        "#,
    )
    .bind(changes.title)
    .bind(changes.artist)
    .bind(changes.year.is_some())
    .bind(changes.year.flatten())
    .bind(Utc::now())
    .bind(id.to_string())
    .fetch_optional(pool)
    .await?;

    row.as_ref()
        .map(album_from_row)
        .transpose()?
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

/// Remove an album
pub async fn delete_album(pool: &SqlitePool, id: Uuid) -> Result<()> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id.to_string())
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(id.to_string()));
    }

    Ok(())
}

async fn fetch_album<'e, E>(executor: E, id: Uuid) -> Result<Option<Album>>
where
    E: SqliteExecutor<'e>,
{
    let row = sqlx::query(&format!("{} WHERE id = ?", SELECT_ALBUM))
        .bind(id.to_string())
        .fetch_optional(executor)
        .await?;

    row.as_ref().map(album_from_row).transpose()
}

fn album_from_row(row: &SqliteRow) -> Result<Album> {
    let id: String = row.try_get("id")?;
    let id = uuid_utils::parse(&id).ok_or_else(|| {
        Error::Database(sqlx::Error::Decode(
            format!("stored album has malformed id: {}", id).into(),
        ))
    })?;

    Ok(Album {
        id,
        title: row.try_get("title")?,
        artist: row.try_get("artist")?,
        year: row.try_get("year")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}
