//! Album CRUD endpoints
//!
//! | Method | Path              | Success               |
//! |--------|-------------------|-----------------------|
//! | POST   | /api/albums       | 201 + created album   |
//! | GET    | /api/albums       | 200 + all albums      |
//! | GET    | /api/albums/:id   | 200 + album           |
//! | PUT    | /api/albums/:id   | 200 + updated album   |
//! | DELETE | /api/albums/:id   | 200 + confirmation    |

use album_common::api::{MessageResponse, ALBUMS_PATH};
use album_common::{uuid_utils, Album, AlbumDraft, AlbumPatch};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;
use uuid::Uuid;

use crate::db;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// POST /api/albums
pub async fn create_album(
    State(state): State<AppState>,
    payload: Result<Json<AlbumDraft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    let Json(draft) = payload?;
    let album = draft.validate()?;

    let created = db::insert_album(&state.db, &album).await?;
    info!(album_id = %created.id, title = %created.title, "Album created");

    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/albums
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<Json<Vec<Album>>> {
    Ok(Json(db::list_albums(&state.db).await?))
}

/// GET /api/albums/:id
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Album>> {
    let id = parse_id(&id)?;
    Ok(Json(db::find_album(&state.db, id).await?))
}

/// PUT /api/albums/:id
///
/// An unknown id answers 404 even when the body is unreadable.
pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<AlbumPatch>, JsonRejection>,
) -> ApiResult<Json<Album>> {
    let id = parse_id(&id)?;

    let patch = match payload {
        Ok(Json(patch)) => patch,
        Err(rejection) => {
            db::find_album(&state.db, id).await?;
            return Err(rejection.into());
        }
    };

    let updated = db::update_album(&state.db, id, patch).await?;
    info!(album_id = %updated.id, "Album updated");

    Ok(Json(updated))
}

/// DELETE /api/albums/:id
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let id = parse_id(&id)?;

    db::delete_album(&state.db, id).await?;
    info!(album_id = %id, "Album deleted");

    Ok(Json(MessageResponse::deleted()))
}

/// Identifiers that are not UUIDs cannot name an album
fn parse_id(raw: &str) -> ApiResult<Uuid> {
    uuid_utils::parse(raw).ok_or(ApiError::NotFound)
}

/// Build album CRUD routes
pub fn album_routes() -> Router<AppState> {
    Router::new()
        .route(ALBUMS_PATH, get(list_albums).post(create_album))
        .route(
            &format!("{}/:id", ALBUMS_PATH),
            get(get_album).put(update_album).delete(delete_album),
        )
}
