//! Album service HTTP client
//!
//! Thin typed wrapper over the `/albums` endpoints. Every response goes
//! through [`handle_response`], which turns non-2xx answers into
//! [`ClientError::Api`] carrying the server's message.

use album_common::api::{HealthResponse, MessageResponse};
use album_common::{Album, AlbumUpdate, NewAlbum};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::{ClientError, ClientResult};

/// Base URL of a locally running service
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000/api";

const USER_AGENT: &str = concat!("album-client/", env!("CARGO_PKG_VERSION"));

/// Album service client
#[derive(Debug, Clone)]
pub struct AlbumsClient {
    http: reqwest::Client,
    api_url: String,
}

impl AlbumsClient {
    /// Create a client for the API rooted at `api_url` (e.g. `http://host:5000/api`)
    pub fn new(api_url: impl Into<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn albums_url(&self) -> String {
        format!("{}/albums", self.api_url)
    }

    fn album_url(&self, id: Uuid) -> String {
        format!("{}/albums/{}", self.api_url, id)
    }

    /// GET /albums
    pub async fn list_albums(&self) -> ClientResult<Vec<Album>> {
        tracing::debug!("Fetching album list");
        let response = self.http.get(self.albums_url()).send().await?;
        handle_response(response).await
    }

    /// GET /albums/:id
    pub async fn get_album(&self, id: Uuid) -> ClientResult<Album> {
        tracing::debug!(%id, "Fetching album");
        let response = self.http.get(self.album_url(id)).send().await?;
        handle_response(response).await
    }

    /// POST /albums
    pub async fn create_album(&self, album: &NewAlbum) -> ClientResult<Album> {
        tracing::debug!(title = %album.title, "Creating album");
        let response = self.http.post(self.albums_url()).json(album).send().await?;
        handle_response(response).await
    }

    /// PUT /albums/:id
    ///
    /// Sends every field; a `None` year goes out as `null` and clears it.
    pub async fn update_album(&self, id: Uuid, album: &AlbumUpdate) -> ClientResult<Album> {
        tracing::debug!(%id, "Updating album");
        let response = self.http.put(self.album_url(id)).json(album).send().await?;
        handle_response(response).await
    }

    /// DELETE /albums/:id
    pub async fn delete_album(&self, id: Uuid) -> ClientResult<MessageResponse> {
        tracing::debug!(%id, "Deleting album");
        let response = self.http.delete(self.album_url(id)).send().await?;
        handle_response(response).await
    }

    /// GET /health
    pub async fn health(&self) -> ClientResult<HealthResponse> {
        let response = self
            .http
            .get(format!("{}/health", self.api_url))
            .send()
            .await?;
        handle_response(response).await
    }
}

/// Read the body once; decode it on success, extract a message on failure
async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        let message = error_message(status, &text);
        tracing::warn!(status = status.as_u16(), "Request failed: {}", message);
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    serde_json::from_str(&text).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Message for a failed request
///
/// Prefers the body's `error` field, then `message`, then the raw body text,
/// then a generic line naming the status.
pub fn error_message(status: StatusCode, text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| {
            ["error", "message"]
                .iter()
                .find_map(|key| body.get(key).and_then(Value::as_str).map(str::to_string))
        })
        .filter(|message| !message.is_empty())
        .or_else(|| Some(text.trim().to_string()).filter(|t| !t.is_empty()))
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()))
}
