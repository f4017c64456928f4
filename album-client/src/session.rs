//! Catalog session: the client-side state behind a list screen
//!
//! The album list is a read-through cache of the last successful fetch. Every
//! mutation is followed by a fresh list request; nothing is patched locally.
//! A failed call records its message and leaves the list, the form and the
//! editing target as they were.

use album_common::{Album, AlbumUpdate};
use uuid::Uuid;

use crate::{AlbumForm, AlbumsClient, ClientResult};

/// List state plus the shared create/edit form
#[derive(Debug)]
pub struct CatalogSession {
    client: AlbumsClient,
    albums: Vec<Album>,
    editing: Option<Uuid>,
    last_error: Option<String>,
    /// Form contents; submitted by [`CatalogSession::submit`]
    pub form: AlbumForm,
}

impl CatalogSession {
    pub fn new(client: AlbumsClient) -> Self {
        Self {
            client,
            albums: Vec::new(),
            editing: None,
            last_error: None,
            form: AlbumForm::default(),
        }
    }

    pub fn client(&self) -> &AlbumsClient {
        &self.client
    }

    /// Albums from the last successful fetch
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    /// Album the form is currently editing, if any
    pub fn editing(&self) -> Option<Uuid> {
        self.editing
    }

    /// Message of the most recent failure, cleared by the next success
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Re-fetch the album list
    pub async fn refresh(&mut self) -> ClientResult<&[Album]> {
        let result = self.client.list_albums().await;
        let albums = self.record(result)?;
        self.albums = albums;
        Ok(&self.albums)
    }

    /// Load an album into the form and target it for update
    pub async fn begin_edit(&mut self, id: Uuid) -> ClientResult<()> {
        let result = self.client.get_album(id).await;
        let album = self.record(result)?;
        self.form = AlbumForm::from_album(&album);
        self.editing = Some(album.id);
        Ok(())
    }

    /// Leave edit mode and clear the form
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.form.clear();
    }

    /// Create or update from the form, then re-fetch the list
    ///
    /// The form is validated locally first; nothing is sent if it fails.
    pub async fn submit(&mut self) -> ClientResult<Album> {
        let payload = self.form.to_payload();
        let payload = self.record(payload)?;

        let result = match self.editing {
            Some(id) => {
                self.client
                    .update_album(id, &AlbumUpdate::from(payload))
                    .await
            }
            None => self.client.create_album(&payload).await,
        };
        let saved = self.record(result)?;
        tracing::info!(album_id = %saved.id, "Album saved");

        self.cancel_edit();
        self.refresh().await?;
        Ok(saved)
    }

    /// Delete an album, then re-fetch the list
    ///
    /// Confirmation is the caller's job.
    pub async fn delete(&mut self, id: Uuid) -> ClientResult<()> {
        let result = self.client.delete_album(id).await;
        self.record(result)?;
        tracing::info!(album_id = %id, "Album deleted");

        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.refresh().await?;
        Ok(())
    }

    fn record<T>(&mut self, result: ClientResult<T>) -> ClientResult<T> {
        match &result {
            Ok(_) => self.last_error = None,
            Err(e) => self.last_error = Some(e.to_string()),
        }
        result
    }
}
