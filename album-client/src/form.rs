//! The shared create/edit form
//!
//! Holds raw input text the way a UI form does and validates it locally
//! before anything is sent.

use album_common::{Album, NewAlbum, YEAR_RANGE};

use crate::{ClientError, ClientResult};

/// Raw form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumForm {
    pub title: String,
    pub artist: String,
    pub year: String,
}

impl AlbumForm {
    /// Prefill from an existing album for editing
    pub fn from_album(album: &Album) -> Self {
        Self {
            title: album.title.clone(),
            artist: album.artist.clone(),
            year: album.year.map(|y| y.to_string()).unwrap_or_default(),
        }
    }

    /// Store year input, keeping at most four digits
    pub fn set_year(&mut self, input: &str) {
        self.year = normalize_year(input);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validate the fields and build the request payload
    ///
    /// An empty year becomes `None`: omitted on create, sent as `null` on
    /// update by [`album_common::AlbumUpdate`].
    pub fn to_payload(&self) -> ClientResult<NewAlbum> {
        let title = self.title.trim();
        let artist = self.artist.trim();
        if title.is_empty() || artist.is_empty() {
            return Err(ClientError::Form(
                "Please enter an album title and artist.".to_string(),
            ));
        }

        let year = match self.year.trim() {
            "" => None,
            text => Some(
                text.parse::<i32>()
                    .ok()
                    .filter(|y| YEAR_RANGE.contains(y))
                    .ok_or_else(|| {
                        ClientError::Form(format!(
                            "Use a year between {} and {}.",
                            YEAR_RANGE.start(),
                            YEAR_RANGE.end()
                        ))
                    })?,
            ),
        };

        NewAlbum::new(title, artist, year).map_err(|e| ClientError::Form(e.to_string()))
    }
}

/// Keep only ASCII digits, at most four of them
///
/// # Examples
///
/// ```
/// use album_client::normalize_year;
///
/// assert_eq!(normalize_year("'97"), "97");
/// assert_eq!(normalize_year("1997-05-21"), "1997");
/// ```
pub fn normalize_year(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).take(4).collect()
}
