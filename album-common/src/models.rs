//! Album record and the validated input types that produce it
//!
//! Request bodies never reach the store as loose documents. A create body is
//! parsed into [`AlbumDraft`] and yields a [`NewAlbum`]; an update body is
//! parsed into [`AlbumPatch`] and yields [`AlbumChanges`]. Both reject
//! unknown fields and only yield once every supplied field passes
//! validation.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Accepted release years, shared by the service and the clients
pub const YEAR_RANGE: RangeInclusive<i32> = 1900..=2100;

/// A persisted album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: Uuid,
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated album fields, ready to be written
///
/// Also the payload clients send for create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAlbum {
    pub title: String,
    pub artist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
}

impl NewAlbum {
    /// Trim and validate album fields
    ///
    /// # Examples
    ///
    /// ```
    /// use album_common::NewAlbum;
    ///
    /// let album = NewAlbum::new(" OK Computer ", "Radiohead", Some(1997)).unwrap();
    /// assert_eq!(album.title, "OK Computer");
    ///
    /// assert!(NewAlbum::new("", "Radiohead", None).is_err());
    /// assert!(NewAlbum::new("Kid A", "Radiohead", Some(1850)).is_err());
    /// ```
    pub fn new(
        title: impl Into<String>,
        artist: impl Into<String>,
        year: Option<i32>,
    ) -> Result<Self> {
        Ok(Self {
            title: required_text("title", title.into())?,
            artist: required_text("artist", artist.into())?,
            year: year.map(i64::from).map(check_year).transpose()?,
        })
    }
}

/// Year as it arrives on the wire: a JSON number or a numeric string
///
/// Form-driven clients post the raw input text, so `"1997"` is accepted the
/// same as `1997`, and an empty string means no year.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum YearValue {
    Number(serde_json::Number),
    Text(String),
}

impl YearValue {
    /// Resolve to a validated year, `None` for blank text
    pub fn resolve(&self) -> Result<Option<i32>> {
        let year = match self {
            YearValue::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::validation("year must be a whole number"))?,
            YearValue::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<i64>()
                    .map_err(|_| Error::validation(format!("year must be a number, got {:?}", s)))?
            }
        };
        check_year(year).map(Some)
    }
}

/// Create request body
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlbumDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub year: Option<YearValue>,
}

impl AlbumDraft {
    /// Validate a create body; `title` and `artist` are required
    pub fn validate(self) -> Result<NewAlbum> {
        let title = self
            .title
            .ok_or_else(|| Error::validation("title is required"))?;
        let artist = self
            .artist
            .ok_or_else(|| Error::validation("artist is required"))?;
        let year = match self.year {
            Some(year) => year.resolve()?,
            None => None,
        };
        NewAlbum::new(title, artist, year)
    }
}

/// Update request body: any subset of the album fields
///
/// The outer `Option` says whether the field was present at all; the inner
/// one carries an explicit JSON `null`. A null year clears the year, a null
/// title or artist is rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlbumPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub artist: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub year: Option<Option<YearValue>>,
}

impl AlbumPatch {
    /// Validate the supplied fields on their own
    ///
    /// Stored fields are already valid, so a patch whose supplied fields pass
    /// always merges into a valid album.
    ///
    /// # Examples
    ///
    /// ```
    /// use album_common::AlbumPatch;
    ///
    /// let patch: AlbumPatch = serde_json::from_str(r#"{"title": " Amnesiac ", "year": null}"#).unwrap();
    /// let changes = patch.validate().unwrap();
    ///
    /// assert_eq!(changes.title.as_deref(), Some("Amnesiac"));
    /// assert_eq!(changes.artist, None);
    /// assert_eq!(changes.year, Some(None));
    /// ```
    pub fn validate(self) -> Result<AlbumChanges> {
        let title = match self.title {
            None => None,
            Some(None) => return Err(Error::validation("title cannot be null")),
            Some(Some(title)) => Some(required_text("title", title)?),
        };
        let artist = match self.artist {
            None => None,
            Some(None) => return Err(Error::validation("artist cannot be null")),
            Some(Some(artist)) => Some(required_text("artist", artist)?),
        };
        let year = match self.year {
            None => None,
            Some(None) => Some(None),
            Some(Some(year)) => Some(year.resolve()?),
        };
        Ok(AlbumChanges {
            title,
            artist,
            year,
        })
    }
}

/// Validated update: `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlbumChanges {
    pub title: Option<String>,
    pub artist: Option<String>,
    /// `Some(None)` clears the year
    pub year: Option<Option<i32>>,
}

/// Update payload sent by clients that edit every field at once
///
/// Unlike [`NewAlbum`], a missing year is written as `"year": null` so the
/// service clears it instead of keeping the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlbumUpdate {
    pub title: String,
    pub artist: String,
    pub year: Option<i32>,
}

impl From<NewAlbum> for AlbumUpdate {
    fn from(album: NewAlbum) -> Self {
        Self {
            title: album.title,
            artist: album.artist,
            year: album.year,
        }
    }
}

/// Marks a field as present even when its value is `null`
fn present<'de, T, D>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required_text(field: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{} cannot be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn check_year(year: i64) -> Result<i32> {
    i32::try_from(year)
        .ok()
        .filter(|y| YEAR_RANGE.contains(y))
        .ok_or_else(|| {
            Error::validation(format!(
                "year must be between {} and {}",
                YEAR_RANGE.start(),
                YEAR_RANGE.end()
            ))
        })
}
