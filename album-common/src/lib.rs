//! # Album Catalog Common Library
//!
//! Shared code for the album service and its clients:
//! - Album record types and field validation
//! - API request/response types
//! - Configuration loading
//! - Error taxonomy

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod uuid_utils;

pub use error::{Error, Result};
pub use models::{
    Album, AlbumChanges, AlbumDraft, AlbumPatch, AlbumUpdate, NewAlbum, YearValue, YEAR_RANGE,
};
