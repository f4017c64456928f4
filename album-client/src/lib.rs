//! album-client - HTTP client for the album catalog
//!
//! The request/response contract every presentation layer shares:
//! - [`AlbumsClient`]: typed calls for the five CRUD endpoints
//! - [`AlbumForm`]: the single create/edit form with local validation
//! - [`CatalogSession`]: list state that re-fetches after every mutation

pub mod client;
pub mod error;
pub mod form;
pub mod session;

pub use client::{AlbumsClient, DEFAULT_API_URL};
pub use error::{ClientError, ClientResult};
pub use form::{normalize_year, AlbumForm};
pub use session::CatalogSession;
