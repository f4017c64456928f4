//! HTTP API handlers for the album service

pub mod albums;
pub mod health;

pub use albums::album_routes;
pub use health::{health_routes, not_found};
