//! Album identifier helpers

use uuid::Uuid;

/// Generate a new album identifier (UUIDv4)
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse an album identifier taken from a URL path or a stored row.
///
/// Returns `None` for anything that is not a well-formed UUID, which callers
/// treat the same as an unknown album.
pub fn parse(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s.trim()).ok()
}
