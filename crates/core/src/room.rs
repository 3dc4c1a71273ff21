//! Room identity rules.
//!
//! A room is addressed by its slug everywhere (HTTP paths, socket events),
//! so the slug is validated once at creation and never changes afterwards.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Minimum slug length in characters.
pub const MIN_SLUG_LENGTH: usize = 3;

/// Maximum slug length in characters.
pub const MAX_SLUG_LENGTH: usize = 64;

/// Maximum display-name length in characters.
pub const MAX_ROOM_NAME_LENGTH: usize = 200;

/// Lowercase ASCII words separated by single hyphens.
pub const SLUG_PATTERN: &str = r"^[a-z0-9]+(-[a-z0-9]+)*$";

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(SLUG_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a room slug against [`SLUG_PATTERN`] and the length limits.
pub fn validate_slug(slug: &str) -> Result<(), CoreError> {
    if slug.len() < MIN_SLUG_LENGTH || slug.len() > MAX_SLUG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Room slug must be between {MIN_SLUG_LENGTH} and {MAX_SLUG_LENGTH} characters, got {}",
            slug.len()
        )));
    }
    if !SLUG_RE.is_match(slug) {
        return Err(CoreError::Validation(format!(
            "Room slug '{slug}' may only contain lowercase letters, digits and single hyphens"
        )));
    }
    Ok(())
}

/// Validate a room display name: non-blank and within [`MAX_ROOM_NAME_LENGTH`].
pub fn validate_room_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Room name must not be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_ROOM_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Room name must not exceed {MAX_ROOM_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}
