//! Input checks that run before any cache or backing-store access.

use crate::error::ValidationError;

/// Maximum key length in characters
pub const MAX_KEY_LENGTH: usize = 255;

/// Maximum title length in characters
pub const MAX_TITLE_LENGTH: usize = 500;

/// Largest page size a caller may request
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Keys are 1..=255 characters of `[a-z0-9_-]`.
pub fn validate_key(key: &str) -> Result<(), ValidationError> {
    let valid_chars = key
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');

    if key.is_empty() || key.len() > MAX_KEY_LENGTH || !valid_chars {
        return Err(ValidationError::InvalidKey);
    }
    Ok(())
}

pub fn validate_record(key: &str, title: &str, body: &str) -> Result<(), ValidationError> {
    validate_key(key)?;

    if title.is_empty() || title.chars().count() > MAX_TITLE_LENGTH {
        return Err(ValidationError::InvalidTitle);
    }
    if body.is_empty() {
        return Err(ValidationError::InvalidContent);
    }
    Ok(())
}

/// Checks `page >= 1` and `1 <= limit <= 100`.
///
/// Any positive page is accepted; pages past the end are simply empty.
pub fn validate_pagination(page: i64, limit: i64) -> Result<(u64, u32), ValidationError> {
    if page < 1 || !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(ValidationError::InvalidPagination);
    }
    Ok((page as u64, limit as u32))
}
