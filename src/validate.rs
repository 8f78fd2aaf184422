//! Input validation for translation requests
//!
//! Pure functions with no side effects. Failure messages name the exact
//! cause so callers can assert on them and operators can read them in logs.

use crate::error::{ServiceError, ServiceResult};
use crate::languages;

/// Maximum length of a single text, in characters, measured before trimming.
pub const MAX_TEXT_LENGTH: usize = 1000;

/// Maximum number of texts accepted in one bulk request.
pub const MAX_BULK_TEXTS: usize = 100;

/// Validate a single text for translation.
///
/// Fails when the text is empty, trims to empty, or exceeds
/// [`MAX_TEXT_LENGTH`] characters.
pub fn validate_text(text: &str) -> ServiceResult<()> {
    if text.is_empty() {
        return Err(ServiceError::Validation("Text cannot be empty".to_string()));
    }

    if text.trim().is_empty() {
        return Err(ServiceError::Validation(
            "Text cannot be empty or contain only whitespace".to_string(),
        ));
    }

    if text.chars().count() > MAX_TEXT_LENGTH {
        return Err(ServiceError::Validation(format!(
            "Text length cannot exceed {} characters",
            MAX_TEXT_LENGTH
        )));
    }

    Ok(())
}

/// Validate an ISO 639-1 language code against the registry.
///
/// Fails when the code is empty or, after lowercasing and trimming, is not
/// supported. The failure message enumerates all supported codes sorted
/// ascending.
pub fn validate_language_code(code: &str) -> ServiceResult<()> {
    if code.is_empty() {
        return Err(ServiceError::Validation(
            "Language code cannot be empty".to_string(),
        ));
    }

    let normalized = code.trim().to_lowercase();
    if !languages::is_supported(&normalized) {
        return Err(ServiceError::Validation(format!(
            "Unsupported language code '{}'. Supported codes: {}",
            normalized,
            languages::supported_codes_sorted().join(", ")
        )));
    }

    Ok(())
}

/// Validate a list of texts for bulk translation.
///
/// Fails when the list is empty, exceeds [`MAX_BULK_TEXTS`] items, or any
/// item fails [`validate_text`]; the message then names the zero-based index
/// of the first offending item.
pub fn validate_bulk_texts(texts: &[String]) -> ServiceResult<()> {
    if texts.is_empty() {
        return Err(ServiceError::Validation(
            "Texts list cannot be empty".to_string(),
        ));
    }

    if texts.len() > MAX_BULK_TEXTS {
        return Err(ServiceError::Validation(format!(
            "Cannot process more than {} texts at once",
            MAX_BULK_TEXTS
        )));
    }

    for (i, text) in texts.iter().enumerate() {
        if let Err(ServiceError::Validation(msg)) = validate_text(text) {
            return Err(ServiceError::Validation(format!(
                "Text at index {}: {}",
                i, msg
            )));
        }
    }

    Ok(())
}
