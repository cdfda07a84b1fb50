//! Custom short-URL alias validation.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;

use crate::error::AppError;

static ALIAS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]+$").expect("alias pattern is valid"));

/// Validates a user-chosen alias for the short URL.
///
/// An empty alias is valid and means "let the server choose". A non-empty
/// alias must be purely alphanumeric; the server enforces uniqueness.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for non-alphanumeric aliases.
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() {
        return Ok(());
    }

    if !ALIAS_RE.is_match(alias) {
        return Err(AppError::bad_request(
            "Custom short URL can only contain letters and digits",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
