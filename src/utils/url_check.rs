//! Destination URL sanity checks.

use serde_json::json;
use url::Url;

use crate::error::AppError;

/// Validates the destination URL of a draft before it is sent anywhere.
///
/// Only absolute `http`/`https` URLs are accepted; anything else is the kind
/// of input the share sheet occasionally hands over and the server would
/// reject anyway.
pub fn validate_original_url(raw: &str) -> Result<(), AppError> {
    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request(
            "Original URL is not a valid URL",
            json!({ "url": raw, "reason": e.to_string() }),
        )
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(AppError::bad_request(
            "Original URL must use http or https",
            json!({ "url": raw, "scheme": parsed.scheme() }),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_https_url_passes() {
        assert!(validate_original_url("https://example.com/path?q=1").is_ok());
    }

    #[test]
    fn test_http_url_passes() {
        assert!(validate_original_url("http://example.com").is_ok());
    }

    #[test]
    fn test_relative_url_fails() {
        assert!(validate_original_url("example.com/page").is_err());
    }

    #[test]
    fn test_other_schemes_fail() {
        assert!(validate_original_url("ftp://example.com").is_err());
        assert!(validate_original_url("javascript:alert(1)").is_err());
    }
}
