use url::Url;

use crate::error::ValidationError;

/// Check that `raw` is an absolute http(s) URL with a host.
///
/// Returns the normalized serialization, which is also the cache key.
pub fn validate_url(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Missing);
    }

    let parsed = Url::parse(trimmed).map_err(|_| ValidationError::InvalidUrl(trimmed.to_string()))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(ValidationError::InvalidUrl(trimmed.to_string()));
    }
    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(ValidationError::InvalidUrl(trimmed.to_string())),
    }

    Ok(parsed.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_https_url() {
        assert_eq!(
            validate_url("https://example.com/a").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn trims_and_normalizes() {
        assert_eq!(
            validate_url("  http://Example.COM  ").unwrap(),
            "http://example.com/"
        );
    }

    #[test]
    fn empty_is_missing() {
        assert_eq!(validate_url(""), Err(ValidationError::Missing));
        assert_eq!(validate_url("   "), Err(ValidationError::Missing));
    }

    #[test]
    fn rejects_garbage() {
        for input in ["not a url", "example.com", "/relative/path", "http://", "https:// spaces.com"] {
            assert!(
                matches!(validate_url(input), Err(ValidationError::InvalidUrl(_))),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_http_schemes() {
        for input in ["ftp://example.com/file", "mailto:someone@example.com", "file:///etc/passwd"] {
            assert!(
                matches!(validate_url(input), Err(ValidationError::InvalidUrl(_))),
                "expected {input:?} to be rejected"
            );
        }
    }
}
