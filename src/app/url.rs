//! URL validation and normalization for the input form.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a user-entered URL.
///
/// Adds an https:// prefix if missing, then checks that the result is a
/// syntactically valid http(s) URL. Rejects URLs longer than
/// [`MAX_URL_LENGTH`]. Logs a warning and returns `None` for anything that
/// should not reach the analysis provider.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting URL exceeding maximum length ({} > {})",
            url.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    let normalized = if !url.starts_with("http://") && !url.starts_with("https://") {
        format!("https://{url}")
    } else {
        url.to_string()
    };

    // The https:// prefix can push a borderline input over the limit
    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Rejecting normalized URL exceeding maximum length ({} > {})",
            normalized.len(),
            MAX_URL_LENGTH
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Rejecting URL with unsupported scheme or missing host: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Rejecting invalid URL: {url}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validate_and_normalize_url;

    #[test]
    fn test_adds_https_prefix() {
        assert_eq!(
            validate_and_normalize_url("example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_preserves_existing_scheme() {
        assert_eq!(
            validate_and_normalize_url("http://example.com"),
            Some("http://example.com".to_string())
        );
        assert_eq!(
            validate_and_normalize_url("https://example.com"),
            Some("https://example.com".to_string())
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(validate_and_normalize_url("not a valid url!!!"), None);
        assert_eq!(validate_and_normalize_url(""), None);
        assert_eq!(validate_and_normalize_url("   "), None);
        assert_eq!(validate_and_normalize_url("://example.com"), None);
    }

    #[test]
    fn test_preserves_path_and_query() {
        assert_eq!(
            validate_and_normalize_url("example.com/path?query=value"),
            Some("https://example.com/path?query=value".to_string())
        );
    }

    #[test]
    fn test_rejects_over_length_urls() {
        let long = format!("https://example.com/{}", "a".repeat(2100));
        assert_eq!(validate_and_normalize_url(&long), None);

        // Under the limit raw, over it once https:// is prepended
        let borderline = format!("example.com/{}", "a".repeat(2045));
        assert_eq!(validate_and_normalize_url(&borderline), None);
    }

    #[test]
    fn test_accepts_url_at_limit() {
        let path = "a".repeat(2028);
        let at_limit = format!("https://example.com/{path}");
        assert_eq!(at_limit.len(), 2048);
        assert!(validate_and_normalize_url(&at_limit).is_some());
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let once = validate_and_normalize_url("example.com").expect("valid");
        assert_eq!(validate_and_normalize_url(&once), Some(once.clone()));
    }
}
