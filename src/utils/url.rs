//! URL validation and normalization utilities.

use log::warn;

use crate::config::MAX_URL_LENGTH;

/// Validates and normalizes a URL for fetching.
///
/// Adds https:// prefix if missing, then validates that the URL is syntactically
/// valid and uses http/https scheme. Rejects URLs longer than `MAX_URL_LENGTH`.
/// Logs a warning and returns None if the URL is invalid, too long, or uses an
/// unsupported scheme.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    let url = url.trim();
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {})",
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

    match url::Url::parse(&normalized) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" if parsed.host_str().is_some() => Some(normalized),
            _ => {
                warn!("Skipping unsupported URL: {url}");
                None
            }
        },
        Err(_) => {
            warn!("Skipping invalid URL: {url}");
            None
        }
    }
}

/// Produces the canonical form of a URL used for cache keys.
///
/// Scheme and host are lower-cased by the parser, default ports are dropped,
/// the fragment is removed, and an empty path becomes `/`. Unparseable input is
/// returned trimmed so that it still yields a stable key.
pub fn canonical_url(url: &str) -> String {
    match url::Url::parse(url.trim()) {
        Ok(mut parsed) => {
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.trim().to_string(),
    }
}

/// True when `value` parses as an absolute URL with a host.
pub fn is_absolute_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|u| u.has_host())
        .unwrap_or(false)
}
