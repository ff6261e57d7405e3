//! Fetch error categorization.
//!
//! This module maps `reqwest` failures onto [`FetchError`] variants so the
//! report carries a specific reason (timeout, redirect loop, status, ...).

use super::types::FetchError;

/// Categorizes a `reqwest::Error` raised while fetching `url`.
///
/// # Arguments
///
/// * `url` - The URL being fetched (used in the error message)
/// * `timeout_secs` - The configured timeout (reported for timeouts)
/// * `error` - The `reqwest::Error` to categorize
pub fn categorize_reqwest_error(url: &str, timeout_secs: u64, error: reqwest::Error) -> FetchError {
    if let Some(status) = error.status() {
        return FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        };
    }

    if error.is_timeout() {
        return FetchError::Timeout {
            url: url.to_string(),
            seconds: timeout_secs,
        };
    }

    if error.is_redirect() {
        return FetchError::TooManyRedirects(url.to_string());
    }

    if error.is_builder() {
        return FetchError::InvalidUrl(url.to_string());
    }

    FetchError::Connection {
        url: url.to_string(),
        source: error,
    }
}
