//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` used to fetch pages before their
//! structured data is validated.

use reqwest::ClientBuilder;

use crate::config::ValidatorConfig;

/// Initializes the HTTP client used for page fetches.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the configuration
/// - Whole-request timeout from the configuration
/// - Redirect following capped at `max_redirects` hops
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &ValidatorConfig) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .timeout(config.fetch_timeout)
        .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
        .user_agent(config.user_agent.clone())
        .build()
}
