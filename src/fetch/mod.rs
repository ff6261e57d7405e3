//! Page fetching.
//!
//! The [`Fetcher`] trait is the seam between the validator and the network;
//! [`HttpFetcher`] is the `reqwest` implementation used in production.

use async_trait::async_trait;
use log::{debug, trace};

use crate::config::ValidatorConfig;
use crate::error_handling::{categorize_reqwest_error, FetchError, InitializationError};
use crate::initialization::init_client;
use crate::utils::url::validate_and_normalize_url;

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after redirects
    pub final_url: String,
    pub status: u16,
    pub body: String,
}

/// Retrieves a page body for validation.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, failing on transport errors and non-2xx responses.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// `reqwest`-backed fetcher honoring the configured timeout, redirect cap and
/// user agent.
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &ValidatorConfig) -> Result<Self, InitializationError> {
        Ok(Self::with_client(init_client(config)?, config))
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client, config: &ValidatorConfig) -> Self {
        Self {
            client,
            timeout_secs: config.fetch_timeout.as_secs(),
        }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let url = validate_and_normalize_url(url)
            .ok_or_else(|| FetchError::InvalidUrl(url.to_string()))?;

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| categorize_reqwest_error(&url, self.timeout_secs, e))?;

        let final_url = response.url().to_string();
        let status = response.status();
        if final_url != url {
            debug!("Final url after redirects: {final_url}");
        }
        trace!("Response version: {:?}", response.version());

        if !status.is_success() {
            return Err(FetchError::Status {
                url: final_url,
                status: status.as_u16(),
            });
        }

        if let Some(ct) = response.headers().get(reqwest::header::CONTENT_TYPE) {
            debug!("Content-Type for {final_url}: {:?}", ct);
        }

        let body = response
            .text()
            .await
            .map_err(|e| categorize_reqwest_error(&final_url, self.timeout_secs, e))?;
        debug!("Body length for {final_url}: {} bytes", body.len());

        Ok(FetchedPage {
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}
