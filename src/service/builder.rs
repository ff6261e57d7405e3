//! Construction of [`SchemaValidator`] with pluggable collaborators.

use std::sync::Arc;

use tokio_util::task::TaskTracker;

use super::SchemaValidator;
use crate::cache::{CacheStore, MemoryCache};
use crate::config::ValidatorConfig;
use crate::error_handling::{InitializationError, ValidationStats};
use crate::fetch::{Fetcher, HttpFetcher};
use crate::limiter::RateLimiter;
use crate::parse::{default_parsers, FormatParser};
use crate::registry::TypeRegistry;
use crate::storage::ReportStore;

/// Builder for [`SchemaValidator`].
///
/// Defaults: built-in registry and parsers, an in-memory cache, an HTTP
/// fetcher built from the config, no durable store and no rate limiter.
pub struct SchemaValidatorBuilder {
    config: ValidatorConfig,
    registry: TypeRegistry,
    parsers: Vec<Box<dyn FormatParser>>,
    cache: Option<Arc<dyn CacheStore>>,
    fetcher: Option<Arc<dyn Fetcher>>,
    store: Option<Arc<dyn ReportStore>>,
    limiter: Option<Arc<dyn RateLimiter>>,
    stats: Arc<ValidationStats>,
}

impl SchemaValidatorBuilder {
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            registry: TypeRegistry::builtin(),
            parsers: default_parsers(),
            cache: Some(Arc::new(MemoryCache::new())),
            fetcher: None,
            store: None,
            limiter: None,
            stats: Arc::new(ValidationStats::new()),
        }
    }

    pub fn registry(mut self, registry: TypeRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Replaces the parser list; order decides nothing since each fragment is
    /// routed by encoding.
    pub fn parsers(mut self, parsers: Vec<Box<dyn FormatParser>>) -> Self {
        self.parsers = parsers;
        self
    }

    pub fn cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Every call runs the full pipeline.
    pub fn without_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    pub fn fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub fn store(mut self, store: Arc<dyn ReportStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Shares issue counters with other validators.
    pub fn stats(mut self, stats: Arc<ValidationStats>) -> Self {
        self.stats = stats;
        self
    }

    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` when no fetcher was
    /// supplied and the default HTTP client cannot be built.
    pub fn build(self) -> Result<SchemaValidator, InitializationError> {
        let fetcher: Arc<dyn Fetcher> = match self.fetcher {
            Some(fetcher) => fetcher,
            None => Arc::new(HttpFetcher::new(&self.config)?),
        };

        Ok(SchemaValidator {
            config: self.config,
            registry: self.registry,
            parsers: self.parsers,
            cache: self.cache,
            fetcher,
            store: self.store,
            limiter: self.limiter,
            stats: self.stats,
            pending_writes: TaskTracker::new(),
        })
    }
}
