//! The validator façade.
//!
//! [`SchemaValidator`] wires the pipeline together:
//! fetch (URLs only) → extract → parse → validate → aggregate, with the cache
//! wrapped around every call and finished reports handed to the durable store.

mod builder;

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::cache::{markup_cache_key, markup_source, url_cache_key, CacheStore};
use crate::config::ValidatorConfig;
use crate::error_handling::{FetchError, InitializationError, ValidationStats};
use crate::extract::{bare_json_ld, extract_fragments, looks_like_json, parse_html};
use crate::fetch::Fetcher;
use crate::limiter::RateLimiter;
use crate::models::{BatchReport, Encoding, SchemaItem, ValidationReport};
use crate::parse::{parse_fragments, FormatParser};
use crate::registry::TypeRegistry;
use crate::report::aggregate;
use crate::storage::ReportStore;
use crate::utils::url::validate_and_normalize_url;
use crate::validate::validate_item;

pub use builder::SchemaValidatorBuilder;

/// Structured-data validator.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
///
/// # Examples
///
/// ```no_run
/// use schema_audit::{SchemaValidator, ValidatorConfig};
///
/// let validator = SchemaValidator::new(ValidatorConfig::default())?;
/// let report = validator.validate_markup(
///     r#"{"@context":"https://schema.org","@type":"Person","name":"Jane"}"#,
///     None,
/// );
/// assert_eq!(report.schemas_found, 1);
/// # Ok::<(), schema_audit::InitializationError>(())
/// ```
pub struct SchemaValidator {
    config: ValidatorConfig,
    registry: TypeRegistry,
    parsers: Vec<Box<dyn FormatParser>>,
    cache: Option<Arc<dyn CacheStore>>,
    fetcher: Arc<dyn Fetcher>,
    store: Option<Arc<dyn ReportStore>>,
    limiter: Option<Arc<dyn RateLimiter>>,
    stats: Arc<ValidationStats>,
    pending_writes: TaskTracker,
}

/// A batch entry is fetched when it is a single absolute http(s) URL.
fn is_url_source(source: &str) -> bool {
    let source = source.trim();
    (source.starts_with("http://") || source.starts_with("https://"))
        && !source.contains(char::is_whitespace)
}

impl SchemaValidator {
    /// A validator with default collaborators.
    pub fn new(config: ValidatorConfig) -> Result<Self, InitializationError> {
        Self::builder(config).build()
    }

    pub fn builder(config: ValidatorConfig) -> SchemaValidatorBuilder {
        SchemaValidatorBuilder::new(config)
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &Arc<ValidationStats> {
        &self.stats
    }

    /// Validates raw markup: an HTML document or bare JSON-LD text.
    ///
    /// `hint` restricts extraction to one encoding.
    pub fn validate_markup(&self, raw: &str, hint: Option<Encoding>) -> ValidationReport {
        let key = markup_cache_key(raw, hint, self.config.mode);
        if let Some(report) = self.cached(&key) {
            return report;
        }
        let report = self.build_report(markup_source(raw), raw, hint);
        self.finish(&key, report)
    }

    /// Fetches `url` and validates the page.
    ///
    /// The URL is normalized (`https://` is added when no scheme is given)
    /// before the cache lookup, so the report source is the normalized form.
    /// An invalid URL or a fetch failure yields a report with a single error and is not cached.
    pub async fn validate_url(&self, url: &str) -> ValidationReport {
        let Some(url) = validate_and_normalize_url(url) else {
            let url = url.trim();
            let reason = FetchError::InvalidUrl(url.to_string());
            return ValidationReport::failed(url, reason.to_string());
        };
        let key = url_cache_key(&url, self.config.mode);
        if let Some(report) = self.cached(&key) {
            return report;
        }

        let page = match self.fetcher.fetch(&url).await {
            Ok(page) => page,
            Err(e) => {
                warn!("Failed to fetch {url}: {e}");
                return ValidationReport::failed(url, e.to_string());
            }
        };

        let report = self.build_report(url, &page.body, None);
        self.finish(&key, report)
    }

    /// [`validate_url`](Self::validate_url) on behalf of `actor`, subject to
    /// the configured rate limiter.
    pub async fn validate_url_as(&self, actor: &str, url: &str) -> ValidationReport {
        if let Some(limiter) = &self.limiter {
            if !limiter.check(actor) {
                warn!("Rate limit exceeded for {actor}, refusing {url}");
                return ValidationReport::failed(
                    url.trim(),
                    format!("Rate limit exceeded for '{actor}', try again later"),
                );
            }
        }
        self.validate_url(url).await
    }

    /// Validates up to `batch_limit` sources in order.
    ///
    /// Each source is a URL or raw markup. Cancellation and the time budget are
    /// checked before each source; a failing source only affects its own report.
    pub async fn validate_batch(
        &self,
        sources: &[String],
        cancel: &CancellationToken,
        budget: Option<Duration>,
    ) -> BatchReport {
        let requested = sources.len();
        let limit = self.config.batch_limit;
        if requested > limit {
            warn!("Batch of {requested} sources capped at {limit}");
        }

        let started = Instant::now();
        let mut reports = Vec::with_capacity(requested.min(limit));
        let mut timed_out = false;
        let mut cancelled = false;

        for source in sources.iter().take(limit) {
            if cancel.is_cancelled() {
                info!("Batch cancelled after {} sources", reports.len());
                cancelled = true;
                break;
            }
            if budget.is_some_and(|b| started.elapsed() >= b) {
                info!("Batch time budget exhausted after {} sources", reports.len());
                timed_out = true;
                break;
            }

            let report = if is_url_source(source) {
                self.validate_url(source).await
            } else {
                self.validate_markup(source, None)
            };
            reports.push(report);
        }

        let processed = reports.len();
        BatchReport {
            reports,
            requested,
            processed,
            truncated: processed < requested,
            timed_out,
            cancelled,
        }
    }

    /// Waits for report writes handed to the durable store so far.
    pub async fn flush(&self) {
        self.pending_writes.close();
        self.pending_writes.wait().await;
        self.pending_writes.reopen();
    }

    fn cached(&self, key: &str) -> Option<ValidationReport> {
        let report = self.cache.as_ref()?.get(key)?;
        debug!("Cache hit for {key}");
        self.stats.record_cache_hit();
        Some(report)
    }

    fn extract_items(&self, raw: &str, hint: Option<Encoding>) -> Vec<SchemaItem> {
        let max_bytes = self.config.max_markup_bytes;
        if hint.map_or(true, |h| h == Encoding::JsonLd) && looks_like_json(raw) {
            let fragment = bare_json_ld(raw, max_bytes);
            return parse_fragments(&self.parsers, std::slice::from_ref(&fragment));
        }

        let document = parse_html(raw, max_bytes);
        let fragments = extract_fragments(&document, hint);
        parse_fragments(&self.parsers, &fragments)
    }

    fn build_report(&self, source: String, raw: &str, hint: Option<Encoding>) -> ValidationReport {
        let results = self
            .extract_items(raw, hint)
            .iter()
            .map(|item| validate_item(item, self.config.mode, &self.registry, Some(&self.stats)))
            .collect();

        let report = aggregate(source, results);
        self.stats.record_report();
        info!(
            "Validated {}: {} schemas, overall score {}, {} errors",
            report.source,
            report.schemas_found,
            report.overall_score,
            report.errors.len()
        );
        report
    }

    fn finish(&self, key: &str, report: ValidationReport) -> ValidationReport {
        if let Some(cache) = &self.cache {
            cache.set(key, &report, self.config.cache_ttl);
        }
        self.persist(&report);
        report
    }

    fn persist(&self, report: &ValidationReport) {
        let Some(store) = &self.store else {
            return;
        };
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No async runtime, report for {} not stored", report.source);
            return;
        };

        let store = Arc::clone(store);
        let report = report.clone();
        self.pending_writes.spawn_on(
            async move {
                if let Err(e) = store.append(&report).await {
                    warn!("Failed to store report for {}: {e}", report.source);
                }
            },
            &handle,
        );
    }
}
