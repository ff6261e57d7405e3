//! Configuration constants.
//!
//! This module defines the defaults used throughout the validator, including
//! input size caps, network timeouts, cache lifetimes and scoring thresholds.

/// Maximum HTML/markup size in bytes (1MB)
/// Input beyond this is truncated before parsing to bound memory use
pub const MAX_MARKUP_BYTES: usize = 1024 * 1024;

/// Default lifetime of a cached report in seconds (1 hour)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

/// Maximum number of sources processed by a single batch call
pub const DEFAULT_BATCH_LIMIT: usize = 50;

// Network operation limits
/// Page fetch timeout in seconds
pub const FETCH_TIMEOUT_SECS: u64 = 10;
/// Maximum number of redirect hops to follow when fetching a page
pub const MAX_REDIRECT_HOPS: usize = 3;
/// Maximum URL length accepted for validation
pub const MAX_URL_LENGTH: usize = 2048;

/// User-Agent sent when fetching pages.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "schema_audit/",
    env!("CARGO_PKG_VERSION"),
    " (structured data validator)"
);

// Scoring
/// Items scoring below this completeness percentage get an aggregate
/// "add recommended properties" recommendation
pub const COMPLETENESS_RECOMMENDATION_THRESHOLD: u8 = 80;

// Externally triggered validation
/// Requests allowed per actor within one rate-limit window
pub const RATE_LIMIT_REQUESTS: u32 = 20;
/// Rate-limit window in seconds (5 minutes)
pub const RATE_LIMIT_WINDOW_SECS: u64 = 300;

/// Prefix for every cache key
pub const CACHE_KEY_PREFIX: &str = "schema_validation_";

/// Default on-disk cache directory used by the CLI
pub const DEFAULT_CACHE_DIR: &str = ".schema_audit_cache";
