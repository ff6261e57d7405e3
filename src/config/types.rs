//! Configuration types.
//!
//! This module defines the enums and structs used for library configuration
//! and command-line argument parsing.

use std::time::Duration;

use clap::ValueEnum;

use crate::config::constants::{
    DEFAULT_BATCH_LIMIT, DEFAULT_CACHE_TTL_SECS, DEFAULT_USER_AGENT, FETCH_TIMEOUT_SECS,
    MAX_MARKUP_BYTES, MAX_REDIRECT_HOPS,
};
use crate::models::ValidationMode;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Every setting the validator consults is carried here and handed to
/// [`SchemaValidator`](crate::SchemaValidator) at construction time.
///
/// # Examples
///
/// ```
/// use schema_audit::{ValidationMode, ValidatorConfig};
///
/// let config = ValidatorConfig {
///     mode: ValidationMode::Lenient,
///     batch_limit: 10,
///     ..Default::default()
/// };
/// assert_eq!(config.max_redirects, 3);
/// ```
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Strict or lenient handling of missing required properties
    pub mode: ValidationMode,

    /// Lifetime of cached reports
    pub cache_ttl: Duration,

    /// Maximum sources processed per batch call
    pub batch_limit: usize,

    /// Page fetch timeout
    pub fetch_timeout: Duration,

    /// Maximum redirect hops followed when fetching
    pub max_redirects: usize,

    /// HTTP User-Agent header value
    pub user_agent: String,

    /// Markup beyond this many bytes is truncated before extraction
    pub max_markup_bytes: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            mode: ValidationMode::Strict,
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            batch_limit: DEFAULT_BATCH_LIMIT,
            fetch_timeout: Duration::from_secs(FETCH_TIMEOUT_SECS),
            max_redirects: MAX_REDIRECT_HOPS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_markup_bytes: MAX_MARKUP_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = ValidatorConfig::default();
        assert_eq!(config.mode, ValidationMode::Strict);
        assert_eq!(config.cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.batch_limit, 50);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.max_redirects, 3);
        assert_eq!(config.max_markup_bytes, 1024 * 1024);
        assert!(config.user_agent.starts_with("schema_audit/"));
    }
}
