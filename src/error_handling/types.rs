//! Error type definitions.
//!
//! This module defines the call-level error types and the taxonomy of
//! per-item validation issues.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for page fetches.
///
/// Any of these aborts a `validate_url` call into a single-error report.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The URL could not be parsed or uses an unsupported scheme.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// The request did not complete within the fetch timeout.
    #[error("Request to {url} timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// The redirect chain exceeded the configured hop limit.
    #[error("Too many redirects while fetching {0}")]
    TooManyRedirects(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} response from {url}")]
    Status { url: String, status: u16 },

    /// Connection, TLS or body read failure.
    #[error("HTTP request failed for {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: ReqwestError,
    },
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A stored report could not be encoded or decoded.
    #[error("Report serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Kinds of findings recorded against a single item.
///
/// `Structural`, `RequiredField` (strict mode only) and `Parse` mark an item
/// invalid; everything else is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum IssueKind {
    /// No type marker on the item
    Structural,
    /// A required property is missing or empty
    RequiredField,
    /// URL, email or date shape mismatch
    Format,
    /// No rules are registered for the item's type
    UnsupportedType,
    /// The fragment could not be decoded
    Parse,
    /// A type-specific rule was not met
    TypeRule,
}

impl std::fmt::Display for IssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::Structural => "Structural error",
            IssueKind::RequiredField => "Missing required property",
            IssueKind::Format => "Property format warning",
            IssueKind::UnsupportedType => "Unsupported type",
            IssueKind::Parse => "Parse error",
            IssueKind::TypeRule => "Type rule violation",
        }
    }

    /// Whether an issue of this kind marks the item invalid regardless of mode.
    ///
    /// `RequiredField` is mode-dependent and is decided by the engine.
    pub fn invalidates(&self) -> bool {
        matches!(self, IssueKind::Structural | IssueKind::Parse)
    }
}
