//! schema_audit library: structured-data validation
//!
//! This library extracts schema.org structured data from HTML (JSON-LD,
//! microdata and RDFa), normalizes it into one format-agnostic item model,
//! validates each item against a registry of per-type rules and aggregates
//! the outcome into a scored report with rich-result recommendations.
//!
//! # Example
//!
//! ```no_run
//! use schema_audit::{SchemaValidator, ValidatorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = SchemaValidator::new(ValidatorConfig::default())?;
//!
//! let report = validator.validate_url("https://example.com/").await;
//! println!(
//!     "{} schemas, overall score {}",
//!     report.schemas_found, report.overall_score
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! `validate_markup` is synchronous. `validate_url` and `validate_batch` need a
//! Tokio runtime, as does the durable report store.

pub mod cache;
pub mod config;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod limiter;
pub mod models;
pub mod parse;
pub mod registry;
pub mod report;
mod service;
pub mod storage;
mod utils;
pub mod validate;

// Re-export public API
pub use cache::{CacheStore, FileCache, MemoryCache};
pub use config::{LogFormat, LogLevel, ValidatorConfig};
pub use error_handling::{
    DatabaseError, FetchError, InitializationError, IssueKind, ValidationStats,
};
pub use fetch::{FetchedPage, Fetcher, HttpFetcher};
pub use limiter::{RateLimiter, TokenBucketLimiter};
pub use models::{
    BatchReport, Encoding, RichSnippetOpportunity, SchemaItem, SourceLocation, ValidationMode,
    ValidationReport, ValidationResult, Value,
};
pub use parse::FormatParser;
pub use registry::{RichSnippetRule, TypeRegistry, TypeRule};
pub use service::{SchemaValidator, SchemaValidatorBuilder};
pub use storage::{ReportStore, SqliteReportStore};
pub use validate::{validate_item, Findings};
