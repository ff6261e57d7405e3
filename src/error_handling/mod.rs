//! Error handling and validation statistics.
//!
//! This module provides:
//! - Call-level error types (initialization, fetch, database)
//! - The issue taxonomy used for per-item findings
//! - Thread-safe issue statistics
//! - Classification of `reqwest` failures into fetch errors
//!
//! Per-item findings never surface as `Err`: they are recorded as messages on
//! the item's `ValidationResult` and counted by [`IssueKind`]. Only
//! [`FetchError`] short-circuits a whole `validate_url` call.

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::categorize_reqwest_error;
pub use stats::{print_issue_statistics, ValidationStats};
pub use types::{DatabaseError, FetchError, InitializationError, IssueKind};
