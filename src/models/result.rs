//! Validation outcomes.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::item::{Encoding, SourceLocation};

/// How missing required properties are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// A missing required property is an error and invalidates the item
    #[default]
    Strict,
    /// A missing required property is only a warning
    Lenient,
}

/// Outcome of validating a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub schema_type: String,
    pub encoding: Encoding,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
    /// `None` for types without registered rules
    pub completeness_score: Option<u8>,
    pub rich_snippet_eligible: bool,
    pub parsed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceLocation>,
}

/// An item that qualifies for enhanced search-result presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichSnippetOpportunity {
    /// Index into `validation_results`
    pub item: usize,
    pub schema_type: String,
}

/// Aggregated validation outcome for one URL or markup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// The validated URL, or `markup:<hash>` for raw markup
    #[serde(rename = "url")]
    pub source: String,
    pub schemas_found: usize,
    pub validation_results: Vec<ValidationResult>,
    pub overall_score: u8,
    pub recommendations: Vec<String>,
    pub rich_snippet_opportunities: Vec<RichSnippetOpportunity>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// A report for a call that failed before any markup could be validated.
    pub fn failed(source: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            schemas_found: 0,
            validation_results: Vec::new(),
            overall_score: 0,
            recommendations: Vec::new(),
            rich_snippet_opportunities: Vec::new(),
            errors: vec![reason.into()],
            warnings: Vec::new(),
            validated_at: Utc::now(),
        }
    }
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    pub reports: Vec<ValidationReport>,
    /// Number of sources the caller submitted
    pub requested: usize,
    /// Number of sources actually validated
    pub processed: usize,
    /// Set when fewer sources were processed than requested
    pub truncated: bool,
    /// Set when the time budget ran out before the batch finished
    pub timed_out: bool,
    /// Set when the cancellation token fired before the batch finished
    pub cancelled: bool,
}
