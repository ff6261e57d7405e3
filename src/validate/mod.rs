//! Per-item validation engine.
//!
//! Validation never fails: everything found about an item is recorded on its
//! [`ValidationResult`] as an error, warning or recommendation. The steps are
//! fixed: parse check, type check, registry lookup, required properties,
//! recommended properties, completeness score, type-specific rules, property
//! formats and finally rich-result eligibility.

mod format;
pub(crate) mod rules;

use log::{debug, trace};

use crate::error_handling::{IssueKind, ValidationStats};
use crate::models::{SchemaItem, ValidationMode, ValidationResult};
use crate::registry::{RichSnippetRule, TypeRegistry, TypeRule};

pub use format::{is_email, is_iso8601_date, is_opening_hours};

/// Type name reported for items that carry no type marker.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// Signature of a type-specific check registered on a [`TypeRule`].
pub type TypeValidator = fn(&SchemaItem, &mut Findings<'_>);

/// Accumulates the messages produced while validating one item.
///
/// Each error and warning is also counted on the shared statistics under its
/// [`IssueKind`].
pub struct Findings<'a> {
    errors: Vec<String>,
    warnings: Vec<String>,
    recommendations: Vec<String>,
    invalid: bool,
    stats: Option<&'a ValidationStats>,
}

impl<'a> Findings<'a> {
    pub fn new(stats: Option<&'a ValidationStats>) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            recommendations: Vec::new(),
            invalid: false,
            stats,
        }
    }

    pub fn error(&mut self, kind: IssueKind, message: impl Into<String>) {
        if kind.invalidates() {
            self.invalid = true;
        }
        self.count(kind);
        self.errors.push(message.into());
    }

    pub fn warning(&mut self, kind: IssueKind, message: impl Into<String>) {
        self.count(kind);
        self.warnings.push(message.into());
    }

    pub fn recommend(&mut self, message: impl Into<String>) {
        self.recommendations.push(message.into());
    }

    /// Marks the item invalid without recording a message.
    pub fn invalidate(&mut self) {
        self.invalid = true;
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn recommendations(&self) -> &[String] {
        &self.recommendations
    }

    fn count(&self, kind: IssueKind) {
        if let Some(stats) = self.stats {
            stats.increment_issue(kind);
        }
    }

    fn into_result(
        self,
        item: &SchemaItem,
        schema_type: String,
        completeness_score: Option<u8>,
        rich_snippet_eligible: bool,
    ) -> ValidationResult {
        ValidationResult {
            schema_type,
            encoding: item.encoding(),
            valid: !self.invalid,
            errors: self.errors,
            warnings: self.warnings,
            recommendations: self.recommendations,
            completeness_score,
            rich_snippet_eligible,
            parsed: item.parsed(),
            parse_error: item.parse_error().map(str::to_string),
            location: item.location().cloned(),
        }
    }
}

/// Validates one item against the registry.
///
/// Unparsed and untyped items score zero; only unregistered types are left
/// unscored.
pub fn validate_item(
    item: &SchemaItem,
    mode: ValidationMode,
    registry: &TypeRegistry,
    stats: Option<&ValidationStats>,
) -> ValidationResult {
    if let Some(stats) = stats {
        stats.record_item();
    }
    let mut findings = Findings::new(stats);

    if let Some(error) = item.parse_error() {
        debug!("Skipping unparsed {} fragment: {error}", item.encoding());
        findings.error(IssueKind::Parse, error.to_string());
        return findings.into_result(item, UNKNOWN_TYPE.to_string(), Some(0), false);
    }

    let Some(type_name) = item.schema_type() else {
        findings.error(
            IssueKind::Structural,
            "Schema must have a type (@type, itemtype or typeof)",
        );
        return findings.into_result(item, UNKNOWN_TYPE.to_string(), Some(0), false);
    };

    let Some(rule) = registry.get(type_name) else {
        findings.warning(
            IssueKind::UnsupportedType,
            format!("Unsupported type '{type_name}': no validation rules are registered"),
        );
        return findings.into_result(item, type_name.to_string(), None, false);
    };

    for field in &rule.required {
        if item.has(field) {
            continue;
        }
        let message = format!("Required property '{field}' is missing");
        match mode {
            ValidationMode::Strict => {
                findings.error(IssueKind::RequiredField, message);
                findings.invalidate();
            }
            ValidationMode::Lenient => findings.warning(IssueKind::RequiredField, message),
        }
    }

    for field in &rule.recommended {
        if !item.has(field) {
            findings.recommend(format!("Consider adding recommended property '{field}'"));
        }
    }

    let score = completeness_score(item, rule);

    if let Some(validator) = rule.validator {
        validator(item, &mut findings);
    }

    format::check_property_formats(item, &mut findings);

    let eligible = is_rich_snippet_eligible(item, rule);
    trace!("{type_name}: score {score}, eligible {eligible}");

    findings.into_result(item, type_name.to_string(), Some(score), eligible)
}

/// Percentage of the rule's required and recommended properties that are
/// present. A rule with no properties scores zero.
pub fn completeness_score(item: &SchemaItem, rule: &TypeRule) -> u8 {
    let total = rule.applicable_fields();
    if total == 0 {
        return 0;
    }
    let present = rule
        .required
        .iter()
        .chain(rule.recommended.iter())
        .filter(|field| item.has(field))
        .count();
    ((present as f64 / total as f64) * 100.0).round() as u8
}

/// Whether the item qualifies for rich results under the rule.
pub fn is_rich_snippet_eligible(item: &SchemaItem, rule: &TypeRule) -> bool {
    match &rule.rich_snippet {
        None => false,
        Some(RichSnippetRule::RequiredFields) => rule.required.iter().all(|f| item.has(f)),
        Some(RichSnippetRule::Fields(fields)) => fields.iter().all(|f| item.has(f)),
    }
}
