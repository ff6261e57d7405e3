//! Property format checks shared by every type.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::IssueKind;
use crate::models::{SchemaItem, Value};
use crate::utils::compile_regex_unsafe;
use crate::utils::url::is_absolute_url;

use super::Findings;

/// Properties whose values must be absolute URLs.
const URL_PROPERTIES: &[&str] = &["url", "sameAs", "logo", "image", "mainEntityOfPage"];

/// Properties whose values must be email addresses.
const EMAIL_PROPERTIES: &[&str] = &["email"];

static ISO8601_DATE: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(
        r"^\d{4}-\d{2}-\d{2}(T\d{2}:\d{2}:\d{2}(\.\d+)?([+-]\d{2}:\d{2}|Z))?$",
        "ISO8601_DATE",
    )
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    compile_regex_unsafe(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", "EMAIL")
});

static OPENING_HOURS: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(r"^(Mo|Tu|We|Th|Fr|Sa|Su)", "OPENING_HOURS"));

/// `2023-01-01`, or a full timestamp with seconds and a zone designator.
pub fn is_iso8601_date(value: &str) -> bool {
    ISO8601_DATE.is_match(value.trim())
}

/// Accepts a bare address or a `mailto:` link.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    let address = value.strip_prefix("mailto:").unwrap_or(value);
    EMAIL.is_match(address)
}

/// Opening-hours specifications start with a two-letter day code (`Mo-Fr 09:00-17:00`).
pub fn is_opening_hours(value: &str) -> bool {
    OPENING_HOURS.is_match(value.trim())
}

fn is_url_value(value: &Value) -> bool {
    match value {
        Value::Text(s) => is_absolute_url(s),
        // A nested reference is judged by its identifier, then its own url.
        Value::Item(item) => match (item.id(), item.get("url").and_then(Value::as_text)) {
            (Some(id), _) => is_absolute_url(id),
            (None, Some(url)) => is_absolute_url(url),
            (None, None) => true,
        },
        Value::List(values) => values.iter().all(is_url_value),
        Value::Number(_) | Value::Bool(_) => false,
    }
}

fn is_email_value(value: &Value) -> bool {
    match value {
        Value::Text(s) => is_email(s),
        Value::List(values) => values.iter().all(is_email_value),
        _ => true,
    }
}

/// Checks URL and email shaped properties on the item's top level.
pub(super) fn check_property_formats(item: &SchemaItem, findings: &mut Findings<'_>) {
    for (name, value) in item.properties() {
        if value.is_empty() {
            continue;
        }
        if URL_PROPERTIES.contains(&name) && !is_url_value(value) {
            findings.warning(
                IssueKind::Format,
                format!("Property '{name}' should be a valid URL"),
            );
        }
        if EMAIL_PROPERTIES.contains(&name) && !is_email_value(value) {
            findings.warning(
                IssueKind::Format,
                format!("Property '{name}' should be a valid email address"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Encoding;

    #[test]
    fn test_iso8601_dates() {
        assert!(is_iso8601_date("2023-01-01"));
        assert!(is_iso8601_date("2023-01-01T00:00:00Z"));
        assert!(is_iso8601_date("2023-01-01T10:30:00.123+02:00"));
        assert!(!is_iso8601_date("01/02/2023"));
        assert!(!is_iso8601_date("2023-01-01T10:30"));
        assert!(!is_iso8601_date("January 1, 2023"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("info@example.com"));
        assert!(is_email("mailto:info@example.com"));
        assert!(!is_email("info at example.com"));
        assert!(!is_email("info@localhost"));
    }

    #[test]
    fn test_opening_hours() {
        assert!(is_opening_hours("Mo-Fr 09:00-17:00"));
        assert!(is_opening_hours("Sa 10:00-14:00"));
        assert!(!is_opening_hours("Monday to Friday"));
        assert!(!is_opening_hours("9-5"));
    }

    #[test]
    fn test_url_properties() {
        let item = SchemaItem::new(Encoding::JsonLd)
            .with_type("Organization")
            .with_property("url", Value::text("example.com"))
            .with_property("sameAs", Value::text("https://twitter.com/acme"))
            .with_property("sameAs", Value::text("https://github.com/acme"))
            .with_property("email", Value::text("not-an-email"));
        let mut findings = Findings::new(None);
        check_property_formats(&item, &mut findings);
        assert_eq!(
            findings.warnings(),
            &[
                "Property 'url' should be a valid URL".to_string(),
                "Property 'email' should be a valid email address".to_string(),
            ]
        );
        assert!(findings.errors().is_empty());
    }

    #[test]
    fn test_nested_reference_checked_by_id() {
        let page = SchemaItem::new(Encoding::JsonLd)
            .with_type("WebPage")
            .with_id("https://example.com/post");
        let bad = SchemaItem::new(Encoding::JsonLd).with_id("#post");
        let item = SchemaItem::new(Encoding::JsonLd)
            .with_type("Article")
            .with_property("mainEntityOfPage", Value::item(page))
            .with_property("image", Value::item(bad));
        let mut findings = Findings::new(None);
        check_property_formats(&item, &mut findings);
        assert_eq!(
            findings.warnings(),
            &["Property 'image' should be a valid URL".to_string()]
        );
    }
}
