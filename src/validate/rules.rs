//! Type-specific rules for Article, Product, Organization and LocalBusiness.

use crate::error_handling::IssueKind;
use crate::models::{SchemaItem, Value};

use super::format::{is_iso8601_date, is_opening_hours};
use super::Findings;

const DATE_PROPERTIES: &[&str] = &["datePublished", "dateModified"];

fn nested(value: &Value) -> impl Iterator<Item = Option<&SchemaItem>> + '_ {
    value.members().map(Value::as_item)
}

fn has_all(item: &SchemaItem, fields: &[&str]) -> bool {
    fields.iter().all(|f| item.has(f))
}

/// A Person or Organization node, or a bare `@id` reference to one.
fn is_author_reference(value: &Value) -> bool {
    match value.as_item() {
        Some(item) => match item.schema_type() {
            Some(t) => t == "Person" || t == "Organization",
            None => item.id().is_some(),
        },
        None => false,
    }
}

/// A plain URL string, or an ImageObject carrying a `url` or `@id`.
fn is_image_reference(value: &Value) -> bool {
    match value {
        Value::Text(_) => true,
        Value::Item(image) => image.has("url") || image.id().is_some(),
        _ => false,
    }
}

fn is_complete_address(value: &Value) -> bool {
    value
        .as_item()
        .is_some_and(|address| has_all(address, &["addressLocality", "addressCountry"]))
}

fn check_images(item: &SchemaItem, property: &str, findings: &mut Findings<'_>) {
    if let Some(value) = item.get(property) {
        if !value.members().all(is_image_reference) {
            findings.warning(
                IssueKind::TypeRule,
                format!("Property '{property}' should be an image URL or an ImageObject with a url"),
            );
        }
    }
}

pub(crate) fn validate_article(item: &SchemaItem, findings: &mut Findings<'_>) {
    if let Some(author) = item.get("author") {
        if !author.is_empty() && !author.members().all(is_author_reference) {
            findings.warning(
                IssueKind::TypeRule,
                "Author should be structured with @type Person or Organization",
            );
        }
    }

    check_images(item, "image", findings);

    if let Some(publisher) = item.get("publisher") {
        match publisher.as_item() {
            Some(org) if org.schema_type().is_some() && org.has("name") => {
                if !org.has("logo") {
                    findings.recommend("Publisher should include a logo for rich snippets");
                }
            }
            _ => findings.error(
                IssueKind::TypeRule,
                "Publisher must have @type and name properties",
            ),
        }
    }

    for field in DATE_PROPERTIES {
        let Some(value) = item.get(field) else {
            continue;
        };
        if !value
            .members()
            .all(|v| v.as_text().is_some_and(is_iso8601_date))
        {
            findings.error(
                IssueKind::Format,
                format!("{field} must be in ISO 8601 format"),
            );
        }
    }
}

pub(crate) fn validate_product(item: &SchemaItem, findings: &mut Findings<'_>) {
    if let Some(offers) = item.get("offers") {
        let complete = nested(offers)
            .all(|offer| offer.is_some_and(|o| has_all(o, &["price", "availability"])));
        if !offers.is_empty() && !complete {
            findings.error(
                IssueKind::TypeRule,
                "Offers must include price and availability",
            );
        }
    }

    if let Some(rating) = item.get("aggregateRating") {
        let complete = nested(rating).all(|r| {
            r.is_some_and(|r| has_all(r, &["ratingValue", "bestRating", "reviewCount"]))
        });
        if !complete {
            findings.warning(
                IssueKind::TypeRule,
                "AggregateRating should include ratingValue, bestRating, and reviewCount",
            );
        }
    }

    if !item.has("review") && !item.has("aggregateRating") {
        findings.recommend("Consider adding reviews or aggregate rating for better rich snippets");
    }
}

pub(crate) fn validate_organization(item: &SchemaItem, findings: &mut Findings<'_>) {
    check_images(item, "logo", findings);

    if let Some(address) = item.get("address") {
        if !address.members().all(is_complete_address) {
            findings.warning(
                IssueKind::TypeRule,
                "Address should include addressLocality and addressCountry",
            );
        }
    }

    if let Some(contact) = item.get("contactPoint") {
        let complete = nested(contact)
            .all(|c| c.is_some_and(|c| has_all(c, &["telephone", "contactType"])));
        if !complete {
            findings.warning(
                IssueKind::TypeRule,
                "ContactPoint should include telephone and contactType",
            );
        }
    }
}

pub(crate) fn validate_local_business(item: &SchemaItem, findings: &mut Findings<'_>) {
    match item.get("address") {
        Some(address) if !address.is_empty() => {
            if !address.members().all(is_complete_address) {
                findings.error(
                    IssueKind::TypeRule,
                    "Address must include addressLocality and addressCountry",
                );
            }
        }
        _ => findings.error(IssueKind::TypeRule, "Local business must have an address"),
    }

    if let Some(hours) = item.get("openingHours") {
        let recognized = hours
            .members()
            .all(|v| v.as_text().is_some_and(is_opening_hours));
        if !recognized {
            findings.warning(
                IssueKind::TypeRule,
                "Opening hours should use day codes such as 'Mo-Fr 09:00-17:00'",
            );
        }
    }

    if !item.has("geo") {
        findings.recommend("Add geo coordinates for better local search visibility");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Encoding;

    fn node(schema_type: &str) -> SchemaItem {
        SchemaItem::new(Encoding::JsonLd).with_type(schema_type)
    }

    fn run(validator: fn(&SchemaItem, &mut Findings<'_>), item: &SchemaItem) -> Findings<'static> {
        let mut findings = Findings::new(None);
        validator(item, &mut findings);
        findings
    }

    #[test]
    fn test_article_plain_text_author_warns() {
        let item = node("Article").with_property("author", Value::text("Jane Doe"));
        let findings = run(validate_article, &item);
        assert_eq!(
            findings.warnings(),
            &["Author should be structured with @type Person or Organization".to_string()]
        );
    }

    #[test]
    fn test_article_author_reference_by_id() {
        let author = SchemaItem::new(Encoding::JsonLd).with_id("https://example.com/#jane");
        let item = node("Article").with_property("author", Value::item(author));
        assert!(run(validate_article, &item).warnings().is_empty());
    }

    #[test]
    fn test_article_publisher_rules() {
        let publisher = node("Organization").with_property("name", Value::text("Acme"));
        let item = node("Article").with_property("publisher", Value::item(publisher));
        let findings = run(validate_article, &item);
        assert!(findings.errors().is_empty());
        assert_eq!(
            findings.recommendations(),
            &["Publisher should include a logo for rich snippets".to_string()]
        );

        let item = node("Article").with_property("publisher", Value::text("Acme"));
        assert_eq!(
            run(validate_article, &item).errors(),
            &["Publisher must have @type and name properties".to_string()]
        );
    }

    #[test]
    fn test_article_dates() {
        let item = node("Article")
            .with_property("datePublished", Value::text("2023-01-01"))
            .with_property("dateModified", Value::text("yesterday"));
        assert_eq!(
            run(validate_article, &item).errors(),
            &["dateModified must be in ISO 8601 format".to_string()]
        );
    }

    #[test]
    fn test_article_image_object_without_url() {
        let image = node("ImageObject").with_property("caption", Value::text("x"));
        let item = node("Article").with_property("image", Value::item(image));
        assert_eq!(run(validate_article, &item).warnings().len(), 1);
    }

    #[test]
    fn test_product_offer_and_rating() {
        let offer = node("Offer").with_property("price", Value::text("9.99"));
        let rating = node("AggregateRating").with_property("ratingValue", Value::Number(4.5));
        let item = node("Product")
            .with_property("offers", Value::item(offer))
            .with_property("aggregateRating", Value::item(rating));
        let findings = run(validate_product, &item);
        assert_eq!(
            findings.errors(),
            &["Offers must include price and availability".to_string()]
        );
        assert_eq!(findings.warnings().len(), 1);
        assert!(findings.recommendations().is_empty());
    }

    #[test]
    fn test_product_offer_list() {
        let offer = |price: &str| {
            node("Offer")
                .with_property("price", Value::text(price))
                .with_property("availability", Value::text("https://schema.org/InStock"))
        };
        let item = node("Product")
            .with_property("offers", Value::item(offer("1.00")))
            .with_property("offers", Value::item(offer("2.00")));
        let findings = run(validate_product, &item);
        assert!(findings.errors().is_empty());
        assert_eq!(
            findings.recommendations(),
            &["Consider adding reviews or aggregate rating for better rich snippets".to_string()]
        );
    }

    #[test]
    fn test_organization_contact_point() {
        let contact = node("ContactPoint").with_property("telephone", Value::text("+1-555"));
        let item = node("Organization").with_property("contactPoint", Value::item(contact));
        assert_eq!(
            run(validate_organization, &item).warnings(),
            &["ContactPoint should include telephone and contactType".to_string()]
        );
    }

    #[test]
    fn test_local_business_requires_address() {
        let item = node("LocalBusiness")
            .with_property("openingHours", Value::text("Monday-Friday"));
        let findings = run(validate_local_business, &item);
        assert_eq!(
            findings.errors(),
            &["Local business must have an address".to_string()]
        );
        assert_eq!(findings.warnings().len(), 1);
        assert_eq!(
            findings.recommendations(),
            &["Add geo coordinates for better local search visibility".to_string()]
        );
    }

    #[test]
    fn test_local_business_complete() {
        let address = node("PostalAddress")
            .with_property("addressLocality", Value::text("Springfield"))
            .with_property("addressCountry", Value::text("US"));
        let geo = node("GeoCoordinates").with_property("latitude", Value::Number(1.0));
        let item = node("LocalBusiness")
            .with_property("address", Value::item(address))
            .with_property("openingHours", Value::text("Mo-Fr 09:00-17:00"))
            .with_property("geo", Value::item(geo));
        let findings = run(validate_local_business, &item);
        assert!(findings.errors().is_empty());
        assert!(findings.warnings().is_empty());
        assert!(findings.recommendations().is_empty());
    }
}
