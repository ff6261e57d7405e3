//! JSON-LD parsing.
//!
//! Decodes `<script type="application/ld+json">` text and converts the
//! resulting objects into [`SchemaItem`]s.

use log::debug;
use serde_json::{Map, Value as Json};

use super::FormatParser;
use crate::extract::{FragmentContent, RawFragment};
use crate::models::{Encoding, SchemaItem, Value};
use crate::utils::text::local_name;

/// Parser for JSON-LD blocks.
///
/// - A single object yields one item
/// - A top-level array or a `@graph` container yields one item per member
/// - `@type` arrays use their first string entry; `@id` becomes the item id
/// - Other `@` keywords and `null` values are dropped
pub struct JsonLdParser;

impl FormatParser for JsonLdParser {
    fn encoding(&self) -> Encoding {
        Encoding::JsonLd
    }

    fn parse(&self, fragment: &RawFragment<'_>) -> Vec<SchemaItem> {
        let text = match &fragment.content {
            FragmentContent::Text(text) => text.clone(),
            FragmentContent::Element(element) => element.text().collect(),
        };

        let items = match serde_json::from_str::<Json>(text.trim()) {
            Ok(json) => roots(json)
                .into_iter()
                .map(|root| match root {
                    Json::Object(map) => object_to_item(map),
                    other => SchemaItem::unparsed(
                        Encoding::JsonLd,
                        format!("Expected a JSON object, found {}", json_kind(&other)),
                    ),
                })
                .collect(),
            Err(e) => {
                debug!("Failed to decode JSON-LD block: {e}");
                vec![SchemaItem::unparsed(
                    Encoding::JsonLd,
                    format!("Invalid JSON-LD: {e}"),
                )]
            }
        };

        items
            .into_iter()
            .map(|item| item.with_location(fragment.location.clone()))
            .collect()
    }
}

/// Flattens top-level arrays and `@graph` containers into their members.
fn roots(json: Json) -> Vec<Json> {
    match json {
        Json::Array(values) => values.into_iter().flat_map(roots).collect(),
        Json::Object(mut map) if !map.contains_key("@type") && map.contains_key("@graph") => {
            match map.remove("@graph") {
                Some(graph) => roots(graph),
                None => Vec::new(),
            }
        }
        other => vec![other],
    }
}

fn object_to_item(map: Map<String, Json>) -> SchemaItem {
    let mut item = SchemaItem::new(Encoding::JsonLd);

    if let Some(schema_type) = map.get("@type").and_then(first_type) {
        item = item.with_type(schema_type);
    }
    if let Some(id) = map.get("@id").and_then(Json::as_str) {
        item = item.with_id(id);
    }

    for (name, value) in map {
        if name.starts_with('@') {
            continue;
        }
        if let Some(value) = convert(value) {
            item = item.with_property(name, value);
        }
    }
    item
}

/// First type name, reduced to its local name (`https://schema.org/Article` → `Article`).
fn first_type(value: &Json) -> Option<String> {
    let name = match value {
        Json::String(s) => s.as_str(),
        Json::Array(values) => values.iter().find_map(Json::as_str)?,
        _ => return None,
    };
    Some(local_name(name).to_string())
}

fn convert(value: Json) -> Option<Value> {
    match value {
        Json::Null => None,
        Json::Bool(b) => Some(Value::Bool(b)),
        Json::Number(n) => n.as_f64().map(Value::Number),
        Json::String(s) => Some(Value::Text(s)),
        Json::Array(values) => Some(Value::List(
            values.into_iter().filter_map(convert).collect(),
        )),
        // Value objects ({"@value": ..., "@language": ...}) collapse to their value
        Json::Object(mut map) if map.contains_key("@value") => {
            map.remove("@value").and_then(convert)
        }
        Json::Object(map) => Some(Value::item(object_to_item(map))),
    }
}

fn json_kind(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "a boolean",
        Json::Number(_) => "a number",
        Json::String(_) => "a string",
        Json::Array(_) => "an array",
        Json::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceLocation;

    fn fragment(text: &str) -> RawFragment<'static> {
        RawFragment {
            encoding: Encoding::JsonLd,
            content: FragmentContent::Text(text.to_string()),
            location: SourceLocation {
                tag: "script".to_string(),
                ordinal: 3,
            },
        }
    }

    #[test]
    fn test_single_object() {
        let items = JsonLdParser.parse(&fragment(
            r#"{"@context": "https://schema.org", "@type": "WebPage", "name": "Test Page"}"#,
        ));
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].schema_type(), Some("WebPage"));
        assert_eq!(items[0].get("name"), Some(&Value::text("Test Page")));
        assert!(items[0].get("@context").is_none());
        assert_eq!(items[0].location().map(|l| l.ordinal), Some(3));
    }

    #[test]
    fn test_array_is_flattened() {
        let items =
            JsonLdParser.parse(&fragment(r#"[{"@type": "WebPage"}, {"@type": "Organization"}]"#));
        let types: Vec<_> = items.iter().map(|i| i.schema_type()).collect();
        assert_eq!(types, vec![Some("WebPage"), Some("Organization")]);
    }

    #[test]
    fn test_graph_is_flattened() {
        let items = JsonLdParser.parse(&fragment(
            r#"{"@context": "https://schema.org", "@graph": [{"@type": "WebSite"}, {"@type": "BreadcrumbList"}]}"#,
        ));
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].schema_type(), Some("BreadcrumbList"));
    }

    #[test]
    fn test_type_array_uses_first_string() {
        let items = JsonLdParser.parse(&fragment(r#"{"@type": ["Article", "NewsArticle"]}"#));
        assert_eq!(items[0].schema_type(), Some("Article"));
    }

    #[test]
    fn test_type_iri_reduced_to_local_name() {
        let items = JsonLdParser.parse(&fragment(
            r#"[{"@type": "https://schema.org/Product"}, {"@type": "schema:Recipe"}]"#,
        ));
        assert_eq!(items[0].schema_type(), Some("Product"));
        assert_eq!(items[1].schema_type(), Some("Recipe"));
    }

    #[test]
    fn test_nested_objects_become_items() {
        let items = JsonLdParser.parse(&fragment(
            r#"{"@type": "Article", "author": {"@type": "Person", "@id": "https://e.x/#ann", "name": "Ann"}, "image": null}"#,
        ));
        let author = items[0].get("author").and_then(Value::as_item).expect("nested author");
        assert_eq!(author.schema_type(), Some("Person"));
        assert_eq!(author.id(), Some("https://e.x/#ann"));
        assert!(items[0].get("image").is_none());
    }

    #[test]
    fn test_value_objects_collapse() {
        let items = JsonLdParser.parse(&fragment(
            r#"{"@type": "Event", "name": {"@value": "Launch", "@language": "en"}}"#,
        ));
        assert_eq!(items[0].get("name"), Some(&Value::text("Launch")));
    }

    #[test]
    fn test_invalid_json_yields_placeholder() {
        let items = JsonLdParser.parse(&fragment(r#"{"@type": "Article", "headline": }"#));
        assert_eq!(items.len(), 1);
        assert!(!items[0].parsed());
        assert!(items[0]
            .parse_error()
            .is_some_and(|e| e.starts_with("Invalid JSON-LD")));
        assert!(items[0].location().is_some());
    }

    #[test]
    fn test_scalar_root_yields_placeholder() {
        let items = JsonLdParser.parse(&fragment(r#""just a string""#));
        assert!(!items[0].parsed());
        assert_eq!(
            items[0].parse_error(),
            Some("Expected a JSON object, found a string")
        );
    }
}
