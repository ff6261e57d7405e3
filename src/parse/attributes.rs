//! Shared tree walk for attribute-based encodings (microdata, RDFa).
//!
//! Both encodings mark a scope root with a type attribute and individual
//! properties with a property attribute; they differ only in attribute names.

use scraper::ElementRef;

use crate::models::{Encoding, SchemaItem, Value};
use crate::utils::text::{collapse_whitespace, local_name};

/// Nested scopes deeper than this are recorded as text values.
const MAX_SCOPE_DEPTH: usize = 32;

/// Attribute names used by one attribute-based encoding.
pub(crate) struct AttributeVocabulary {
    pub encoding: Encoding,
    /// Attribute whose presence opens a new scope
    pub scope: &'static str,
    /// Attribute carrying the type name (may equal `scope`)
    pub type_attr: &'static str,
    /// Attribute carrying property names
    pub property: &'static str,
    /// Attributes carrying the item identifier, in precedence order
    pub id_attrs: &'static [&'static str],
}

/// Value-bearing attributes, in precedence order, consulted before element text.
const VALUE_ATTRS: [&str; 4] = ["content", "href", "src", "datetime"];

impl AttributeVocabulary {
    /// Builds the item rooted at `root`.
    pub(crate) fn parse_scope(&self, root: ElementRef<'_>) -> SchemaItem {
        self.parse_scope_at(root, 0)
    }

    fn parse_scope_at(&self, root: ElementRef<'_>, depth: usize) -> SchemaItem {
        let element = root.value();
        let mut item = SchemaItem::new(self.encoding);

        if let Some(schema_type) = element
            .attr(self.type_attr)
            .and_then(|t| t.split_whitespace().next())
        {
            item = item.with_type(local_name(schema_type));
        }
        if let Some(id) = self
            .id_attrs
            .iter()
            .find_map(|attr| element.attr(attr))
            .filter(|id| !id.trim().is_empty())
        {
            item = item.with_id(id.trim());
        }

        for (name, value) in self.collect_properties(root, depth) {
            item = item.with_property(name, value);
        }
        item
    }

    /// Walks descendants of `root` in document order, stopping at nested scopes.
    ///
    /// A nested scope that is itself a property becomes a nested item; one
    /// that is not belongs to no property of this scope and is skipped.
    fn collect_properties(&self, root: ElementRef<'_>, depth: usize) -> Vec<(String, Value)> {
        let mut properties = Vec::new();
        let mut stack: Vec<ElementRef<'_>> = children(root).rev().collect();

        while let Some(element) = stack.pop() {
            let names = element.value().attr(self.property);
            let opens_scope = element.value().attr(self.scope).is_some();

            match (names, opens_scope) {
                (Some(names), true) => {
                    let value = if depth + 1 < MAX_SCOPE_DEPTH {
                        Value::item(self.parse_scope_at(element, depth + 1))
                    } else {
                        element_value(element)
                    };
                    push_named(&mut properties, names, value);
                }
                (Some(names), false) => {
                    push_named(&mut properties, names, element_value(element));
                    stack.extend(children(element).rev());
                }
                (None, true) => {}
                (None, false) => stack.extend(children(element).rev()),
            }
        }
        properties
    }
}

fn children<'a>(element: ElementRef<'a>) -> impl DoubleEndedIterator<Item = ElementRef<'a>> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .collect::<Vec<_>>()
        .into_iter()
}

/// Assigns `value` to each space-separated property name.
fn push_named(properties: &mut Vec<(String, Value)>, names: &str, value: Value) {
    for name in names.split_whitespace() {
        let name = local_name(name);
        if !name.is_empty() {
            properties.push((name.to_string(), value.clone()));
        }
    }
}

/// Extracts a property value: `content`, then `href`, then `src`, then
/// `datetime`, then the element's text.
fn element_value(element: ElementRef<'_>) -> Value {
    let attrs = element.value();
    if let Some(value) = VALUE_ATTRS.iter().find_map(|attr| attrs.attr(attr)) {
        return Value::text(value.trim());
    }
    let text: String = element.text().collect();
    Value::Text(collapse_whitespace(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    const VOCAB: AttributeVocabulary = AttributeVocabulary {
        encoding: Encoding::Microdata,
        scope: "itemscope",
        type_attr: "itemtype",
        property: "itemprop",
        id_attrs: &["itemid"],
    };

    fn root_item(html: &str) -> SchemaItem {
        let document = Html::parse_fragment(html);
        let selector = Selector::parse("[itemscope]").expect("static selector");
        let root = document.select(&selector).next().expect("root element");
        VOCAB.parse_scope(root)
    }

    #[test]
    fn test_value_precedence() {
        let item = root_item(
            r#"<div itemscope itemtype="https://schema.org/Event">
                <meta itemprop="a" content="from-content">
                <a itemprop="b" href="https://e.x/b" content="wins">link</a>
                <img itemprop="c" src="https://e.x/c.png">
                <time itemprop="d" datetime="2024-05-01">May 1</time>
                <span itemprop="e">  plain
                    text </span>
            </div>"#,
        );
        assert_eq!(item.get("a"), Some(&Value::text("from-content")));
        assert_eq!(item.get("b"), Some(&Value::text("wins")));
        assert_eq!(item.get("c"), Some(&Value::text("https://e.x/c.png")));
        assert_eq!(item.get("d"), Some(&Value::text("2024-05-01")));
        assert_eq!(item.get("e"), Some(&Value::text("plain text")));
    }

    #[test]
    fn test_nested_scope_is_isolated() {
        let item = root_item(
            r#"<div itemscope itemtype="https://schema.org/Organization" itemid="https://e.x/#org">
                <span itemprop="name">Acme</span>
                <div itemprop="address" itemscope itemtype="https://schema.org/PostalAddress">
                    <span itemprop="addressLocality">Springfield</span>
                    <span itemprop="name">Head office</span>
                </div>
                <div itemscope itemtype="https://schema.org/Person">
                    <span itemprop="jobTitle">Unrelated</span>
                </div>
            </div>"#,
        );
        assert_eq!(item.schema_type(), Some("Organization"));
        assert_eq!(item.id(), Some("https://e.x/#org"));
        assert_eq!(item.get("name"), Some(&Value::text("Acme")));
        assert!(item.get("jobTitle").is_none());

        let address = item.get("address").and_then(Value::as_item).expect("nested address");
        assert_eq!(address.schema_type(), Some("PostalAddress"));
        assert_eq!(address.get("addressLocality"), Some(&Value::text("Springfield")));
    }

    #[test]
    fn test_property_inside_plain_property_element_belongs_to_scope() {
        let item = root_item(
            r#"<div itemscope itemtype="https://schema.org/Product">
                <div itemprop="description"><span itemprop="name">Widget</span> is great</div>
            </div>"#,
        );
        assert_eq!(item.get("name"), Some(&Value::text("Widget")));
        assert_eq!(item.get("description"), Some(&Value::text("Widget is great")));
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let item = root_item(
            r#"<div itemscope itemtype="https://schema.org/Organization">
                <span itemprop="name"><b>Ex</b>ample <i>Corp</i></span>
            </div>"#,
        );
        assert_eq!(item.get("name"), Some(&Value::text("Example Corp")));
    }

    #[test]
    fn test_multiple_names_and_repeats() {
        let item = root_item(
            r#"<div itemscope itemtype="https://schema.org/Person">
                <span itemprop="name alternateName">Ann</span>
                <a itemprop="sameAs" href="https://a.example">a</a>
                <a itemprop="sameAs" href="https://b.example">b</a>
            </div>"#,
        );
        assert_eq!(item.get("alternateName"), Some(&Value::text("Ann")));
        assert_eq!(
            item.get("sameAs"),
            Some(&Value::List(vec![
                Value::text("https://a.example"),
                Value::text("https://b.example")
            ]))
        );
    }
}
