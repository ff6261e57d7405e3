//! Normalized structured-data items.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Structured-data encoding a fragment was found in.
///
/// The declaration order is also the extraction order: linked-data blocks
/// first, then micro-attribute trees, then RDF-attribute trees.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    ValueEnum,
)]
pub enum Encoding {
    /// `<script type="application/ld+json">` blocks
    #[serde(rename = "json-ld")]
    #[strum(serialize = "json-ld")]
    #[value(name = "json-ld")]
    JsonLd,
    /// `itemscope` / `itemtype` / `itemprop` attributes
    #[serde(rename = "microdata")]
    #[strum(serialize = "microdata")]
    #[value(name = "microdata")]
    Microdata,
    /// `typeof` / `property` attributes
    #[serde(rename = "rdfa")]
    #[strum(serialize = "rdfa")]
    #[value(name = "rdfa")]
    Rdfa,
}

/// Where in the document a fragment came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Element name of the fragment root (`script`, `div`, ...)
    pub tag: String,
    /// Document-order index among fragments of the same encoding
    pub ordinal: usize,
}

/// A property value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Bool(bool),
    /// A nested item (`author: {"@type": "Person", ...}` or a nested `itemscope`)
    Item(Box<SchemaItem>),
    List(Vec<Value>),
}

impl Value {
    /// Convenience constructor for text values.
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(value.into())
    }

    /// Convenience constructor for nested items.
    pub fn item(item: SchemaItem) -> Self {
        Value::Item(Box::new(item))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_item(&self) -> Option<&SchemaItem> {
        match self {
            Value::Item(item) => Some(item),
            _ => None,
        }
    }

    /// True for blank text and empty lists; numbers, booleans and items are never empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Text(s) => s.trim().is_empty(),
            Value::List(values) => values.iter().all(Value::is_empty),
            Value::Number(_) | Value::Bool(_) | Value::Item(_) => false,
        }
    }

    /// Iterates a single value or the members of a list (one level deep).
    pub fn members(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Value::List(values) => Box::new(values.iter()),
            other => Box::new(std::iter::once(other)),
        }
    }

    /// Merges a repeated property occurrence into a list.
    pub(crate) fn push(self, next: Value) -> Value {
        match self {
            Value::List(mut values) => {
                values.push(next);
                Value::List(values)
            }
            single => Value::List(vec![single, next]),
        }
    }
}

/// One structured-data item, independent of the encoding it came from.
///
/// Items are assembled with the consuming `with_*` builders and are not
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaItem {
    schema_type: Option<String>,
    id: Option<String>,
    properties: Vec<(String, Value)>,
    encoding: Encoding,
    location: Option<SourceLocation>,
    parse_error: Option<String>,
}

impl SchemaItem {
    pub fn new(encoding: Encoding) -> Self {
        Self {
            schema_type: None,
            id: None,
            properties: Vec::new(),
            encoding,
            location: None,
            parse_error: None,
        }
    }

    /// Placeholder for a fragment that could not be decoded.
    pub fn unparsed(encoding: Encoding, error: impl Into<String>) -> Self {
        Self {
            parse_error: Some(error.into()),
            ..Self::new(encoding)
        }
    }

    pub fn with_type(mut self, schema_type: impl Into<String>) -> Self {
        let schema_type = schema_type.into();
        let trimmed = schema_type.trim();
        self.schema_type = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Adds a property. A repeated name turns the stored value into a list,
    /// keeping first-seen order.
    pub fn with_property(mut self, name: impl Into<String>, value: Value) -> Self {
        let name = name.into();
        if let Some(slot) = self.properties.iter_mut().find(|(n, _)| *n == name) {
            let previous = std::mem::replace(&mut slot.1, Value::List(Vec::new()));
            slot.1 = previous.push(value);
        } else {
            self.properties.push((name, value));
        }
        self
    }

    pub fn schema_type(&self) -> Option<&str> {
        self.schema_type.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        self.location.as_ref()
    }

    pub fn parsed(&self) -> bool {
        self.parse_error.is_none()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// True when the property exists and is not empty.
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(|v| !v.is_empty())
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.schema_type.is_none() && self.id.is_none() && self.properties.is_empty()
    }
}
