//! RDFa parsing.

use super::attributes::AttributeVocabulary;
use super::FormatParser;
use crate::extract::{FragmentContent, RawFragment};
use crate::models::{Encoding, SchemaItem};

const RDFA: AttributeVocabulary = AttributeVocabulary {
    encoding: Encoding::Rdfa,
    scope: "typeof",
    type_attr: "typeof",
    property: "property",
    id_attrs: &["resource", "about"],
};

/// Parser for `typeof`/`property` trees.
///
/// CURIE prefixes are dropped from type and property names
/// (`schema:Product` → `Product`).
pub struct RdfaParser;

impl FormatParser for RdfaParser {
    fn encoding(&self) -> Encoding {
        Encoding::Rdfa
    }

    fn parse(&self, fragment: &RawFragment<'_>) -> Vec<SchemaItem> {
        let item = match &fragment.content {
            FragmentContent::Element(root) => RDFA.parse_scope(*root),
            FragmentContent::Text(_) => {
                SchemaItem::unparsed(Encoding::Rdfa, "RDFa fragment has no element tree")
            }
        };
        vec![item.with_location(fragment.location.clone())]
    }
}
