//! Microdata parsing.

use super::attributes::AttributeVocabulary;
use super::FormatParser;
use crate::extract::{FragmentContent, RawFragment};
use crate::models::{Encoding, SchemaItem};

const MICRODATA: AttributeVocabulary = AttributeVocabulary {
    encoding: Encoding::Microdata,
    scope: "itemscope",
    type_attr: "itemtype",
    property: "itemprop",
    id_attrs: &["itemid"],
};

/// Parser for `itemscope`/`itemtype`/`itemprop` trees.
///
/// The type name is the last path segment of `itemtype`
/// (`https://schema.org/Product` → `Product`).
pub struct MicrodataParser;

impl FormatParser for MicrodataParser {
    fn encoding(&self) -> Encoding {
        Encoding::Microdata
    }

    fn parse(&self, fragment: &RawFragment<'_>) -> Vec<SchemaItem> {
        let item = match &fragment.content {
            FragmentContent::Element(root) => MICRODATA.parse_scope(*root),
            FragmentContent::Text(_) => SchemaItem::unparsed(
                Encoding::Microdata,
                "Microdata fragment has no element tree",
            ),
        };
        vec![item.with_location(fragment.location.clone())]
    }
}
