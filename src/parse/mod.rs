//! Format parsers.
//!
//! Each structured-data encoding has a [`FormatParser`] that turns raw
//! fragments into [`SchemaItem`]s, so everything downstream is
//! format-agnostic:
//! - JSON-LD (`json_ld`)
//! - Microdata (`microdata`)
//! - RDFa (`rdfa`)
//!
//! Parsers never fail: an undecodable fragment becomes an unparsed
//! placeholder item carrying the parse error.

mod attributes;
mod json_ld;
mod microdata;
mod rdfa;

use log::debug;

use crate::extract::RawFragment;
use crate::models::{Encoding, SchemaItem};

pub use json_ld::JsonLdParser;
pub use microdata::MicrodataParser;
pub use rdfa::RdfaParser;

/// Normalizes fragments of one encoding into items.
pub trait FormatParser: Send + Sync {
    /// The encoding this parser accepts.
    fn encoding(&self) -> Encoding;

    /// Parses one fragment. A fragment may yield several items (JSON-LD
    /// arrays and `@graph` containers) or a single unparsed placeholder.
    fn parse(&self, fragment: &RawFragment<'_>) -> Vec<SchemaItem>;
}

/// The built-in parsers, one per encoding, in extraction order.
pub fn default_parsers() -> Vec<Box<dyn FormatParser>> {
    vec![
        Box::new(JsonLdParser),
        Box::new(MicrodataParser),
        Box::new(RdfaParser),
    ]
}

/// Runs each fragment through the parser registered for its encoding.
///
/// Output order follows fragment order. Fragments with no matching parser are
/// skipped.
pub fn parse_fragments(
    parsers: &[Box<dyn FormatParser>],
    fragments: &[RawFragment<'_>],
) -> Vec<SchemaItem> {
    let mut items = Vec::new();
    for fragment in fragments {
        match parsers.iter().find(|p| p.encoding() == fragment.encoding) {
            Some(parser) => items.extend(parser.parse(fragment)),
            None => debug!("No parser registered for {} fragment", fragment.encoding),
        }
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MARKUP_BYTES;
    use crate::extract::{extract_fragments, parse_html};

    #[test]
    fn test_parse_fragments_mixed_document() {
        let html = r#"
            <script type="application/ld+json">[{"@type": "WebSite", "name": "S"}, {"@type": "WebPage", "name": "P"}]</script>
            <div itemscope itemtype="https://schema.org/Person"><span itemprop="name">Ann</span></div>
            <p vocab="https://schema.org/" typeof="Event"><span property="name">Launch</span></p>
        "#;
        let document = parse_html(html, MAX_MARKUP_BYTES);
        let fragments = extract_fragments(&document, None);
        let items = parse_fragments(&default_parsers(), &fragments);

        let types: Vec<Option<&str>> = items.iter().map(|i| i.schema_type()).collect();
        assert_eq!(
            types,
            vec![Some("WebSite"), Some("WebPage"), Some("Person"), Some("Event")]
        );
        assert_eq!(items[2].encoding(), Encoding::Microdata);
        assert_eq!(items[3].encoding(), Encoding::Rdfa);
    }

    #[test]
    fn test_missing_parser_skips_fragment() {
        let html = r#"<div itemscope itemtype="https://schema.org/Person"></div>"#;
        let document = parse_html(html, MAX_MARKUP_BYTES);
        let fragments = extract_fragments(&document, None);
        let parsers: Vec<Box<dyn FormatParser>> = vec![Box::new(JsonLdParser)];
        assert!(parse_fragments(&parsers, &fragments).is_empty());
    }
}
