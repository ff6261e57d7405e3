//! Structured-data fragment extraction.
//!
//! This module scans an HTML document and yields every structured-data
//! fragment it contains, in a fixed order:
//! - JSON-LD blocks (`<script type="application/ld+json">`)
//! - Microdata roots (`itemscope` + `itemtype`)
//! - RDFa roots (`typeof`)
//!
//! Parsing goes through `scraper`/html5ever, which never rejects input:
//! unbalanced or unknown markup is repaired by the tree builder, so a broken
//! page still yields whatever fragments can be isolated from it.

use std::sync::LazyLock;

use log::debug;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Encoding, SourceLocation};
use crate::utils::parse_selector_unsafe;
use crate::utils::text::truncate_to_boundary;

const SCRIPT_SELECTOR_STR: &str = "script[type]";
const MICRODATA_SELECTOR_STR: &str = "[itemscope][itemtype]";
const RDFA_SELECTOR_STR: &str = "[typeof]";

static SCRIPT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(SCRIPT_SELECTOR_STR, "SCRIPT_SELECTOR"));
static MICRODATA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(MICRODATA_SELECTOR_STR, "MICRODATA_SELECTOR"));
static RDFA_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe(RDFA_SELECTOR_STR, "RDFA_SELECTOR"));

const JSON_LD_MIME: &str = "application/ld+json";

/// Content of a raw fragment.
#[derive(Debug, Clone)]
pub enum FragmentContent<'a> {
    /// Undecoded text of a JSON-LD block
    Text(String),
    /// Root element of a microdata or RDFa tree
    Element(ElementRef<'a>),
}

/// One structured-data fragment, not yet normalized.
#[derive(Debug, Clone)]
pub struct RawFragment<'a> {
    pub encoding: Encoding,
    pub content: FragmentContent<'a>,
    pub location: SourceLocation,
}

/// Parses (possibly truncated) HTML into a document.
///
/// Input longer than `max_bytes` is cut at the nearest char boundary first.
pub fn parse_html(raw: &str, max_bytes: usize) -> Html {
    let bounded = truncate_to_boundary(raw, max_bytes);
    if bounded.len() < raw.len() {
        debug!(
            "Markup truncated from {} to {} bytes before parsing",
            raw.len(),
            bounded.len()
        );
    }
    let document = Html::parse_document(bounded);
    if !document.errors.is_empty() {
        debug!(
            "HTML parser repaired {} structural problems",
            document.errors.len()
        );
    }
    document
}

/// Whether raw markup is a bare JSON document rather than HTML.
pub fn looks_like_json(raw: &str) -> bool {
    matches!(raw.trim_start().chars().next(), Some('{') | Some('['))
}

/// Wraps bare JSON-LD text (pasted without a `<script>` wrapper) as a fragment.
pub fn bare_json_ld(raw: &str, max_bytes: usize) -> RawFragment<'static> {
    RawFragment {
        encoding: Encoding::JsonLd,
        content: FragmentContent::Text(truncate_to_boundary(raw, max_bytes).trim().to_string()),
        location: SourceLocation {
            tag: "#document".to_string(),
            ordinal: 0,
        },
    }
}

/// Extracts every fragment of the requested encodings, in extraction order.
///
/// `only` restricts extraction to a single encoding. No markup found yields an
/// empty vector.
pub fn extract_fragments<'a>(document: &'a Html, only: Option<Encoding>) -> Vec<RawFragment<'a>> {
    let wanted = |encoding: Encoding| only.map_or(true, |o| o == encoding);
    let mut fragments = Vec::new();

    if wanted(Encoding::JsonLd) {
        fragments.extend(extract_json_ld(document));
    }
    if wanted(Encoding::Microdata) {
        fragments.extend(extract_roots(
            document,
            &MICRODATA_SELECTOR,
            Encoding::Microdata,
            "itemscope",
            "itemprop",
        ));
    }
    if wanted(Encoding::Rdfa) {
        fragments.extend(extract_roots(
            document,
            &RDFA_SELECTOR,
            Encoding::Rdfa,
            "typeof",
            "property",
        ));
    }

    debug!("Extracted {} structured-data fragments", fragments.len());
    fragments
}

fn extract_json_ld(document: &Html) -> Vec<RawFragment<'_>> {
    document
        .select(&SCRIPT_SELECTOR)
        .filter(|script| {
            script
                .value()
                .attr("type")
                .is_some_and(|t| t.trim().eq_ignore_ascii_case(JSON_LD_MIME))
        })
        .filter_map(|script| {
            let text: String = script.text().collect();
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .enumerate()
        .map(|(ordinal, text)| RawFragment {
            encoding: Encoding::JsonLd,
            content: FragmentContent::Text(text),
            location: SourceLocation {
                tag: "script".to_string(),
                ordinal,
            },
        })
        .collect()
}

/// Selects attribute-markup roots: candidates that are not a property of an
/// enclosing scope (those are parsed as nested items of that scope instead).
fn extract_roots<'a>(
    document: &'a Html,
    selector: &Selector,
    encoding: Encoding,
    scope_attr: &str,
    property_attr: &str,
) -> Vec<RawFragment<'a>> {
    document
        .select(selector)
        .filter(|element| {
            let is_property = element.value().attr(property_attr).is_some();
            !(is_property && has_scoped_ancestor(element, scope_attr))
        })
        .enumerate()
        .map(|(ordinal, element)| RawFragment {
            encoding,
            content: FragmentContent::Element(element),
            location: SourceLocation {
                tag: element.value().name().to_string(),
                ordinal,
            },
        })
        .collect()
}

fn has_scoped_ancestor(element: &ElementRef<'_>, scope_attr: &str) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| ancestor.value().attr(scope_attr).is_some())
}
