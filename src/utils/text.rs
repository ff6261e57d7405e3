//! Text helpers.

/// Truncates `text` to at most `max_bytes`, backing off to a char boundary.
pub fn truncate_to_boundary(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Reduces a vocabulary term to its local name.
///
/// `https://schema.org/Product` → `Product`, `schema:name` → `name`,
/// `Event` → `Event`.
pub fn local_name(term: &str) -> &str {
    let term = term.trim().trim_end_matches(['/', '#']);
    if let Some(pos) = term.rfind(['/', '#']) {
        return &term[pos + 1..];
    }
    match term.rfind(':') {
        Some(pos) => &term[pos + 1..],
        None => term,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let text = "héllo";
        // 'é' occupies bytes 1..3; cutting at 2 must back off to 1
        assert_eq!(truncate_to_boundary(text, 2), "h");
        assert_eq!(truncate_to_boundary(text, 100), "héllo");
        assert_eq!(truncate_to_boundary(text, 0), "");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Acme \n\t Corp  "), "Acme Corp");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_local_name() {
        assert_eq!(local_name("https://schema.org/Product"), "Product");
        assert_eq!(local_name("http://schema.org/Product/"), "Product");
        assert_eq!(local_name("http://xmlns.com/foaf/0.1/#Person"), "Person");
        assert_eq!(local_name("schema:name"), "name");
        assert_eq!(local_name(" Event "), "Event");
    }
}
