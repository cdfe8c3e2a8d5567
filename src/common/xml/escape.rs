use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// Safe for both text nodes and double- or single-quoted attribute values.
///
/// # Examples
///
/// ```
/// use loquat::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Resolve the body of an XML entity or character reference (`amp`, `#10`, `#x41`).
///
/// Returns `None` for names that are neither predefined entities nor valid
/// character references; callers drop those.
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        _ => {},
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };
    char::from_u32(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(escape_xml(r#"<a & 'b'>"#), "&lt;a &amp; &apos;b&apos;&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }

    #[test]
    fn test_resolve_predefined() {
        assert_eq!(resolve_entity("amp"), Some('&'));
        assert_eq!(resolve_entity("lt"), Some('<'));
        assert_eq!(resolve_entity("nbsp"), None);
    }

    #[test]
    fn test_resolve_char_refs() {
        assert_eq!(resolve_entity("#10"), Some('\n'));
        assert_eq!(resolve_entity("#x41"), Some('A'));
        assert_eq!(resolve_entity("#xZZ"), None);
        assert_eq!(resolve_entity("#"), None);
    }
}
