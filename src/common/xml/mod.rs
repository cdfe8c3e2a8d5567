//! Small helpers shared by the streaming XML readers and the string-built writers.

mod escape;

pub use escape::{escape_xml, resolve_entity};

use quick_xml::events::BytesStart;

/// Find an attribute by local name (namespace prefix ignored) and unescape its value.
///
/// Errors are rendered to strings so each caller can wrap them in the error
/// kind that names the part being parsed.
pub fn attr_value(e: &BytesStart<'_>, local: &[u8]) -> Result<Option<String>, String> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        if attr.key.local_name().as_ref() == local {
            let value = attr.unescape_value().map_err(|err| err.to_string())?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Append raw character data from a text or CDATA event.
#[inline]
pub fn push_text(buf: &mut String, raw: &[u8]) {
    buf.push_str(&String::from_utf8_lossy(raw));
}

/// Append the character an entity reference event stands for.
///
/// Unknown entities are dropped.
#[inline]
pub fn push_entity(buf: &mut String, raw: &[u8]) {
    if let Some(c) = resolve_entity(&String::from_utf8_lossy(raw)) {
        buf.push(c);
    }
}

/// Standard XML declaration emitted at the top of every generated part.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    #[test]
    fn test_attr_value_ignores_prefix() {
        let mut reader = Reader::from_reader(
            br#"<sheet name="A &amp; B" sheetId="2" r:id="rId7"/>"#.as_ref(),
        );
        let mut buf = Vec::new();
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(e)) => {
                assert_eq!(attr_value(&e, b"name").unwrap().as_deref(), Some("A & B"));
                assert_eq!(attr_value(&e, b"id").unwrap().as_deref(), Some("rId7"));
                assert_eq!(attr_value(&e, b"state").unwrap(), None);
            },
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_push_entity() {
        let mut buf = String::from("a ");
        push_entity(&mut buf, b"amp");
        push_entity(&mut buf, b"bogus");
        push_text(&mut buf, b" b");
        assert_eq!(buf, "a & b");
    }
}
