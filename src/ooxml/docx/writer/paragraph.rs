//! Paragraph and run generation for the document body.
use crate::common::xml::escape_xml;
use std::fmt::Write as FmtWrite;

/// Append one `<w:p>` element for `text`.
///
/// Empty text gives a self-closing `<w:p/>`. Otherwise each line becomes its
/// own run, lines are separated by `<w:r><w:br/></w:r>` and tabs inside a line
/// become `<w:tab/>`.
pub fn write_paragraph(xml: &mut String, text: &str) {
    if text.is_empty() {
        xml.push_str("<w:p/>");
        return;
    }

    xml.push_str("<w:p>");
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            xml.push_str("<w:r><w:br/></w:r>");
        }
        if !line.is_empty() {
            write_run(xml, line);
        }
    }
    xml.push_str("</w:p>");
}

/// Append a single run holding one line of text.
fn write_run(xml: &mut String, line: &str) {
    xml.push_str("<w:r>");
    for (i, segment) in line.split('\t').enumerate() {
        if i > 0 {
            xml.push_str("<w:tab/>");
        }
        if !segment.is_empty() {
            let _ = write!(xml, r#"<w:t xml:space="preserve">{}</w:t>"#, escape_xml(segment));
        }
    }
    xml.push_str("</w:r>");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> String {
        let mut xml = String::new();
        write_paragraph(&mut xml, text);
        xml
    }

    #[test]
    fn test_empty_paragraph() {
        assert_eq!(paragraph(""), "<w:p/>");
    }

    #[test]
    fn test_single_run() {
        assert_eq!(
            paragraph("Hello"),
            r#"<w:p><w:r><w:t xml:space="preserve">Hello</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_line_breaks_between_runs() {
        assert_eq!(
            paragraph("line1\nline2"),
            concat!(
                r#"<w:p><w:r><w:t xml:space="preserve">line1</w:t></w:r>"#,
                "<w:r><w:br/></w:r>",
                r#"<w:r><w:t xml:space="preserve">line2</w:t></w:r></w:p>"#
            )
        );
    }

    #[test]
    fn test_tabs() {
        assert_eq!(
            paragraph("a\tb"),
            r#"<w:p><w:r><w:t xml:space="preserve">a</w:t><w:tab/><w:t xml:space="preserve">b</w:t></w:r></w:p>"#
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let xml = paragraph(r#"<script>"Tom" & 'Jerry'</script>"#);
        assert!(!xml.contains("<script>"));
        assert!(xml.contains("&lt;script&gt;"));
        assert!(xml.contains("&amp;"));
        assert!(xml.contains("&quot;Tom&quot;"));
    }
}
