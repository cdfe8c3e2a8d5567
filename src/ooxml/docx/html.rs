//! Rendering of decoded paragraphs as lightweight HTML.
//!
//! Each paragraph becomes one `<p>` block with its text HTML-escaped and its
//! explicit line breaks rendered as `<br/>`. Blocks are concatenated without
//! separators.

/// Render paragraphs as concatenated `<p>` blocks.
///
/// An empty slice renders as an empty string.
pub fn paragraphs_to_html<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let capacity = paragraphs.iter().map(|p| p.as_ref().len() + 16).sum();
    let mut html = String::with_capacity(capacity);

    for paragraph in paragraphs {
        html.push_str("<p>");
        for (i, line) in paragraph.as_ref().split('\n').enumerate() {
            if i > 0 {
                html.push_str("<br/>");
            }
            html.push_str(html_escape::encode_quoted_attribute(line).as_ref());
        }
        html.push_str("</p>");
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocks_and_breaks() {
        assert_eq!(
            paragraphs_to_html(&["line1\nline2", "next"]),
            "<p>line1<br/>line2</p><p>next</p>"
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let html = paragraphs_to_html(&["<b>Tom & \"Jerry\"</b>"]);
        assert!(html.starts_with("<p>&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;"));
        assert!(!html[3..html.len() - 4].contains('<'));
    }

    #[test]
    fn test_empty() {
        assert_eq!(paragraphs_to_html::<String>(&[]), "");
    }
}
