/// DocumentPart - the main document.xml part of a word-processing package.
use crate::common::xml::{attr_value, resolve_entity};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackURI;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// Where the reader is relative to paragraph content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between paragraphs
    Outside,
    /// Inside `<w:p>`, outside any text element
    Paragraph,
    /// Inside `<w:pPr>`, whose `<w:tab>` entries are tab stops, not tabs
    Properties,
    /// Inside `<w:t>`; `preserve` mirrors `xml:space="preserve"`
    Text { preserve: bool },
}

/// The main document part.
///
/// This corresponds to the `/word/document.xml` part in the package.
pub struct DocumentPart<'a> {
    /// Partname, for error messages
    partname: PackURI,
    /// The raw XML of the part
    xml: &'a [u8],
}

impl<'a> DocumentPart<'a> {
    /// Wrap the XML of a document part.
    pub fn new(partname: PackURI, xml: &'a [u8]) -> Self {
        Self { partname, xml }
    }

    /// Get the XML bytes of the document.
    #[inline]
    pub fn xml_bytes(&self) -> &[u8] {
        self.xml
    }

    /// Get the partname of the document.
    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// Extract the text of every non-empty paragraph, in document order.
    ///
    /// `<w:br/>` and `<w:cr/>` become `'\n'` and `<w:tab/>` becomes `'\t'`.
    /// Carriage returns are stripped from text not marked
    /// `xml:space="preserve"`. Each paragraph is trimmed and dropped if
    /// nothing is left, so blank paragraphs do not survive decoding.
    /// Paragraphs nested inside a paragraph (text boxes) are folded into the
    /// enclosing one.
    pub fn paragraphs(&self) -> Result<Vec<String>> {
        let mut reader = Reader::from_reader(self.xml);
        reader.config_mut().trim_text(false);

        let mut paragraphs = Vec::new();
        let mut current = String::new();
        let mut state = State::Outside;
        let mut nested = 0usize;
        let mut depth = 0usize;
        let mut buf = Vec::with_capacity(512);

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    state = match (state, e.local_name().as_ref()) {
                        (State::Outside, b"p") => {
                            current.clear();
                            State::Paragraph
                        },
                        (State::Paragraph, b"p") => {
                            nested += 1;
                            State::Paragraph
                        },
                        (State::Paragraph, b"pPr") => State::Properties,
                        (State::Paragraph, b"t") => State::Text {
                            preserve: self.preserves_space(e)?,
                        },
                        (State::Paragraph, name) => {
                            push_marker(&mut current, name);
                            State::Paragraph
                        },
                        (other, _) => other,
                    };
                },
                Ok(Event::Empty(ref e)) => {
                    if state == State::Paragraph {
                        push_marker(&mut current, e.local_name().as_ref());
                    }
                },
                Ok(Event::Text(ref e)) => {
                    if let State::Text { preserve } = state {
                        push_run_text(&mut current, &String::from_utf8_lossy(e.as_ref()), preserve);
                    }
                },
                Ok(Event::CData(ref e)) => {
                    if let State::Text { preserve } = state {
                        push_run_text(&mut current, &String::from_utf8_lossy(e.as_ref()), preserve);
                    }
                },
                Ok(Event::GeneralRef(ref e)) => {
                    if let State::Text { preserve } = state
                        && let Some(c) = resolve_entity(&String::from_utf8_lossy(e.as_ref()))
                        && (preserve || c != '\r')
                    {
                        current.push(c);
                    }
                },
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    state = match (state, e.local_name().as_ref()) {
                        (State::Text { .. }, b"t") | (State::Properties, b"pPr") => State::Paragraph,
                        (State::Paragraph, b"p") if nested > 0 => {
                            nested -= 1;
                            State::Paragraph
                        },
                        (State::Paragraph, b"p") => {
                            let text = current.trim();
                            if !text.is_empty() {
                                paragraphs.push(text.to_string());
                            }
                            State::Outside
                        },
                        (other, _) => other,
                    };
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(self.malformed(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(self.malformed("unexpected end of part".to_string()));
        }

        log::trace!("read {} paragraphs from {}", paragraphs.len(), self.partname);
        Ok(paragraphs)
    }

    /// Count the `<w:p>` elements in the document, including empty ones.
    pub fn paragraph_count(&self) -> Result<usize> {
        let mut reader = Reader::from_reader(self.xml);
        reader.config_mut().trim_text(true);

        let mut count = 0;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    if e.local_name().as_ref() == b"p" {
                        count += 1;
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(self.malformed(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        Ok(count)
    }

    fn preserves_space(&self, e: &BytesStart<'_>) -> Result<bool> {
        let space = attr_value(e, b"space").map_err(|message| self.malformed(message))?;
        Ok(space.as_deref() == Some("preserve"))
    }

    fn malformed(&self, message: String) -> OoxmlError {
        OoxmlError::MalformedXml {
            part: self.partname.to_string(),
            message,
        }
    }
}

/// Append the character a run-level marker element stands for.
#[inline]
fn push_marker(buf: &mut String, local: &[u8]) {
    match local {
        b"br" | b"cr" => buf.push('\n'),
        b"tab" => buf.push('\t'),
        _ => {},
    }
}

/// Append `<w:t>` content, stripping carriage returns unless space is preserved.
#[inline]
fn push_run_text(buf: &mut String, text: &str, preserve: bool) {
    if preserve {
        buf.push_str(text);
    } else {
        buf.extend(text.chars().filter(|&c| c != '\r'));
    }
}
