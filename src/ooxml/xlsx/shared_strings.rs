//! Shared strings table for spreadsheet decoding.
//!
//! Cells of type `s` hold a zero-based index into this table instead of their
//! text. The table is only read, never written: the encoder emits inline
//! strings.

use crate::common::xml::{push_entity, push_text};
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// Which text buffer a `<t>` element feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// `<t>` directly under the string item
    Direct,
    /// `<r><t>`
    Run,
}

/// Position inside one string item (`<si>` or a cell's `<is>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemScope {
    Top,
    Run,
    Phonetic,
    Text(Target),
}

/// Accumulates the text of a string item.
///
/// The direct `<t>` text wins when non-empty; otherwise the `<r><t>` run texts
/// are concatenated. Text under `<rPh>` is skipped.
#[derive(Debug)]
pub(crate) struct RichText {
    scope: ItemScope,
    direct: String,
    runs: String,
}

impl RichText {
    pub(crate) fn new() -> Self {
        Self {
            scope: ItemScope::Top,
            direct: String::new(),
            runs: String::new(),
        }
    }

    /// Whether no child element of the item is open.
    #[inline]
    pub(crate) fn at_top(&self) -> bool {
        self.scope == ItemScope::Top
    }

    pub(crate) fn start(&mut self, local: &[u8]) {
        self.scope = match (self.scope, local) {
            (ItemScope::Top, b"t") => ItemScope::Text(Target::Direct),
            (ItemScope::Top, b"r") => ItemScope::Run,
            (ItemScope::Top, b"rPh") => ItemScope::Phonetic,
            (ItemScope::Run, b"t") => ItemScope::Text(Target::Run),
            (other, _) => other,
        };
    }

    pub(crate) fn end(&mut self, local: &[u8]) {
        self.scope = match (self.scope, local) {
            (ItemScope::Text(Target::Direct), b"t") => ItemScope::Top,
            (ItemScope::Text(Target::Run), b"t") => ItemScope::Run,
            (ItemScope::Run, b"r") | (ItemScope::Phonetic, b"rPh") => ItemScope::Top,
            (other, _) => other,
        };
    }

    fn buffer(&mut self) -> Option<&mut String> {
        match self.scope {
            ItemScope::Text(Target::Direct) => Some(&mut self.direct),
            ItemScope::Text(Target::Run) => Some(&mut self.runs),
            _ => None,
        }
    }

    pub(crate) fn text(&mut self, raw: &[u8]) {
        if let Some(buf) = self.buffer() {
            push_text(buf, raw);
        }
    }

    pub(crate) fn entity(&mut self, raw: &[u8]) {
        if let Some(buf) = self.buffer() {
            push_entity(buf, raw);
        }
    }

    /// Take the item's text and reset for the next item.
    pub(crate) fn finish(&mut self) -> String {
        self.scope = ItemScope::Top;
        let text = if self.direct.is_empty() {
            std::mem::take(&mut self.runs)
        } else {
            std::mem::take(&mut self.direct)
        };
        self.direct.clear();
        self.runs.clear();
        text
    }
}

/// Ordered list of strings from `xl/sharedStrings.xml`.
#[derive(Debug, Default, Clone)]
pub struct SharedStrings {
    strings: Vec<String>,
}

impl SharedStrings {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table from an optional part; an absent part is an empty table.
    pub fn from_part(part: Option<&[u8]>) -> Result<Self> {
        match part {
            Some(xml) => Self::parse(xml),
            None => Ok(Self::new()),
        }
    }

    /// Parse the contents of a shared-strings part.
    ///
    /// Each `<si>` gives one entry: its direct `<t>` text when that is
    /// non-empty, otherwise the concatenated `<r><t>` run texts. Phonetic
    /// (`<rPh>`) runs are skipped.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(false);

        let mut strings = Vec::new();
        let mut item: Option<RichText> = None;
        let mut depth = 0usize;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    depth += 1;
                    let local = e.local_name();
                    match item.as_mut() {
                        Some(rich) => rich.start(local.as_ref()),
                        None if local.as_ref() == b"si" => item = Some(RichText::new()),
                        None => {},
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    if item.is_none() && e.local_name().as_ref() == b"si" {
                        strings.push(String::new());
                    }
                },
                Ok(Event::Text(ref e)) => {
                    if let Some(rich) = item.as_mut() {
                        rich.text(e.as_ref());
                    }
                },
                Ok(Event::CData(ref e)) => {
                    if let Some(rich) = item.as_mut() {
                        rich.text(e.as_ref());
                    }
                },
                Ok(Event::GeneralRef(ref e)) => {
                    if let Some(rich) = item.as_mut() {
                        rich.entity(e.as_ref());
                    }
                },
                Ok(Event::End(ref e)) => {
                    depth = depth.saturating_sub(1);
                    let local = e.local_name();
                    match item.as_mut() {
                        Some(rich) if rich.at_top() && local.as_ref() == b"si" => {
                            strings.push(rich.finish());
                            item = None;
                        },
                        Some(rich) => rich.end(local.as_ref()),
                        None => {},
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::MalformedSharedStrings(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        if depth != 0 {
            return Err(OoxmlError::MalformedSharedStrings(
                "unexpected end of part".to_string(),
            ));
        }

        log::trace!("parsed {} shared strings", strings.len());
        Ok(Self { strings })
    }

    /// Get a string by its zero-based index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.strings.get(index).map(String::as_str)
    }

    /// Resolve the raw `<v>` text of an `s` cell.
    ///
    /// Returns `None` for a non-numeric or out-of-range index.
    pub fn resolve(&self, raw: &str) -> Option<&str> {
        let index = atoi_simd::parse::<u32, false, false>(raw.trim().as_bytes()).ok()?;
        self.get(index as usize)
    }

    /// Get the number of strings in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
