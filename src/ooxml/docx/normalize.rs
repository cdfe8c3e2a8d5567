//! Normalization of lightweight HTML-like input into paragraphs.
//!
//! The pipeline runs in a fixed order: line endings are unified, `<br>`
//! becomes a newline, closing block tags become a blank line, opening block
//! tags and then every other tag are stripped, and finally HTML entities are
//! decoded. The resulting text is split into paragraphs at blank lines.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Block-level elements whose closing tag ends a paragraph.
const BLOCK_ELEMENTS: &str = "p|div|h[1-6]|li|blockquote|pre|tr|table|ul|ol|section|article";

/// How consecutive non-blank lines inside one paragraph are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SoftBreak {
    /// Keep them as explicit line breaks (`'\n'`)
    #[default]
    LineBreak,
    /// Join them with a single space
    Space,
}

impl SoftBreak {
    fn separator(self) -> &'static str {
        match self {
            SoftBreak::LineBreak => "\n",
            SoftBreak::Space => " ",
        }
    }
}

/// Options for [`TextNormalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizerConfig {
    pub soft_breaks: SoftBreak,
}

/// Compiled normalization pipeline.
///
/// Immutable once built, so one instance can serve any number of concurrent
/// encodes by shared reference.
#[derive(Debug)]
pub struct TextNormalizer {
    config: NormalizerConfig,
    line_endings: Regex,
    breaks: Regex,
    block_close: Regex,
    block_open: Regex,
    tags: Regex,
}

/// Normalizer with the default configuration, compiled on first use.
pub static DEFAULT_NORMALIZER: Lazy<TextNormalizer> =
    Lazy::new(|| TextNormalizer::new(NormalizerConfig::default()));

impl TextNormalizer {
    /// Compile the pipeline for `config`.
    pub fn new(config: NormalizerConfig) -> Self {
        // Constant patterns; compilation cannot fail
        let compile = |pattern: &str| Regex::new(pattern).expect("invalid normalizer pattern");

        Self {
            config,
            line_endings: compile(r"\r\n?"),
            breaks: compile(r"(?i)<br\s*/?>"),
            block_close: compile(&format!(r"(?i)</(?:{})\s*>", BLOCK_ELEMENTS)),
            block_open: compile(&format!(r"(?i)<(?:{})(?:\s[^>]*)?>", BLOCK_ELEMENTS)),
            tags: compile(r"</?[A-Za-z][^>]*>"),
        }
    }

    /// The configuration this normalizer was built with.
    #[inline]
    pub fn config(&self) -> NormalizerConfig {
        self.config
    }

    /// Run the markup pipeline, returning plain text with `'\n'` line ends.
    pub fn normalize<'t>(&self, input: &'t str) -> Cow<'t, str> {
        let text = self.line_endings.replace_all(input, "\n");
        let text = replace_owned(&self.breaks, text, "\n");
        let text = replace_owned(&self.block_close, text, "\n\n");
        let text = replace_owned(&self.block_open, text, "");
        let text = replace_owned(&self.tags, text, "");

        match text {
            Cow::Borrowed(s) => html_escape::decode_html_entities(s),
            Cow::Owned(s) => Cow::Owned(html_escape::decode_html_entities(&s).into_owned()),
        }
    }

    /// Split input into paragraphs.
    ///
    /// Lines are trimmed; blank lines end a paragraph and the lines between
    /// them are joined per [`SoftBreak`]. Input with no visible text gives
    /// exactly one empty paragraph.
    pub fn paragraphs(&self, input: &str) -> Vec<String> {
        let text = self.normalize(input);
        let separator = self.config.soft_breaks.separator();

        let mut paragraphs = Vec::new();
        let mut lines: Vec<&str> = Vec::new();

        for line in text.split('\n').map(str::trim) {
            if line.is_empty() {
                if !lines.is_empty() {
                    paragraphs.push(lines.join(separator));
                    lines.clear();
                }
            } else {
                lines.push(line);
            }
        }
        if !lines.is_empty() {
            paragraphs.push(lines.join(separator));
        }

        if paragraphs.is_empty() {
            paragraphs.push(String::new());
        }

        paragraphs
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizerConfig::default())
    }
}

/// `replace_all` over a `Cow`, borrowing from the original input while nothing matched.
fn replace_owned<'t>(re: &Regex, text: Cow<'t, str>, rep: &str) -> Cow<'t, str> {
    match text {
        Cow::Borrowed(s) => re.replace_all(s, rep),
        Cow::Owned(s) => match re.replace_all(&s, rep) {
            Cow::Borrowed(_) => Cow::Owned(s),
            Cow::Owned(replaced) => Cow::Owned(replaced),
        },
    }
}
