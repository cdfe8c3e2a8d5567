//! Word-processing package assembly.
//!
//! A written package holds exactly three parts, in this order: content
//! types, package relationships and the document body.

use crate::common::xml::XML_DECLARATION;
use crate::ooxml::docx::normalize::{DEFAULT_NORMALIZER, TextNormalizer};
use crate::ooxml::docx::package::DOCUMENT_PART;
use crate::ooxml::docx::writer::paragraph::write_paragraph;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI};
use crate::ooxml::opc::{ContentTypes, PackURI, PhysPkgWriter, Relationships, WriterOptions};
use std::fmt::Write as FmtWrite;

/// Writes text as a word-processing package.
///
/// The normalizer is borrowed, so one compiled instance can back any number
/// of writers.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::docx::{DocumentWriter, NormalizerConfig, SoftBreak, TextNormalizer};
/// use loquat::ooxml::opc::WriterOptions;
///
/// let normalizer = TextNormalizer::new(NormalizerConfig { soft_breaks: SoftBreak::Space });
/// let writer = DocumentWriter::new(&normalizer, WriterOptions::default());
/// let bytes = writer.write_text("<p>Hello</p><p>World</p>")?;
/// assert!(!bytes.is_empty());
/// # Ok::<(), loquat::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DocumentWriter<'n> {
    normalizer: &'n TextNormalizer,
    options: WriterOptions,
}

impl<'n> DocumentWriter<'n> {
    /// Create a writer using `normalizer` for text input.
    pub fn new(normalizer: &'n TextNormalizer, options: WriterOptions) -> Self {
        Self { normalizer, options }
    }

    /// Normalize `text` into paragraphs and serialize them.
    ///
    /// The package always contains at least one paragraph element, even for
    /// empty input.
    ///
    /// # Errors
    /// Returns [`OoxmlError::EntrySerializationFailure`] on a write fault.
    pub fn write_text(&self, text: &str) -> Result<Vec<u8>> {
        let paragraphs = self.normalizer.paragraphs(text);
        self.write_paragraphs(&paragraphs)
    }

    /// Serialize already-split paragraphs without normalizing them.
    ///
    /// # Errors
    /// Returns [`OoxmlError::EntrySerializationFailure`] on a write fault.
    pub fn write_paragraphs<S: AsRef<str>>(&self, paragraphs: &[S]) -> Result<Vec<u8>> {
        self.write_package(paragraphs)
            .map_err(OoxmlError::EntrySerializationFailure)
    }

    fn write_package<S: AsRef<str>>(&self, paragraphs: &[S]) -> std::result::Result<Vec<u8>, OpcError> {
        let document_uri = PackURI::new(DOCUMENT_PART).map_err(OpcError::InvalidPackUri)?;
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;

        let mut content_types = ContentTypes::new();
        content_types.add_override(&document_uri, ct::WML_DOCUMENT_MAIN);

        let mut package_rels = Relationships::new(package_uri.base_uri());
        package_rels.add(rt::OFFICE_DOCUMENT, document_uri.membername());

        let mut writer = PhysPkgWriter::with_options(self.options);
        writer.write(&content_types_uri, content_types.to_xml().as_bytes())?;
        writer.write(&package_uri.rels_uri(), package_rels.to_xml().as_bytes())?;
        writer.write(&document_uri, generate_document_xml(paragraphs).as_bytes())?;

        log::debug!("encoded document with {} paragraphs", paragraphs.len());
        writer.finish()
    }
}

impl Default for DocumentWriter<'static> {
    fn default() -> Self {
        Self::new(&DEFAULT_NORMALIZER, WriterOptions::default())
    }
}

/// Generate document.xml content.
pub fn generate_document_xml<S: AsRef<str>>(paragraphs: &[S]) -> String {
    let capacity: usize = paragraphs.iter().map(|p| p.as_ref().len() + 96).sum();
    let mut xml = String::with_capacity(256 + capacity);

    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<w:document xmlns:w="{}">"#, namespace::WML_MAIN);
    xml.push_str("<w:body>");
    for paragraph in paragraphs {
        write_paragraph(&mut xml, paragraph.as_ref());
    }
    xml.push_str("</w:body></w:document>");
    xml
}
