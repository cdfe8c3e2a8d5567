/// Word (.docx) document support.
///
/// Decoding extracts the text of each non-empty paragraph; encoding turns
/// plain text or simple block markup into a minimal package with one body
/// part.
///
/// # Architecture
///
/// - `Package`: a .docx package opened from bytes
/// - `DocumentPart`: the document.xml part and its paragraph reader
/// - `TextNormalizer`: markup-to-paragraph normalization for encoding
/// - `DocumentWriter`: package serialization
/// - `paragraphs_to_html`: block rendering of decoded paragraphs
///
/// # Example
///
/// ```rust
/// use loquat::ooxml::docx::{DocumentWriter, Package, paragraphs_to_html};
///
/// let bytes = DocumentWriter::default().write_text("line1\nline2")?;
/// let package = Package::from_bytes(&bytes)?;
/// let paragraphs = package.document()?.paragraphs()?;
/// assert_eq!(paragraphs_to_html(&paragraphs), "<p>line1<br/>line2</p>");
/// # Ok::<(), loquat::OoxmlError>(())
/// ```
pub mod html;
pub mod normalize;
pub mod package;
pub mod parts;
pub mod writer;

pub use html::paragraphs_to_html;
pub use normalize::{DEFAULT_NORMALIZER, NormalizerConfig, SoftBreak, TextNormalizer};
pub use package::Package;
pub use parts::DocumentPart;
pub use writer::DocumentWriter;
