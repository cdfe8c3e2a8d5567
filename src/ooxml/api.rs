//! Byte-level entry points.
//!
//! Each call is all-or-nothing: either the full result is returned or an
//! error naming the step that failed. Calls share no mutable state
//! and can run concurrently.
//!
//! # Examples
//!
//! ```rust
//! use loquat::{Sheet, Workbook, decode_spreadsheet, encode_spreadsheet};
//!
//! let workbook = Workbook::new(vec![Sheet::new(
//!     "S1",
//!     vec![vec!["a".into(), "b".into()], vec!["c".into(), "".into()]],
//! )]);
//! let decoded = decode_spreadsheet(&encode_spreadsheet(&workbook)?)?;
//! assert_eq!(decoded.sheets[0].rows, vec![vec!["a", "b"], vec!["c"]]);
//! # Ok::<(), loquat::OoxmlError>(())
//! ```
//!
//! ```rust
//! use loquat::{decode_document_to_text, encode_document_from_text};
//!
//! let bytes = encode_document_from_text("line1\nline2")?;
//! assert_eq!(decode_document_to_text(&bytes)?, "<p>line1<br/>line2</p>");
//! # Ok::<(), loquat::OoxmlError>(())
//! ```

use crate::ooxml::docx::{DocumentWriter, Package, paragraphs_to_html};
use crate::ooxml::error::Result;
use crate::ooxml::xlsx::Workbook;

/// Decode a spreadsheet package into a [`Workbook`].
///
/// # Errors
/// See [`Workbook::from_bytes`].
pub fn decode_spreadsheet(data: &[u8]) -> Result<Workbook> {
    Workbook::from_bytes(data)
}

/// Encode a [`Workbook`] as a spreadsheet package.
///
/// # Errors
/// Returns `OoxmlError::EntrySerializationFailure` on a write fault.
pub fn encode_spreadsheet(workbook: &Workbook) -> Result<Vec<u8>> {
    workbook.to_bytes()
}

/// Decode a word-processing package into `<p>` blocks, one per non-empty paragraph.
///
/// A document without text gives an empty string.
///
/// # Errors
/// `OoxmlError::PackageUnreadable`, `OoxmlError::DocumentPartMissing` or
/// `OoxmlError::MalformedXml`.
pub fn decode_document_to_text(data: &[u8]) -> Result<String> {
    let package = Package::from_bytes(data)?;
    let paragraphs = package.document()?.paragraphs()?;
    Ok(paragraphs_to_html(&paragraphs))
}

/// Encode text, optionally carrying simple block markup, as a word-processing package.
///
/// # Errors
/// Returns `OoxmlError::EntrySerializationFailure` on a write fault.
pub fn encode_document_from_text(text: &str) -> Result<Vec<u8>> {
    DocumentWriter::default().write_text(text)
}
