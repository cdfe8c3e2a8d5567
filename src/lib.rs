//! Loquat - a round-trip codec for Office Open XML packages
//!
//! Converts between spreadsheet (.xlsx) and word-processing (.docx) packages
//! and a plain in-memory model: named sheets of string rows, and paragraphs
//! of text.
//!
//! # Features
//!
//! - **Spreadsheet decode**: shared strings, inline strings and raw values, densified into rows
//! - **Spreadsheet encode**: inline-string cells only, deterministic output
//! - **Document decode**: paragraph text with line breaks, rendered as `<p>` blocks
//! - **Document encode**: plain text or simple block markup normalized into paragraphs
//! - **Streaming XML**: every part is read as a forward-only event stream
//!
//! # Example - Spreadsheets
//!
//! ```
//! use loquat::{Sheet, Workbook, decode_spreadsheet, encode_spreadsheet};
//!
//! # fn main() -> Result<(), loquat::OoxmlError> {
//! let workbook = Workbook::new(vec![Sheet::new("S1", vec![vec!["a".into(), "b".into()]])]);
//! let bytes = encode_spreadsheet(&workbook)?;
//!
//! let decoded = decode_spreadsheet(&bytes)?;
//! assert_eq!(decoded, workbook);
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Documents
//!
//! ```
//! use loquat::{decode_document_to_text, encode_document_from_text};
//!
//! # fn main() -> Result<(), loquat::OoxmlError> {
//! let bytes = encode_document_from_text("<p>Hello</p><p>line1<br/>line2</p>")?;
//! assert_eq!(
//!     decode_document_to_text(&bytes)?,
//!     "<p>Hello</p><p>line1<br/>line2</p>"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Every call returns either a complete result or an [`OoxmlError`]; use
//! [`OoxmlError::kind`] for a stable name to surface to callers.

pub mod common;
pub mod ooxml;

pub use ooxml::api::{
    decode_document_to_text, decode_spreadsheet, encode_document_from_text, encode_spreadsheet,
};
pub use ooxml::error::{OoxmlError, Result};
pub use ooxml::opc::{Compression, WriterOptions};
pub use ooxml::xlsx::{Sheet, Workbook};
