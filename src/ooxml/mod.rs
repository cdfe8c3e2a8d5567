//! Office Open XML (OOXML) codecs.
//!
//! # Architecture
//!
//! 1. **OPC Layer** (`opc`): ZIP container, part names, relationships and content types
//! 2. **Errors** (`error`): the codec-level error kinds
//! 3. **Format-Specific Modules**:
//!    - `xlsx`: spreadsheets as named sheets of string rows
//!    - `docx`: word-processing documents as paragraphs of text
//! 4. **API** (`api`): the four byte-level entry points
pub mod api;
pub mod docx;
pub mod error;
pub mod opc;
pub mod xlsx;

pub use error::{OoxmlError, Result};
pub use opc::PackURI;
