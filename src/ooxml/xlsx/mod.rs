//! Spreadsheet (.xlsx) support.
//!
//! A workbook is decoded into named sheets of dense string rows and encoded
//! back into a minimal package that uses inline strings only.
//!
//! # Example
//!
//! ```rust
//! use loquat::ooxml::xlsx::{Sheet, Workbook};
//!
//! let workbook = Workbook::new(vec![Sheet::new("S1", vec![vec!["a".into(), "b".into()]])]);
//! let bytes = workbook.to_bytes()?;
//!
//! let decoded = Workbook::from_bytes(&bytes)?;
//! assert_eq!(decoded.sheet("S1").unwrap().cell(1, 2), Some("b"));
//! # Ok::<(), loquat::OoxmlError>(())
//! ```

pub mod cell;
pub mod parsers;
pub mod shared_strings;
pub mod workbook;
pub mod worksheet;
pub mod writer;

pub use cell::{column_index_of, column_letters_of, coordinate};
pub use shared_strings::SharedStrings;
pub use workbook::Workbook;
pub use worksheet::{Row, Sheet, WorksheetInfo};
pub use writer::WorkbookWriter;
