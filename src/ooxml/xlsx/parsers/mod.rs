//! XML parsing modules for spreadsheet packages.
//!
//! This module contains the streaming parsers for the workbook descriptor and
//! the worksheet parts. The shared-strings part has its own parser in
//! [`crate::ooxml::xlsx::shared_strings`].

pub mod workbook_parser;
pub mod worksheet_parser;
