//! Utilities shared by the spreadsheet and word-processing codecs.

pub mod xml;
