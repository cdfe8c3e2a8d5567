/// Writer module for creating word-processing packages.
///
/// Text input is normalized into paragraphs first; each paragraph is then
/// written as plain runs with explicit breaks and tabs.
pub mod doc;
pub mod paragraph;

pub use doc::{DocumentWriter, generate_document_xml};
pub use paragraph::write_paragraph;
