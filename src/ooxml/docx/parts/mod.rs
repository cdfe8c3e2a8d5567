/// Part implementations for word-processing packages.
///
/// Only the main document part carries content the codec reads.
pub mod document_part;

pub use document_part::DocumentPart;
