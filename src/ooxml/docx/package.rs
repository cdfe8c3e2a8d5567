//! Package implementation for word-processing documents.
use crate::ooxml::docx::parts::DocumentPart;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::{PackURI, PackageReader};

/// Partname of the document body, read and written under this fixed name.
pub const DOCUMENT_PART: &str = "/word/document.xml";

/// A word-processing (.docx) package opened from bytes.
///
/// # Examples
///
/// ```rust
/// use loquat::ooxml::docx::{DocumentWriter, Package};
///
/// let bytes = DocumentWriter::default().write_text("Hello")?;
/// let package = Package::from_bytes(&bytes)?;
/// assert_eq!(package.document()?.paragraphs()?, ["Hello"]);
/// # Ok::<(), loquat::OoxmlError>(())
/// ```
#[derive(Debug)]
pub struct Package {
    /// The underlying OPC package
    reader: PackageReader,
}

impl Package {
    /// Open a package from bytes.
    ///
    /// # Errors
    /// Returns [`OoxmlError::PackageUnreadable`] if the bytes are not a ZIP container.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let reader = PackageReader::from_bytes(data).map_err(OoxmlError::PackageUnreadable)?;
        Ok(Self { reader })
    }

    /// Get the main document part, `/word/document.xml`.
    ///
    /// # Errors
    /// Returns [`OoxmlError::DocumentPartMissing`] if that part is absent.
    pub fn document(&self) -> Result<DocumentPart<'_>> {
        let partname = PackURI::new(DOCUMENT_PART).map_err(|e| {
            OoxmlError::PackageUnreadable(OpcError::InvalidPackUri(e))
        })?;

        match self.reader.part(&partname) {
            Some(xml) => Ok(DocumentPart::new(partname, xml)),
            None => Err(OoxmlError::DocumentPartMissing(partname.to_string())),
        }
    }
}
