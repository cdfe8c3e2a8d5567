//! Read-only view over a serialized OPC package.
//!
//! Wraps [`PhysPkgReader`] with relationship loading and discovery of the
//! spreadsheet's main part.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;

/// Package reader resolving parts through relationships.
#[derive(Debug)]
pub struct PackageReader {
    phys: PhysPkgReader,
}

impl PackageReader {
    /// Open a package from a byte buffer.
    ///
    /// # Errors
    /// Returns [`OpcError::BadContainer`](crate::ooxml::opc::error::OpcError::BadContainer)
    /// when the buffer is not a ZIP archive.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self {
            phys: PhysPkgReader::from_bytes(data)?,
        })
    }

    /// Get the contents of a part, if present.
    #[inline]
    pub fn part(&self, partname: &PackURI) -> Option<&[u8]> {
        self.phys.get(partname.membername())
    }

    /// Load the relationships whose source is `source`.
    ///
    /// Returns `Ok(None)` when the package has no .rels part for it.
    pub fn rels_for(&self, source: &PackURI) -> Result<Option<Relationships>> {
        let rels_uri = source.rels_uri();
        match self.part(&rels_uri) {
            Some(xml) => Relationships::from_xml(xml, source.base_uri()).map(Some),
            None => Ok(None),
        }
    }

    /// Locate the main part named by the package relationships (the workbook descriptor).
    ///
    /// The package's `officeDocument` relationship is followed when it points
    /// at a part that exists; otherwise `fallback` is returned.
    pub fn main_document_uri(&self, fallback: &str) -> Result<PackURI> {
        let fallback = PackURI::new(fallback).map_err(OpcError::InvalidPackUri)?;
        let package = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;

        let rels = match self.rels_for(&package) {
            Ok(Some(rels)) => rels,
            Ok(None) => {
                log::trace!("no package relationships, using {}", fallback);
                return Ok(fallback);
            },
            Err(e) => {
                log::warn!("ignoring unreadable package relationships: {}", e);
                return Ok(fallback);
            },
        };

        let Some(rel) = rels.office_document() else {
            log::trace!("no officeDocument relationship, using {}", fallback);
            return Ok(fallback);
        };

        match rel.target_partname() {
            Ok(target) if self.part(&target).is_some() => Ok(target),
            Ok(target) => {
                log::warn!("officeDocument target {} is missing, using {}", target, fallback);
                Ok(fallback)
            },
            Err(e) => {
                log::warn!("officeDocument target unresolvable ({}), using {}", e, fallback);
                Ok(fallback)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::phys_pkg::PhysPkgWriter;

    fn package(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = PhysPkgWriter::new();
        for (name, xml) in entries {
            writer
                .write(&PackURI::new(*name).unwrap(), xml.as_bytes())
                .unwrap();
        }
        writer.finish().unwrap()
    }

    const ROOT_RELS: &str = r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
        <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="custom/book.xml"/>
    </Relationships>"#;

    #[test]
    fn test_discovers_main_part_through_rels() {
        let data = package(&[("/_rels/.rels", ROOT_RELS), ("/custom/book.xml", "<workbook/>")]);
        let reader = PackageReader::from_bytes(&data).unwrap();
        let main = reader.main_document_uri("/xl/workbook.xml").unwrap();
        assert_eq!(main.as_str(), "/custom/book.xml");
        assert_eq!(reader.part(&main).unwrap(), b"<workbook/>");
    }

    #[test]
    fn test_falls_back_when_target_missing() {
        let data = package(&[("/_rels/.rels", ROOT_RELS)]);
        let reader = PackageReader::from_bytes(&data).unwrap();
        let main = reader.main_document_uri("/xl/workbook.xml").unwrap();
        assert_eq!(main.as_str(), "/xl/workbook.xml");
    }

    #[test]
    fn test_falls_back_without_rels() {
        let data = package(&[("/word/document.xml", "<w:document/>")]);
        let reader = PackageReader::from_bytes(&data).unwrap();
        assert_eq!(
            reader.main_document_uri("/word/document.xml").unwrap().as_str(),
            "/word/document.xml"
        );
        assert!(reader.rels_for(&PackURI::new("/word/document.xml").unwrap()).unwrap().is_none());
    }

    #[test]
    fn test_falls_back_on_malformed_rels() {
        let data = package(&[("/_rels/.rels", "<Relationships><Relationship></Oops>")]);
        let reader = PackageReader::from_bytes(&data).unwrap();
        assert_eq!(
            reader.main_document_uri("/word/document.xml").unwrap().as_str(),
            "/word/document.xml"
        );
    }

    #[test]
    fn test_rejects_non_zip() {
        assert!(matches!(
            PackageReader::from_bytes(b"PK but not really"),
            Err(OpcError::BadContainer(_))
        ));
    }
}
