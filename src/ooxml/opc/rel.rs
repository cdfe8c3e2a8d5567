//! Relationship-related objects for OPC packages.
//!
//! A relationship part (`*.rels`) maps relationship ids such as `rId3` to the
//! physical location of another part. Decoders read it once to resolve logical
//! references; encoders build it while laying out a package.

use crate::common::xml::{XML_DECLARATION, attr_value, escape_xml};
use crate::ooxml::opc::constants::{namespace, relationship_type, target_mode};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;
use std::fmt::Write as FmtWrite;

/// A single relationship from a source part to a target.
#[derive(Debug, Clone)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a part URI or external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    /// Get the relationship ID.
    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    /// Get the relationship type.
    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference exactly as written in the .rels part.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    /// Check if this is an external relationship.
    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets an external resource",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Ordered collection of relationships from a single source.
///
/// Insertion order is kept so that serialized .rels parts are identical for
/// identical input. Packages handled here carry few relationships per source,
/// so lookups scan the inline buffer.
#[derive(Debug)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Create a new empty relationships collection.
    ///
    /// # Arguments
    /// * `base_uri` - Directory of the source part, used to resolve targets
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            rels: SmallVec::new(),
        }
    }

    /// Parse a .rels part.
    ///
    /// Entries lacking an `Id`, `Type` or `Target` attribute are skipped.
    pub fn from_xml(rels_xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = Self::new(base_uri);
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    if e.local_name().as_ref() == b"Relationship" {
                        let r_id = attr_value(e, b"Id").map_err(OpcError::XmlError)?;
                        let reltype = attr_value(e, b"Type").map_err(OpcError::XmlError)?;
                        let target = attr_value(e, b"Target").map_err(OpcError::XmlError)?;
                        let mode = attr_value(e, b"TargetMode").map_err(OpcError::XmlError)?;

                        if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target) {
                            let is_external = mode.as_deref() == Some(target_mode::EXTERNAL);
                            rels.push(id, rt, tr, is_external);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OpcError::XmlError(format!("Rels parse error: {}", e))),
                _ => {},
            }
            buf.clear();
        }

        Ok(rels)
    }

    fn push(&mut self, r_id: String, reltype: String, target_ref: String, is_external: bool) {
        self.rels.push(Relationship {
            r_id,
            reltype,
            target_ref,
            base_uri: self.base_uri.clone(),
            is_external,
        });
    }

    /// Add an internal relationship and return the id assigned to it.
    ///
    /// Ids are allocated sequentially as `rId1`, `rId2`, ...
    pub fn add(&mut self, reltype: &str, target_ref: &str) -> String {
        let r_id = format!("rId{}", self.rels.len() + 1);
        self.push(r_id.clone(), reltype.to_string(), target_ref.to_string(), false);
        r_id
    }

    /// Get a relationship by its ID.
    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id == r_id)
    }

    /// Get the first internal relationship pointing at the main document part.
    ///
    /// Both the transitional and the strict relationship type are accepted.
    pub fn office_document(&self) -> Option<&Relationship> {
        self.rels.iter().find(|rel| {
            !rel.is_external
                && (rel.reltype == relationship_type::OFFICE_DOCUMENT
                    || rel
                        .reltype
                        .ends_with(relationship_type::OFFICE_DOCUMENT_SUFFIX))
        })
    }

    /// Get an iterator over all relationships in insertion order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    /// Get the number of relationships in the collection.
    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    /// Check if the collection is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to XML format.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(XML_DECLARATION);
        let _ = write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS);

        for rel in &self.rels {
            let target_mode = if rel.is_external {
                r#" TargetMode="External""#
            } else {
                ""
            };

            let _ = write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(&rel.r_id),
                escape_xml(&rel.reltype),
                escape_xml(&rel.target_ref),
                target_mode
            );
        }

        xml.push_str("</Relationships>");

        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
        <Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
            <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="/xl/worksheets/sheet1.xml"/>
            <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com" TargetMode="External"/>
            <Relationship Id="broken"/>
        </Relationships>"#;

    #[test]
    fn test_parse_and_resolve() {
        let rels = Relationships::from_xml(WORKBOOK_RELS, "/xl").unwrap();
        assert_eq!(rels.len(), 3);

        let sheet2 = rels.get("rId2").unwrap();
        assert_eq!(sheet2.target_partname().unwrap().as_str(), "/xl/worksheets/sheet2.xml");

        let sheet1 = rels.get("rId1").unwrap();
        assert_eq!(sheet1.target_partname().unwrap().as_str(), "/xl/worksheets/sheet1.xml");

        let link = rels.get("rId9").unwrap();
        assert!(link.is_external());
        assert!(link.target_partname().is_err());

        assert!(rels.get("broken").is_none());
    }

    #[test]
    fn test_malformed_rels() {
        let err = Relationships::from_xml(b"<Relationships><Relationship></Oops>", "/").unwrap_err();
        assert!(matches!(err, OpcError::XmlError(_)));
    }

    #[test]
    fn test_add_and_serialize() {
        let mut rels = Relationships::new("/");
        assert_eq!(rels.add(relationship_type::OFFICE_DOCUMENT, "xl/workbook.xml"), "rId1");
        assert_eq!(rels.add(relationship_type::WORKSHEET, "a&b.xml"), "rId2");

        let xml = rels.to_xml();
        assert!(xml.starts_with(XML_DECLARATION));
        assert!(xml.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#));
        assert!(xml.contains(r#"Target="a&amp;b.xml""#));

        let reparsed = Relationships::from_xml(xml.as_bytes(), "/").unwrap();
        assert_eq!(
            reparsed.office_document().unwrap().target_partname().unwrap().as_str(),
            "/xl/workbook.xml"
        );
    }

    #[test]
    fn test_strict_office_document_type() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
            <Relationship Id="rId1" Type="http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument" Target="xl/workbook.xml"/>
        </Relationships>"#;
        let rels = Relationships::from_xml(xml, "/").unwrap();
        assert_eq!(rels.office_document().unwrap().r_id(), "rId1");
    }
}
