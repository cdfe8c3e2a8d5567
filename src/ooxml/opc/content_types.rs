//! Builder for the `[Content_Types].xml` part.
//!
//! Every package carries the two standard defaults (`rels` and `xml`) and one
//! override per structurally distinct part, written in the order they were
//! registered.

use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::packuri::PackURI;
use std::fmt::Write as FmtWrite;

/// Default and Override content type mappings for a package being written.
#[derive(Debug, Clone)]
pub struct ContentTypes {
    /// Default content types by extension
    defaults: Vec<(String, String)>,

    /// Override content types by partname
    overrides: Vec<(String, String)>,
}

impl ContentTypes {
    /// Create the mapping with the standard `rels` and `xml` defaults.
    pub fn new() -> Self {
        Self {
            defaults: vec![
                ("rels".to_string(), ct::OPC_RELATIONSHIPS.to_string()),
                ("xml".to_string(), ct::XML.to_string()),
            ],
            overrides: Vec::new(),
        }
    }

    /// Register an override for a specific part.
    pub fn add_override(&mut self, partname: &PackURI, content_type: &str) {
        self.overrides
            .push((partname.to_string(), content_type.to_string()));
    }

    /// Number of override entries.
    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Generate the XML for [Content_Types].xml.
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);

        xml.push_str(XML_DECLARATION);
        let _ = write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES);

        for (ext, content_type) in &self.defaults {
            let _ = write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            );
        }

        for (partname, content_type) in &self.overrides {
            let _ = write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            );
        }

        xml.push_str("</Types>");

        xml
    }
}

impl Default for ContentTypes {
    fn default() -> Self {
        Self::new()
    }
}
