/// Error types for the spreadsheet and document codecs.
use crate::ooxml::opc::error::OpcError;
use thiserror::Error;

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, OoxmlError>;

/// Every externally observable failure of a decode or encode call.
///
/// Decoding and encoding are all-or-nothing: when one of these is returned no
/// partial workbook, paragraph list or byte buffer exists.
#[derive(Error, Debug)]
pub enum OoxmlError {
    /// The input buffer is empty or not a ZIP container
    #[error("package unreadable: {0}")]
    PackageUnreadable(#[source] OpcError),

    /// The workbook descriptor part is absent
    #[error("workbook descriptor missing: {0}")]
    DescriptorMissing(String),

    /// The document body part is absent
    #[error("document part missing: {0}")]
    DocumentPartMissing(String),

    /// The shared-string part is present but not well-formed XML
    #[error("malformed shared strings: {0}")]
    MalformedSharedStrings(String),

    /// A worksheet part is present but not well-formed XML
    #[error("malformed sheet XML in {part}: {message}")]
    MalformedSheetXml { part: String, message: String },

    /// Any other present part is not well-formed XML
    #[error("malformed XML in {part}: {message}")]
    MalformedXml { part: String, message: String },

    /// The workbook descriptor lists no sheets
    #[error("workbook declares no sheets")]
    NoSheetsDeclared,

    /// The workbook relationship part is absent
    #[error("workbook relationships missing: {0}")]
    RelationshipsMissing(String),

    /// A declared sheet's relationship id does not map to a part
    #[error("sheet '{sheet}' references unknown relationship '{r_id}'")]
    UnresolvedSheetTarget { sheet: String, r_id: String },

    /// A resolved worksheet part cannot be read
    #[error("sheet '{sheet}' unreadable: {part}")]
    SheetUnreadable { sheet: String, part: String },

    /// The package writer failed while serializing an entry
    #[error("entry serialization failure: {0}")]
    EntrySerializationFailure(#[source] OpcError),
}

impl OoxmlError {
    /// Stable name of the error kind, suitable for surfacing verbatim.
    pub fn kind(&self) -> &'static str {
        match self {
            OoxmlError::PackageUnreadable(_) => "PackageUnreadable",
            OoxmlError::DescriptorMissing(_) => "DescriptorMissing",
            OoxmlError::DocumentPartMissing(_) => "DocumentPartMissing",
            OoxmlError::MalformedSharedStrings(_) => "MalformedSharedStrings",
            OoxmlError::MalformedSheetXml { .. } => "MalformedSheetXml",
            OoxmlError::MalformedXml { .. } => "MalformedXml",
            OoxmlError::NoSheetsDeclared => "NoSheetsDeclared",
            OoxmlError::RelationshipsMissing(_) => "RelationshipsMissing",
            OoxmlError::UnresolvedSheetTarget { .. } => "UnresolvedSheetTarget",
            OoxmlError::SheetUnreadable { .. } => "SheetUnreadable",
            OoxmlError::EntrySerializationFailure(_) => "EntrySerializationFailure",
        }
    }

    /// Whether this error reports an XML parse failure on a present part.
    pub fn is_malformed_xml(&self) -> bool {
        matches!(
            self,
            OoxmlError::MalformedSharedStrings(_)
                | OoxmlError::MalformedSheetXml { .. }
                | OoxmlError::MalformedXml { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kind_names() {
        assert_eq!(OoxmlError::NoSheetsDeclared.kind(), "NoSheetsDeclared");
        let err = OoxmlError::UnresolvedSheetTarget {
            sheet: "Data".to_string(),
            r_id: "rId4".to_string(),
        };
        assert_eq!(err.kind(), "UnresolvedSheetTarget");
        assert_eq!(err.to_string(), "sheet 'Data' references unknown relationship 'rId4'");
    }

    #[test]
    fn test_malformed_family() {
        assert!(OoxmlError::MalformedSharedStrings("eof".into()).is_malformed_xml());
        assert!(
            OoxmlError::MalformedSheetXml {
                part: "/xl/worksheets/sheet1.xml".into(),
                message: "eof".into()
            }
            .is_malformed_xml()
        );
        assert!(!OoxmlError::NoSheetsDeclared.is_malformed_xml());
    }

    #[test]
    fn test_source_is_kept() {
        let err = OoxmlError::PackageUnreadable(OpcError::BadContainer("empty buffer".into()));
        assert_eq!(err.kind(), "PackageUnreadable");
        assert!(err.source().is_some());
    }
}
