//! Spreadsheet package assembly.
//!
//! Parts are written in a fixed order so identical workbooks give identical
//! bytes: content types, package relationships, the workbook descriptor, the
//! workbook relationships, then one worksheet part per sheet.

use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::constants::{content_type as ct, namespace, relationship_type as rt};
use crate::ooxml::opc::error::OpcError;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI};
use crate::ooxml::opc::{ContentTypes, PackURI, PhysPkgWriter, Relationships, WriterOptions};
use crate::ooxml::xlsx::worksheet::Sheet;
use crate::ooxml::xlsx::writer::sheet::generate_sheet_xml;
use std::fmt::Write as FmtWrite;

/// Partname of the workbook descriptor written by this crate.
pub const WORKBOOK_PART: &str = "/xl/workbook.xml";

/// Writes a list of sheets as a spreadsheet package.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkbookWriter {
    options: WriterOptions,
}

impl WorkbookWriter {
    /// Create a writer with explicit package options.
    pub fn new(options: WriterOptions) -> Self {
        Self { options }
    }

    /// Serialize `sheets` into package bytes.
    ///
    /// Zero sheets give a structurally valid workbook with an empty
    /// `<sheets/>` list.
    ///
    /// # Errors
    /// Returns [`OoxmlError::EntrySerializationFailure`] on a write fault.
    pub fn write(&self, sheets: &[Sheet]) -> Result<Vec<u8>> {
        self.write_package(sheets)
            .map_err(OoxmlError::EntrySerializationFailure)
    }

    fn write_package(&self, sheets: &[Sheet]) -> std::result::Result<Vec<u8>, OpcError> {
        let workbook_uri = PackURI::new(WORKBOOK_PART).map_err(OpcError::InvalidPackUri)?;
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;

        // Worksheet partnames and the descriptor's relationships, in sheet order
        let mut workbook_rels = Relationships::new(workbook_uri.base_uri());
        let mut sheet_parts = Vec::with_capacity(sheets.len());
        for index in 1..=sheets.len() {
            let target = format!("worksheets/sheet{}.xml", index);
            let r_id = workbook_rels.add(rt::WORKSHEET, &target);
            let partname = PackURI::from_rel_ref(workbook_uri.base_uri(), &target)
                .map_err(OpcError::InvalidPackUri)?;
            sheet_parts.push((r_id, partname));
        }

        let mut content_types = ContentTypes::new();
        content_types.add_override(&workbook_uri, ct::SML_SHEET_MAIN);
        for (_, partname) in &sheet_parts {
            content_types.add_override(partname, ct::SML_WORKSHEET);
        }

        let mut package_rels = Relationships::new(package_uri.base_uri());
        package_rels.add(rt::OFFICE_DOCUMENT, workbook_uri.membername());

        let rel_ids: Vec<&str> = sheet_parts.iter().map(|(r_id, _)| r_id.as_str()).collect();
        let workbook_xml = generate_workbook_xml(sheets, &rel_ids);

        let mut writer = PhysPkgWriter::with_options(self.options);
        writer.write(&content_types_uri, content_types.to_xml().as_bytes())?;
        writer.write(&package_uri.rels_uri(), package_rels.to_xml().as_bytes())?;
        writer.write(&workbook_uri, workbook_xml.as_bytes())?;
        writer.write(&workbook_uri.rels_uri(), workbook_rels.to_xml().as_bytes())?;

        for (sheet, (_, partname)) in sheets.iter().zip(&sheet_parts) {
            writer.write(partname, generate_sheet_xml(&sheet.rows).as_bytes())?;
        }

        log::debug!("encoded workbook with {} sheets", sheets.len());
        writer.finish()
    }
}

/// Generate workbook.xml content.
///
/// # Arguments
/// * `sheets` - Sheets in emission order; `sheetId` is the position plus one
/// * `rel_ids` - Relationship id of each sheet's part, same order
pub fn generate_workbook_xml(sheets: &[Sheet], rel_ids: &[&str]) -> String {
    let mut xml = String::with_capacity(512 + sheets.len() * 96);

    xml.push_str(XML_DECLARATION);
    let _ = write!(
        xml,
        r#"<workbook xmlns="{}" xmlns:r="{}">"#,
        namespace::SML_MAIN,
        namespace::OFC_RELATIONSHIPS
    );

    if sheets.is_empty() {
        xml.push_str("<sheets/>");
    } else {
        xml.push_str("<sheets>");
        for (index, (sheet, rel_id)) in sheets.iter().zip(rel_ids).enumerate() {
            let _ = write!(
                xml,
                r#"<sheet name="{}" sheetId="{}" r:id="{}"/>"#,
                escape_xml(&sheet.name),
                index + 1,
                rel_id
            );
        }
        xml.push_str("</sheets>");
    }

    xml.push_str("</workbook>");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::PhysPkgReader;

    fn sheets() -> Vec<Sheet> {
        vec![
            Sheet::new("First", vec![vec!["a".into()]]),
            Sheet::new("Q&A", vec![]),
        ]
    }

    #[test]
    fn test_workbook_xml() {
        let xml = generate_workbook_xml(&sheets(), &["rId1", "rId2"]);
        assert!(xml.contains(r#"<sheet name="First" sheetId="1" r:id="rId1"/>"#));
        assert!(xml.contains(r#"<sheet name="Q&amp;A" sheetId="2" r:id="rId2"/>"#));
    }

    #[test]
    fn test_entry_order() {
        let bytes = WorkbookWriter::default().write(&sheets()).unwrap();
        let reader = PhysPkgReader::from_bytes(&bytes).unwrap();
        let names: Vec<&str> = reader.member_names().collect();
        assert_eq!(
            names,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
            ]
        );

        let types = reader.read_string(&PackURI::new("/[Content_Types].xml").unwrap()).unwrap();
        assert!(types.contains(r#"<Override PartName="/xl/workbook.xml""#));
        assert!(types.contains(r#"<Override PartName="/xl/worksheets/sheet2.xml""#));

        let rels = reader
            .read_string(&PackURI::new("/xl/_rels/workbook.xml.rels").unwrap())
            .unwrap();
        assert!(rels.contains(r#"Id="rId2""#));
        assert!(rels.contains(r#"Target="worksheets/sheet2.xml""#));
    }

    #[test]
    fn test_identical_input_gives_identical_bytes() {
        let writer = WorkbookWriter::default();
        assert_eq!(writer.write(&sheets()).unwrap(), writer.write(&sheets()).unwrap());
    }

    #[test]
    fn test_zero_sheets() {
        let bytes = WorkbookWriter::default().write(&[]).unwrap();
        let reader = PhysPkgReader::from_bytes(&bytes).unwrap();
        let workbook = reader.read_string(&PackURI::new(WORKBOOK_PART).unwrap()).unwrap();
        assert!(workbook.contains("<sheets/>"));
        assert_eq!(reader.len(), 4);
    }
}
