//! Spreadsheet workbook: decoding from and encoding to package bytes.
//!
//! Decoding resolves each declared sheet through the workbook relationships
//! to its worksheet part. Sheets come back ordered by their declared `sheetId`,
//! not by ZIP entry order or relationship id.

use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::{PackageReader, WriterOptions};
use crate::ooxml::xlsx::parsers::{workbook_parser, worksheet_parser};
use crate::ooxml::xlsx::shared_strings::SharedStrings;
use crate::ooxml::xlsx::worksheet::Sheet;
use crate::ooxml::xlsx::writer::{WORKBOOK_PART, WorkbookWriter};

/// Filename of the shared-strings part, next to the workbook descriptor.
const SHARED_STRINGS_FILENAME: &str = "sharedStrings.xml";

/// An ordered list of sheets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Workbook {
    /// Sheets in declared order
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create a workbook from sheets.
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// Decode a spreadsheet package.
    ///
    /// Either the whole workbook is returned or an error; a failure in any
    /// part aborts the decode.
    ///
    /// # Errors
    /// * [`OoxmlError::PackageUnreadable`] - not a ZIP container
    /// * [`OoxmlError::MalformedSharedStrings`] - shared-strings part present but malformed
    /// * [`OoxmlError::DescriptorMissing`] - no workbook descriptor
    /// * [`OoxmlError::NoSheetsDeclared`] - descriptor lists no sheet
    /// * [`OoxmlError::RelationshipsMissing`] - no workbook relationships part
    /// * [`OoxmlError::UnresolvedSheetTarget`] - a sheet's id maps to no part
    /// * [`OoxmlError::SheetUnreadable`] - a resolved worksheet part is absent
    /// * [`OoxmlError::MalformedSheetXml`] / [`OoxmlError::MalformedXml`] - parse failures
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let package = PackageReader::from_bytes(data).map_err(OoxmlError::PackageUnreadable)?;
        let workbook_uri = package
            .main_document_uri(WORKBOOK_PART)
            .map_err(OoxmlError::PackageUnreadable)?;

        let strings = SharedStrings::from_part(
            package.part(&workbook_uri.sibling(SHARED_STRINGS_FILENAME)),
        )?;

        let descriptor = package
            .part(&workbook_uri)
            .ok_or_else(|| OoxmlError::DescriptorMissing(workbook_uri.to_string()))?;
        let mut declared = workbook_parser::parse_workbook_xml(descriptor, workbook_uri.as_str())?;
        if declared.is_empty() {
            return Err(OoxmlError::NoSheetsDeclared);
        }

        let rels_uri = workbook_uri.rels_uri();
        let rels = package
            .rels_for(&workbook_uri)
            .map_err(|e| OoxmlError::MalformedXml {
                part: rels_uri.to_string(),
                message: e.to_string(),
            })?
            .ok_or_else(|| OoxmlError::RelationshipsMissing(rels_uri.to_string()))?;

        // Stable: equal ordinals keep descriptor order
        declared.sort_by_key(|info| info.sheet_id);

        let mut sheets = Vec::with_capacity(declared.len());
        for info in declared {
            let partname = rels
                .get(&info.relationship_id)
                .and_then(|rel| rel.target_partname().ok())
                .ok_or_else(|| OoxmlError::UnresolvedSheetTarget {
                    sheet: info.name.clone(),
                    r_id: info.relationship_id.clone(),
                })?;

            let xml = package
                .part(&partname)
                .ok_or_else(|| OoxmlError::SheetUnreadable {
                    sheet: info.name.clone(),
                    part: partname.to_string(),
                })?;

            log::trace!("parsing sheet '{}' from {}", info.name, partname);
            let rows = worksheet_parser::parse_worksheet_xml(xml, partname.as_str(), &strings)?;
            sheets.push(Sheet::new(info.name, rows));
        }

        log::debug!(
            "decoded workbook {} with {} sheets ({} shared strings)",
            workbook_uri,
            sheets.len(),
            strings.len()
        );

        Ok(Self { sheets })
    }

    /// Encode the workbook as a package with default options.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.to_bytes_with(WriterOptions::default())
    }

    /// Encode the workbook as a package.
    ///
    /// Empty cells are not written, so trailing empty cells of a row do not
    /// survive a decode. Every row is written, including rows with no values.
    pub fn to_bytes_with(&self, options: WriterOptions) -> Result<Vec<u8>> {
        WorkbookWriter::new(options).write(&self.sheets)
    }

    /// Get the first sheet with the given name.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name == name)
    }

    /// Sheet names in order.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.iter().map(|sheet| sheet.name.as_str())
    }

    /// Number of sheets.
    #[inline]
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Check if the workbook has no sheets.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }
}

impl From<Vec<Sheet>> for Workbook {
    fn from(sheets: Vec<Sheet>) -> Self {
        Self::new(sheets)
    }
}
