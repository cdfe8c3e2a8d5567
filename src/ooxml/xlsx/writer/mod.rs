/// Writer module for creating spreadsheet packages.
///
/// Cells are always written as inline strings, so no shared-strings part is
/// produced and no second pass over the cells is needed.
pub mod sheet;
pub mod workbook;

pub use sheet::generate_sheet_xml;
pub use workbook::{WORKBOOK_PART, WorkbookWriter, generate_workbook_xml};
