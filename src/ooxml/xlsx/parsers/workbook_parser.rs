//! Parser for the workbook descriptor (`xl/workbook.xml`).
//!
//! Only the `<sheets>` section matters to the decoder: each `<sheet>` entry
//! gives a display name, a declared ordinal and the relationship id of its
//! worksheet part.

use crate::common::xml::attr_value;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::worksheet::WorksheetInfo;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

// Pre-allocate a typical capacity for worksheets
const INITIAL_SHEETS_CAPACITY: usize = 16;

/// Parse workbook.xml content into the declared sheets, in descriptor order.
///
/// A missing `sheetId` sorts after every declared ordinal; a missing `r:id`
/// is kept as an empty id and fails later as an unresolved target.
pub fn parse_workbook_xml(xml: &[u8], part: &str) -> Result<Vec<WorksheetInfo>> {
    let malformed = |message: String| OoxmlError::MalformedXml {
        part: part.to_string(),
        message,
    };

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut sheets = Vec::with_capacity(INITIAL_SHEETS_CAPACITY);
    let mut in_sheets = false;
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                match e.local_name().as_ref() {
                    b"sheets" => in_sheets = true,
                    b"sheet" if in_sheets => sheets.push(parse_sheet(e).map_err(malformed)?),
                    _ => {},
                }
            },
            Ok(Event::Empty(ref e)) => {
                if in_sheets && e.local_name().as_ref() == b"sheet" {
                    sheets.push(parse_sheet(e).map_err(malformed)?);
                }
            },
            Ok(Event::End(ref e)) => {
                depth = depth.saturating_sub(1);
                if e.local_name().as_ref() == b"sheets" {
                    in_sheets = false;
                }
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    if depth != 0 {
        return Err(malformed("unexpected end of part".to_string()));
    }

    Ok(sheets)
}

/// Read the attributes of one `<sheet>` entry.
fn parse_sheet(e: &BytesStart<'_>) -> std::result::Result<WorksheetInfo, String> {
    let name = attr_value(e, b"name")?.unwrap_or_default();
    // r:id
    let relationship_id = attr_value(e, b"id")?.unwrap_or_default();
    let sheet_id = attr_value(e, b"sheetId")?
        .and_then(|id| atoi_simd::parse::<u32, false, false>(id.trim().as_bytes()).ok())
        .unwrap_or(u32::MAX);

    Ok(WorksheetInfo {
        name,
        relationship_id,
        sheet_id,
    })
}
