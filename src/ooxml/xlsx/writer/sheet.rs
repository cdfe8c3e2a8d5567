//! Worksheet part generation.
use crate::common::xml::{XML_DECLARATION, escape_xml};
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::xlsx::cell::coordinate;
use crate::ooxml::xlsx::worksheet::Row;
use std::fmt::Write as FmtWrite;

/// Generate the XML of one worksheet part.
///
/// Every row becomes a `<row>` element, numbered from 1 in input order. Only
/// non-empty values are written, as inline-string cells; empty cells are left
/// out, which drops trailing empty cells on the next decode.
pub fn generate_sheet_xml(rows: &[Row]) -> String {
    let cell_count: usize = rows.iter().map(Vec::len).sum();
    let mut xml = String::with_capacity(256 + rows.len() * 24 + cell_count * 64);

    xml.push_str(XML_DECLARATION);
    let _ = write!(xml, r#"<worksheet xmlns="{}">"#, namespace::SML_MAIN);
    xml.push_str("<sheetData>");

    for (row_index, row) in rows.iter().enumerate() {
        // NOTE: rows and columns are 1-based on the wire
        let row_num = row_index as u32 + 1;

        if row.iter().all(String::is_empty) {
            let _ = write!(xml, r#"<row r="{}"/>"#, row_num);
            continue;
        }

        let _ = write!(xml, r#"<row r="{}">"#, row_num);
        for (col_index, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            write_inline_cell(&mut xml, &coordinate(row_num, col_index as u32 + 1), value);
        }
        xml.push_str("</row>");
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

/// Write a single inline-string cell.
fn write_inline_cell(xml: &mut String, cell_ref: &str, value: &str) {
    let _ = write!(
        xml,
        r#"<c r="{}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
        cell_ref,
        escape_xml(value)
    );
}
