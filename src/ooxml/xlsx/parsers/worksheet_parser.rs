//! Parser for worksheet parts (`xl/worksheets/sheetN.xml`).
//!
//! The part is read as a forward-only event stream. Every `<row>` element
//! becomes one dense row, in element order; cells are placed by the column of
//! their `r` reference and the gaps between them are filled with empty
//! strings.

use crate::common::xml::{attr_value, push_entity, push_text};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::xlsx::cell::{column_index_of, has_column_letters};
use crate::ooxml::xlsx::shared_strings::{RichText, SharedStrings};
use crate::ooxml::xlsx::worksheet::Row;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// How a cell's text is obtained, from its `t` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    /// `t="s"`: `<v>` is an index into the shared strings
    Shared,
    /// `t="inlineStr"`: text lives in `<is>`
    Inline,
    /// Anything else: `<v>` verbatim
    Raw,
}

impl CellKind {
    fn from_attr(t: Option<&str>) -> Self {
        match t {
            Some("s") => CellKind::Shared,
            Some("inlineStr") => CellKind::Inline,
            _ => CellKind::Raw,
        }
    }
}

/// Position of the reader inside the worksheet tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Sheet,
    Row,
    Cell,
    Value,
    Inline,
}

/// The cell currently being read.
#[derive(Debug)]
struct PendingCell {
    column: u32,
    kind: CellKind,
    value: String,
}

/// Row arena: the row being built plus the last column placed in it.
#[derive(Debug, Default)]
struct RowBuilder {
    cells: Row,
    last_column: u32,
}

impl RowBuilder {
    /// Reserve the column for a cell and make the row reach it.
    fn place(&mut self, column: u32) {
        self.last_column = column;
        let len = column as usize;
        if self.cells.len() < len {
            self.cells.resize(len, String::new());
        }
    }

    fn set(&mut self, column: u32, value: String) {
        self.cells[column as usize - 1] = value;
    }

    fn take(&mut self) -> Row {
        self.last_column = 0;
        std::mem::take(&mut self.cells)
    }
}

/// Parse worksheet XML into dense rows of resolved cell text.
///
/// # Arguments
/// * `xml` - The worksheet part
/// * `part` - Partname used in error messages
/// * `strings` - Shared strings for `t="s"` cells
pub fn parse_worksheet_xml(xml: &[u8], part: &str, strings: &SharedStrings) -> Result<Vec<Row>> {
    let malformed = |message: String| OoxmlError::MalformedSheetXml {
        part: part.to_string(),
        message,
    };

    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut rows: Vec<Row> = Vec::new();
    let mut row = RowBuilder::default();
    let mut cell: Option<PendingCell> = None;
    let mut inline = RichText::new();
    let mut scope = Scope::Sheet;
    let mut depth = 0usize;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                depth += 1;
                let local = e.local_name();
                scope = match (scope, local.as_ref()) {
                    (Scope::Sheet, b"row") => Scope::Row,
                    (Scope::Row, b"c") => {
                        cell = Some(open_cell(e, &mut row).map_err(malformed)?);
                        Scope::Cell
                    },
                    (Scope::Cell, b"v") => Scope::Value,
                    (Scope::Cell, b"is") => Scope::Inline,
                    (Scope::Inline, name) => {
                        inline.start(name);
                        Scope::Inline
                    },
                    (other, _) => other,
                };
            },
            Ok(Event::Empty(ref e)) => match (scope, e.local_name().as_ref()) {
                (Scope::Sheet, b"row") => rows.push(Vec::new()),
                (Scope::Row, b"c") => {
                    // Referenced but valueless
                    open_cell(e, &mut row).map_err(malformed)?;
                },
                _ => {},
            },
            Ok(Event::Text(ref e)) => match scope {
                Scope::Value => {
                    if let Some(c) = cell.as_mut() {
                        push_text(&mut c.value, e.as_ref());
                    }
                },
                Scope::Inline => inline.text(e.as_ref()),
                _ => {},
            },
            Ok(Event::CData(ref e)) => match scope {
                Scope::Value => {
                    if let Some(c) = cell.as_mut() {
                        push_text(&mut c.value, e.as_ref());
                    }
                },
                Scope::Inline => inline.text(e.as_ref()),
                _ => {},
            },
            Ok(Event::GeneralRef(ref e)) => match scope {
                Scope::Value => {
                    if let Some(c) = cell.as_mut() {
                        push_entity(&mut c.value, e.as_ref());
                    }
                },
                Scope::Inline => inline.entity(e.as_ref()),
                _ => {},
            },
            Ok(Event::End(ref e)) => {
                depth = depth.saturating_sub(1);
                let local = e.local_name();
                scope = match (scope, local.as_ref()) {
                    (Scope::Row, b"row") => {
                        rows.push(row.take());
                        Scope::Sheet
                    },
                    (Scope::Cell, b"c") => {
                        let inline_text = inline.finish();
                        if let Some(c) = cell.take() {
                            let value = resolve_cell(c.kind, c.value, inline_text, strings);
                            row.set(c.column, value);
                        }
                        Scope::Row
                    },
                    (Scope::Value, b"v") => Scope::Cell,
                    (Scope::Inline, b"is") if inline.at_top() => Scope::Cell,
                    (Scope::Inline, name) => {
                        inline.end(name);
                        Scope::Inline
                    },
                    (other, _) => other,
                };
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

    Ok(rows)
}

/// Start a cell: work out its column and reserve it in the row.
fn open_cell(e: &BytesStart<'_>, row: &mut RowBuilder) -> std::result::Result<PendingCell, String> {
    let column = match attr_value(e, b"r")? {
        Some(reference) => {
            if !has_column_letters(&reference) {
                log::warn!("cell reference '{}' has no column letters, using column 1", reference);
            }
            column_index_of(&reference)
        },
        None => row.last_column.saturating_add(1),
    };

    let kind = CellKind::from_attr(attr_value(e, b"t")?.as_deref());
    row.place(column);

    Ok(PendingCell {
        column,
        kind,
        value: String::new(),
    })
}

/// Turn a finished cell into its display text.
fn resolve_cell(kind: CellKind, value: String, inline: String, strings: &SharedStrings) -> String {
    match kind {
        CellKind::Raw => value,
        CellKind::Inline => inline,
        CellKind::Shared => match strings.resolve(&value) {
            Some(s) => s.to_string(),
            None => {
                if strings.is_empty() {
                    log::warn!("shared string cell '{}' without a shared-strings table", value.trim());
                } else {
                    log::warn!("shared string index '{}' does not resolve", value.trim());
                }
                String::new()
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings() -> SharedStrings {
        SharedStrings::parse(b"<sst><si><t>zero</t></si><si><t>one</t></si></sst>").unwrap()
    }

    fn parse(sheet_data: &str) -> Vec<Row> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{}</sheetData></worksheet>"#,
            sheet_data
        );
        parse_worksheet_xml(xml.as_bytes(), "/xl/worksheets/sheet1.xml", &strings()).unwrap()
    }

    #[test]
    fn test_dense_rows() {
        let rows = parse(
            r#"<row r="1"><c r="A1" t="s"><v>0</v></c><c r="C1" t="s"><v>1</v></c></row>
               <row r="2"><c r="B2"><v>42</v></c></row>"#,
        );
        assert_eq!(rows, vec![vec!["zero", "", "one"], vec!["", "42"]]);
    }

    #[test]
    fn test_cell_types() {
        let rows = parse(
            r#"<row r="1">
                 <c r="A1" t="inlineStr"><is><t>inline &amp; text</t></is></c>
                 <c r="B1" t="inlineStr"><is><r><t>ri</t></r><r><t>ch</t></r></is></c>
                 <c r="C1" t="b"><v>1</v></c>
                 <c r="D1" t="e"><v>#DIV/0!</v></c>
                 <c r="E1" t="str"><f>A1&amp;"x"</f><v>computed</v></c>
                 <c r="F1"><f>1+1</f><v>2</v></c>
               </row>"#,
        );
        assert_eq!(
            rows,
            vec![vec!["inline & text", "rich", "1", "#DIV/0!", "computed", "2"]]
        );
    }

    #[test]
    fn test_unresolvable_shared_index_is_empty() {
        let rows = parse(r#"<row><c r="A1" t="s"><v>7</v></c><c r="B1" t="s"><v>x</v></c><c r="C1"><v>ok</v></c></row>"#);
        assert_eq!(rows, vec![vec!["", "", "ok"]]);
    }

    #[test]
    fn test_referenced_empty_cell_extends_row() {
        let rows = parse(r#"<row r="1"><c r="A1"><v>a</v></c><c r="D1" s="3"/></row>"#);
        assert_eq!(rows, vec![vec!["a", "", "", ""]]);
    }

    #[test]
    fn test_cells_without_reference_follow_previous() {
        let rows = parse(r#"<row><c><v>a</v></c><c r="C1"><v>c</v></c><c><v>d</v></c></row>"#);
        assert_eq!(rows, vec![vec!["a", "", "c", "d"]]);
    }

    #[test]
    fn test_non_alphabetic_reference_is_column_one() {
        let rows = parse(r#"<row><c r="1"><v>x</v></c></row>"#);
        assert_eq!(rows, vec![vec!["x"]]);
    }

    #[test]
    fn test_rows_in_element_order() {
        let rows = parse(r#"<row r="5"><c r="A5"><v>five</v></c></row><row r="2"/><row r="1"><c r="A1"><v>one</v></c></row>"#);
        assert_eq!(rows, vec![vec!["five".to_string()], vec![], vec!["one".to_string()]]);
    }

    #[test]
    fn test_no_shared_table() {
        let xml = br#"<worksheet><sheetData><row><c r="A1" t="s"><v>0</v></c></row></sheetData></worksheet>"#;
        let rows = parse_worksheet_xml(xml, "/xl/worksheets/sheet1.xml", &SharedStrings::new()).unwrap();
        assert_eq!(rows, vec![vec![String::new()]]);
    }

    #[test]
    fn test_malformed() {
        let err = parse_worksheet_xml(
            b"<worksheet><sheetData><row><c><v>1</c></row></sheetData></worksheet>",
            "/xl/worksheets/sheet1.xml",
            &SharedStrings::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "MalformedSheetXml");

        let err = parse_worksheet_xml(
            b"<worksheet><sheetData><row><c r=\"A1\"><v>1</v>",
            "/xl/worksheets/sheet1.xml",
            &SharedStrings::new(),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "MalformedSheetXml");
    }

    #[test]
    fn test_columns_past_xfd_are_kept() {
        let rows = parse(r#"<row><c r="XFD1"><v>last</v></c><c r="XFE1"><v>beyond</v></c></row>"#);
        assert_eq!(rows[0].len(), 16_385);
        assert_eq!(rows[0][16_383], "last");
        assert_eq!(rows[0][16_384], "beyond");
    }
}
