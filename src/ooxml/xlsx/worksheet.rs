//! Sheet model shared by the spreadsheet decoder and encoder.

/// One row of string cells. Index 0 is column `A`.
///
/// Decoded rows are dense: intermediate columns that no cell referenced are
/// empty strings, and the length equals the highest referenced column.
pub type Row = Vec<String>;

/// A named grid of string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Display label; not required to be unique within a workbook
    pub name: String,
    /// Rows in declared order
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create a sheet from a name and rows.
    pub fn new(name: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Get a cell by 1-based row and column.
    ///
    /// Returns `None` outside the materialized range; cells inside it that
    /// were never written are `Some("")`.
    pub fn cell(&self, row: u32, column: u32) -> Option<&str> {
        let row = self.rows.get((row as usize).checked_sub(1)?)?;
        row.get((column as usize).checked_sub(1)?)
            .map(String::as_str)
    }

    /// Number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row.
    pub fn max_column(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// A sheet as declared in the workbook descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorksheetInfo {
    /// Worksheet name
    pub name: String,
    /// Relationship ID for the worksheet part
    pub relationship_id: String,
    /// Declared ordinal (`sheetId`); undeclared ordinals sort last
    pub sheet_id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> Sheet {
        Sheet::new(
            "S1",
            vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), String::new(), "e".into()],
            ],
        )
    }

    #[test]
    fn test_cell_lookup() {
        let s = sheet();
        assert_eq!(s.cell(1, 1), Some("a"));
        assert_eq!(s.cell(2, 2), Some(""));
        assert_eq!(s.cell(2, 3), Some("e"));
        assert_eq!(s.cell(1, 3), None);
        assert_eq!(s.cell(0, 1), None);
        assert_eq!(s.cell(3, 1), None);
    }

    #[test]
    fn test_dimensions() {
        let s = sheet();
        assert_eq!(s.row_count(), 2);
        assert_eq!(s.max_column(), 3);
        assert_eq!(Sheet::default().max_column(), 0);
    }
}
