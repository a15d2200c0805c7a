//! Positional raw tables.
//!
//! A `RawTable` is what parsing produces before any column has a meaning:
//! an optional header row plus ordered rows of string cells. Column
//! positions are the only stable reference until the EPC column is chosen.

/// Strip surrounding whitespace and a leading BOM from one cell.
pub(crate) fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').trim().to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(header: Option<Vec<String>>, rows: Vec<Vec<String>>) -> Self {
        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Width of the table: the widest row, or the header when it is wider.
    pub fn column_count(&self) -> usize {
        let data_width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let header_width = self.header.as_ref().map_or(0, Vec::len);
        data_width.max(header_width)
    }

    /// Drop fully-empty rows, then fully-empty columns.
    ///
    /// Surviving columns are re-indexed left to right, matching how the
    /// positional EPC column selection behaves downstream.
    pub fn drop_empty(&mut self) {
        self.rows
            .retain(|row| row.iter().any(|cell| !cell.trim().is_empty()));
        let width = self.column_count();
        let mut keep = vec![false; width];
        for row in &self.rows {
            for (idx, cell) in row.iter().enumerate() {
                if !cell.trim().is_empty() {
                    keep[idx] = true;
                }
            }
        }
        if keep.iter().all(|kept| *kept) {
            return;
        }
        let project = |row: &[String]| -> Vec<String> {
            row.iter()
                .enumerate()
                .filter(|(idx, _)| keep.get(*idx).copied().unwrap_or(false))
                .map(|(_, cell)| cell.clone())
                .collect()
        };
        let rows: Vec<Vec<String>> = self.rows.iter().map(|row| project(row)).collect();
        let header = self.header.as_ref().map(|header| project(header));
        self.rows = rows;
        self.header = header;
    }

    /// Non-empty trimmed values of one column, top to bottom.
    pub fn column_values(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index))
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn drop_empty_removes_blank_rows_and_columns() {
        let mut table = RawTable::new(
            None,
            vec![
                row(&["a", "", "x"]),
                row(&["", "", ""]),
                row(&["b", "", "y"]),
            ],
        );
        table.drop_empty();
        assert_eq!(table.rows, vec![row(&["a", "x"]), row(&["b", "y"])]);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn drop_empty_reprojects_header() {
        let mut table = RawTable::new(
            Some(row(&["id", "unused", "name"])),
            vec![row(&["1", "", "x"]), row(&["2", "", "y"])],
        );
        table.drop_empty();
        assert_eq!(table.header, Some(row(&["id", "name"])));
    }

    #[test]
    fn column_values_skips_missing_cells() {
        let table = RawTable::new(None, vec![row(&["a", " v "]), row(&["b"]), row(&["c", ""])]);
        assert_eq!(table.column_values(1), vec!["v".to_string()]);
    }
}
