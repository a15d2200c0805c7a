//! Named-table reading for files whose first row is the header.
//!
//! Already-merged workbooks and master lists carry a real header; no layout
//! heuristics apply to them.

use std::path::Path;

use epc_model::DataTable;

use crate::discovery::is_workbook;
use crate::error::{IngestError, Result};
use crate::raw_table::normalize_cell;
use crate::workbook::read_workbook_rows;

/// Read a header-first table, padding or truncating rows to the header
/// width. Fully-empty rows are dropped.
pub fn read_named_table(path: &Path) -> Result<DataTable> {
    let raw_rows = if is_workbook(path) {
        read_workbook_rows(path)?
    } else {
        read_csv_rows(path)?
    };
    let mut rows = raw_rows
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()));
    let Some(columns) = rows.next() else {
        return Ok(DataTable::default());
    };
    let width = columns.len();
    let mut table = DataTable::new(columns);
    for mut row in rows {
        row.resize(width, String::new());
        table.push_row(row);
    }
    Ok(table)
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|error| IngestError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|error| IngestError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_header_and_pads_short_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("merged.csv");
        std::fs::write(&path, "EPC,Location\nAABB,LocA\nCCDD\n").unwrap();
        let table = read_named_table(&path).unwrap();
        assert_eq!(table.columns, vec!["EPC", "Location"]);
        assert_eq!(table.rows[1], vec!["CCDD", ""]);
    }
}
