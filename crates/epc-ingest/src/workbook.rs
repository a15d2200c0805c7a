//! Workbook (`.xls`/`.xlsx`) reading via calamine.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::error::{IngestError, Result};

/// Read the first worksheet of a workbook as rows of strings.
pub fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path).map_err(|error| IngestError::Parse {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;
    let sheet_names = workbook.sheet_names();
    let sheet_name = sheet_names.first().cloned().ok_or_else(|| IngestError::Parse {
        path: path.to_path_buf(),
        message: "workbook contains no worksheets".to_string(),
    })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|error| IngestError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.trim().to_string(),
        Data::Float(value) => format_float(*value),
        Data::Int(value) => value.to_string(),
        Data::Bool(value) => {
            if *value {
                "TRUE".to_string()
            } else {
                "FALSE".to_string()
            }
        }
        other => other.to_string().trim().to_string(),
    }
}

/// Render whole floats without the trailing `.0` spreadsheet readers add to
/// numeric-looking identifiers.
fn format_float(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}
