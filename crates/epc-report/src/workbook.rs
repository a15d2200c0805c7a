//! Table writers: XLSX with auto-fit columns, CSV above the sheet ceiling.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::Workbook;
use tracing::{info, warn};

use crate::error::{ReportError, Result};

/// Data rows a worksheet can hold; larger tables fall back to CSV.
pub const EXCEL_MAX_ROWS: usize = 1_048_576;

/// Write a table as an XLSX workbook with auto-fitted column widths.
pub fn write_xlsx(path: &Path, columns: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (index, name) in columns.iter().enumerate() {
        worksheet
            .write_string(0, index as u16, name.as_str())
            .map_err(|error| write_error(path, &error))?;
    }
    for (row_index, row) in rows.iter().enumerate() {
        for (col_index, value) in row.iter().enumerate() {
            worksheet
                .write_string((row_index + 1) as u32, col_index as u16, value.as_str())
                .map_err(|error| write_error(path, &error))?;
        }
    }
    worksheet.autofit();
    workbook
        .save(path)
        .map_err(|error| write_error(path, &error))?;
    info!(path = %path.display(), rows = rows.len(), "workbook saved");
    Ok(())
}

/// Write a table as CSV.
pub fn write_csv(path: &Path, columns: &[String], rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|error| write_error(path, &error))?;
    writer
        .write_record(columns)
        .map_err(|error| write_error(path, &error))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|error| write_error(path, &error))?;
    }
    writer.flush().map_err(|error| write_error(path, &error))?;
    info!(path = %path.display(), rows = rows.len(), "csv saved");
    Ok(())
}

/// Write a table into `dir` as `<stem>.xlsx`, or `<stem>.csv` when the row
/// count exceeds the worksheet ceiling. Returns the path written.
pub fn write_table_auto(
    dir: &Path,
    stem: &str,
    columns: &[String],
    rows: &[Vec<String>],
) -> Result<PathBuf> {
    if rows.len() > EXCEL_MAX_ROWS {
        warn!(
            rows = rows.len(),
            "table exceeds the worksheet row ceiling, saving as CSV"
        );
        let path = dir.join(format!("{stem}.csv"));
        write_csv(&path, columns, rows)?;
        return Ok(path);
    }
    let path = dir.join(format!("{stem}.xlsx"));
    write_xlsx(&path, columns, rows)?;
    Ok(path)
}

fn write_error(path: &Path, error: &dyn std::fmt::Display) -> ReportError {
    ReportError::Write {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}
