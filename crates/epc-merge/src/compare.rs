//! Reconciliation of merged EPCs against master lists.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::info;

use epc_ingest::read_named_table;
use epc_model::{ATTR_EPC, ATTR_LOCATION, ATTR_READER, DataTable};

use crate::extract::{SkipReason, SkippedFile};

/// Marker written to the `Found` column for reconciled identifiers.
pub const FOUND_MARKER: &str = "✓";

/// Location/reader metadata carried forward from the merged output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedEpcInfo {
    pub location: String,
    pub reader: String,
}

/// Whether master files are annotated separately or stacked into one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompareMode {
    #[default]
    PerFile,
    Combined,
}

/// The full comparison outcome, ready for the report writers.
#[derive(Debug, Clone)]
pub struct CompareReport {
    /// Output name (without extension) and annotated table, one per master
    /// file or a single combined pair.
    pub outputs: Vec<(String, DataTable)>,
    /// Summary with per-file rows and the grand-total row last.
    pub summary: DataTable,
    pub total_rows: usize,
    pub found_rows: usize,
    pub skipped: Vec<SkippedFile>,
}

/// Load merged outputs into an EPC map; later files win duplicate keys.
pub fn load_merged_epcs(
    files: &[PathBuf],
) -> (BTreeMap<String, MergedEpcInfo>, Vec<SkippedFile>) {
    let mut merged = BTreeMap::new();
    let mut skipped = Vec::new();
    for file in files {
        let table = match read_named_table(file) {
            Ok(table) => table,
            Err(error) => {
                skipped.push(SkippedFile {
                    path: file.clone(),
                    reason: SkipReason::Unreadable {
                        message: error.to_string(),
                    },
                });
                continue;
            }
        };
        let Some(epc_index) = table.column_index(ATTR_EPC) else {
            skipped.push(SkippedFile {
                path: file.clone(),
                reason: SkipReason::MissingEpcColumn,
            });
            continue;
        };
        let location_index = table.column_index(ATTR_LOCATION);
        let reader_index = table.column_index(ATTR_READER);
        for row in &table.rows {
            let epc = row.get(epc_index).map(|cell| cell.trim()).unwrap_or("");
            if epc.is_empty() {
                continue;
            }
            merged.insert(
                epc.to_string(),
                MergedEpcInfo {
                    location: indexed_value(row, location_index),
                    reader: indexed_value(row, reader_index),
                },
            );
        }
    }
    (merged, skipped)
}

fn indexed_value(row: &[String], index: Option<usize>) -> String {
    index
        .and_then(|index| row.get(index))
        .map(|cell| cell.trim().to_string())
        .unwrap_or_default()
}

/// Compare every master file against the merged EPC set.
pub fn compare_masters(
    master_files: &[PathBuf],
    merged: &BTreeMap<String, MergedEpcInfo>,
    mode: CompareMode,
) -> CompareReport {
    let mut outputs = Vec::new();
    let mut skipped = Vec::new();
    let mut summary_rows: Vec<(String, usize, usize)> = Vec::new();
    let mut total_rows = 0usize;
    let mut found_rows = 0usize;
    let mut combined: Option<DataTable> = None;

    for file in master_files {
        let table = match read_named_table(file) {
            Ok(table) => table,
            Err(error) => {
                skipped.push(SkippedFile {
                    path: file.clone(),
                    reason: SkipReason::Unreadable {
                        message: error.to_string(),
                    },
                });
                continue;
            }
        };
        let Some((annotated, found)) = annotate_master(&table, merged) else {
            skipped.push(SkippedFile {
                path: file.clone(),
                reason: SkipReason::MissingEpcColumn,
            });
            continue;
        };
        let stem = file
            .file_stem()
            .and_then(|value| value.to_str())
            .unwrap_or("master")
            .to_string();
        info!(path = %file.display(), found, rows = annotated.height(), "compared master file");
        total_rows += annotated.height();
        found_rows += found;
        match mode {
            CompareMode::PerFile => {
                summary_rows.push((stem.clone(), annotated.height(), found));
                outputs.push((format!("{stem}_Compared"), annotated));
            }
            CompareMode::Combined => stack(&mut combined, annotated),
        }
    }

    if let Some(table) = combined {
        summary_rows.push(("All Merged".to_string(), total_rows, found_rows));
        outputs.push(("Master_Comparison_Combined".to_string(), table));
    }

    CompareReport {
        outputs,
        summary: summary_table(&summary_rows, total_rows, found_rows),
        total_rows,
        found_rows,
        skipped,
    }
}

/// Annotate one master table with found markers and merged metadata.
///
/// Returns the annotated table and the found count, or `None` when the
/// table has no EPC column.
pub fn annotate_master(
    table: &DataTable,
    merged: &BTreeMap<String, MergedEpcInfo>,
) -> Option<(DataTable, usize)> {
    let epc_index = table.column_index(ATTR_EPC)?;
    let mut columns = table.columns.clone();
    columns.push("Found".to_string());
    columns.push("Location Found".to_string());
    columns.push("Reader Used".to_string());
    let mut annotated = DataTable::new(columns);
    let mut found = 0usize;
    for row in &table.rows {
        let epc = row.get(epc_index).map(|cell| cell.trim()).unwrap_or("");
        let mut out = row.clone();
        match merged.get(epc) {
            Some(info) => {
                found += 1;
                out.push(FOUND_MARKER.to_string());
                out.push(info.location.clone());
                out.push(info.reader.clone());
            }
            None => {
                out.push(String::new());
                out.push(String::new());
                out.push(String::new());
            }
        }
        annotated.push_row(out);
    }
    Some((annotated, found))
}

/// Stack annotated tables, unioning columns in first-seen order.
fn stack(combined: &mut Option<DataTable>, table: DataTable) {
    let base = match combined {
        Some(base) => base,
        None => {
            *combined = Some(table);
            return;
        }
    };
    for column in &table.columns {
        if base.column_index(column).is_none() {
            base.columns.push(column.clone());
            for row in &mut base.rows {
                row.push(String::new());
            }
        }
    }
    for row in &table.rows {
        let mut out = vec![String::new(); base.columns.len()];
        for (index, column) in table.columns.iter().enumerate() {
            if let Some(target) = base.column_index(column) {
                out[target] = row.get(index).cloned().unwrap_or_default();
            }
        }
        base.rows.push(out);
    }
}

/// Percentage formatted to two decimals, zero-safe.
pub fn percent_found(found: usize, total: usize) -> String {
    let percent = if total == 0 {
        0.0
    } else {
        found as f64 / total as f64 * 100.0
    };
    format!("{percent:.2}%")
}

fn summary_table(rows: &[(String, usize, usize)], total_rows: usize, found_rows: usize) -> DataTable {
    let mut summary = DataTable::new(vec![
        "Master File".to_string(),
        "Total Rows".to_string(),
        "EPCs Found".to_string(),
        "EPCs Not Found".to_string(),
        "% Found".to_string(),
    ]);
    for (name, total, found) in rows {
        summary.push_row(vec![
            name.clone(),
            total.to_string(),
            found.to_string(),
            (total - found).to_string(),
            percent_found(*found, *total),
        ]);
    }
    summary.push_row(vec![
        "ALL FILES".to_string(),
        total_rows.to_string(),
        found_rows.to_string(),
        (total_rows - found_rows).to_string(),
        percent_found(found_rows, total_rows),
    ]);
    summary
}
