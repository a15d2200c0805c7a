//! Per-file extraction and normalization.
//!
//! Once a batch has a fixed EPC column, each file runs the same pipeline:
//! drop empty rows/columns, select the column, truncate, prefix-filter,
//! optionally likeness-filter, then attach filename-derived metadata. A
//! file that cannot contribute is skipped with a reason, never fatal.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use epc_ingest::{ParseStrategy, RawTable, loose_epc_like, read_table};
use epc_model::{BatchSettings, EpcRecord};

/// Why a file was excluded from its batch.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub enum SkipReason {
    /// No parse strategy could read the file.
    Unreadable { message: String },
    /// The batch's column index does not exist in this file's layout.
    ColumnOutOfRange { index: usize, columns: usize },
    /// The EPC column held no values after dropping missing cells.
    EmptyAfterFilter,
    /// A named table without the canonical identifier column.
    MissingEpcColumn,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable { message } => write!(f, "unreadable: {message}"),
            SkipReason::ColumnOutOfRange { index, columns } => {
                write!(f, "column index {index} out of range ({columns} columns)")
            }
            SkipReason::EmptyAfterFilter => write!(f, "EPC column empty"),
            SkipReason::MissingEpcColumn => write!(f, "no EPC column found"),
        }
    }
}

/// One excluded file and the reason, collected for end-of-run reporting.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Read and extract one file with the batch's fixed column index.
pub fn extract_file(
    path: &Path,
    strategy: ParseStrategy,
    column: usize,
    settings: &BatchSettings,
) -> Result<Vec<EpcRecord>, SkipReason> {
    let mut table = match read_table(path, strategy) {
        Ok(table) => table,
        Err(error) => {
            return Err(SkipReason::Unreadable {
                message: error.to_string(),
            });
        }
    };
    extract_table(&mut table, path, column, settings)
}

/// Extraction core, separated from file I/O.
pub fn extract_table(
    table: &mut RawTable,
    path: &Path,
    column: usize,
    settings: &BatchSettings,
) -> Result<Vec<EpcRecord>, SkipReason> {
    table.drop_empty();
    let columns = table.column_count();
    if column >= columns {
        return Err(SkipReason::ColumnOutOfRange { index: column, columns });
    }
    let values = table.column_values(column);
    if values.is_empty() {
        return Err(SkipReason::EmptyAfterFilter);
    }
    let candidates = values.len();
    let mut records = Vec::new();
    for value in values {
        let Some(kept) = settings.truncate_and_filter(&value) else {
            continue;
        };
        if settings.likeness_filter && !loose_epc_like(&kept) {
            continue;
        }
        records.push(EpcRecord::from_scan(kept, path));
    }
    if records.len() < candidates {
        debug!(
            path = %path.display(),
            kept = records.len(),
            dropped = candidates - records.len(),
            "filters dropped values"
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use epc_model::{ATTR_LOCATION, ATTR_READER};
    use std::path::PathBuf;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            None,
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn out_of_range_column_skips_file() {
        let mut raw = table(&[&["AABBCCDD11223344"]]);
        let result = extract_table(
            &mut raw,
            &PathBuf::from("R1_LocA.csv"),
            3,
            &BatchSettings::default(),
        );
        assert_eq!(
            result.unwrap_err(),
            SkipReason::ColumnOutOfRange { index: 3, columns: 1 }
        );
    }

    #[test]
    fn empty_column_skips_file() {
        let mut raw = table(&[&["x", ""], &["y", " "]]);
        // Column 1 disappears entirely once empty columns are dropped.
        let result = extract_table(
            &mut raw,
            &PathBuf::from("R1_LocA.csv"),
            1,
            &BatchSettings::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn filters_apply_in_order() {
        let settings = BatchSettings {
            truncate_len: Some(4),
            prefixes: vec!["01".to_string()],
            likeness_filter: false,
        };
        let mut raw = table(&[&["01AABBCC"], &["02AABBCC"], &["01FF"]]);
        let records = extract_table(&mut raw, &PathBuf::from("R1_LocA.csv"), 0, &settings).unwrap();
        let epcs: Vec<&str> = records.iter().map(|record| record.epc.as_str()).collect();
        assert_eq!(epcs, vec!["01AA", "01FF"]);
    }

    #[test]
    fn likeness_filter_drops_short_values() {
        let settings = BatchSettings {
            likeness_filter: true,
            ..BatchSettings::default()
        };
        let mut raw = table(&[&["AABBCCDD"], &["short"]]);
        let records = extract_table(&mut raw, &PathBuf::from("R1_LocA.csv"), 0, &settings).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].epc, "AABBCCDD");
    }

    #[test]
    fn metadata_comes_from_the_file_stem() {
        let mut raw = table(&[&["AABBCCDD11223344"]]);
        let records = extract_table(
            &mut raw,
            &PathBuf::from("scans/R2_LocB.csv"),
            0,
            &BatchSettings::default(),
        )
        .unwrap();
        assert_eq!(records[0].attribute(ATTR_READER), Some("R2"));
        assert_eq!(records[0].attribute(ATTR_LOCATION), Some("LocB"));
    }
}
