//! Coarse format classification of raw scan files.
//!
//! The signature is only used to physically group files; it is not
//! retained afterwards.

use std::fmt;
use std::path::Path;

use epc_ingest::{RawTable, is_hex_identifier, read_sample};

/// Rows sampled when classifying a file.
pub const SAMPLE_ROWS: usize = 5;

/// Fraction of first-column values that must look hexadecimal for the
/// raw-EPC signature.
pub const RAW_EPC_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatSignature {
    /// Wide reader export: five or more columns with EPC and RSSI headers.
    Rfid,
    /// One or two columns, mostly hexadecimal identifiers.
    RawEpc,
    Unknown,
    /// Zero bytes, or nothing left after trimming empty rows and columns.
    Empty,
    Unreadable,
}

impl FormatSignature {
    /// Folder-friendly label.
    pub fn label(self) -> &'static str {
        match self {
            FormatSignature::Rfid => "Format_RFID",
            FormatSignature::RawEpc => "Format_Raw_EPC",
            FormatSignature::Unknown => "Format_Unknown",
            FormatSignature::Empty => "Format_Empty",
            FormatSignature::Unreadable => "Unreadable",
        }
    }
}

impl fmt::Display for FormatSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a file from a small headerless sample.
pub fn classify_file(path: &Path) -> FormatSignature {
    match std::fs::metadata(path) {
        Ok(metadata) if metadata.len() == 0 => return FormatSignature::Empty,
        Ok(_) => {}
        Err(_) => return FormatSignature::Unreadable,
    }
    let mut table = match read_sample(path, SAMPLE_ROWS) {
        Ok(table) => table,
        Err(_) => return FormatSignature::Unreadable,
    };
    table.drop_empty();
    if table.is_empty() {
        return FormatSignature::Empty;
    }
    classify_table(&table)
}

/// Classification core over an already-trimmed sample.
pub fn classify_table(table: &RawTable) -> FormatSignature {
    let Some(first_row) = table.rows.first() else {
        return FormatSignature::Empty;
    };
    let columns = table.column_count();
    let has_epc_token = first_row
        .iter()
        .any(|cell| cell.to_lowercase().contains("epc"));
    let has_rssi_token = first_row
        .iter()
        .any(|cell| cell.to_lowercase().contains("rssi"));
    if columns >= 5 && has_epc_token && has_rssi_token {
        return FormatSignature::Rfid;
    }
    if columns <= 2 {
        let total = table.rows.len();
        let hex = table
            .rows
            .iter()
            .filter(|row| row.first().is_some_and(|cell| is_hex_identifier(cell)))
            .count();
        if total > 0 && hex as f64 / total as f64 > RAW_EPC_THRESHOLD {
            return FormatSignature::RawEpc;
        }
    }
    FormatSignature::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            None,
            rows.iter()
                .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn wide_export_with_epc_and_rssi_headers_is_rfid() {
        let sample = table(&[
            &["EPC Value", "Antenna", "RSSI", "Count", "Time"],
            &["AABBCCDD", "1", "-60", "3", "12:00"],
        ]);
        assert_eq!(classify_table(&sample), FormatSignature::Rfid);
    }

    #[test]
    fn narrow_mostly_hex_sample_is_raw_epc() {
        // 8 of 10 first-column values are hexadecimal: 80% clears the 70%
        // threshold.
        let mut rows: Vec<Vec<String>> = (0..8)
            .map(|index| vec![format!("AABBCCD{index}"), String::new()])
            .collect();
        rows.push(vec!["not hex".to_string(), String::new()]);
        rows.push(vec!["also not".to_string(), String::new()]);
        let sample = RawTable::new(None, rows);
        assert_eq!(classify_table(&sample), FormatSignature::RawEpc);
    }

    #[test]
    fn exactly_at_threshold_is_not_raw_epc() {
        // 7 of 10 is not strictly greater than the threshold.
        let mut rows: Vec<Vec<String>> = (0..7)
            .map(|index| vec![format!("AABBCCD{index}")])
            .collect();
        rows.extend((0..3).map(|_| vec!["nope".to_string()]));
        let sample = RawTable::new(None, rows);
        assert_eq!(classify_table(&sample), FormatSignature::Unknown);
    }

    #[test]
    fn anything_else_is_unknown() {
        let sample = table(&[&["a", "b", "c"], &["1", "2", "3"]]);
        assert_eq!(classify_table(&sample), FormatSignature::Unknown);
    }
}
