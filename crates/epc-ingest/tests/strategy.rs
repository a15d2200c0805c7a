//! Integration tests for the parse strategies against real files.

use std::path::PathBuf;

use tempfile::TempDir;

use epc_ingest::{IngestError, ParseStrategy, read_table};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn content_scan_skips_reader_preamble() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "scan.csv",
        "Session Report\nTotal Tags: 2\n\n1234567890ABCDEF1234,1\nABCDEF1234567890FFFF,3\n",
    );
    let table = read_table(&path, ParseStrategy::ContentScan).unwrap();
    assert!(table.header.is_none());
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], "1234567890ABCDEF1234");
}

#[test]
fn content_scan_reports_files_without_tag_data() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.csv", "Session Report\nTotal Tags: 0\n");
    assert!(matches!(
        read_table(&path, ParseStrategy::ContentScan),
        Err(IngestError::NoDataFound { .. })
    ));
}

#[test]
fn header_keyword_finds_tag_count_header() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "scan.csv",
        "exported by reader\nEPC,Count\nAABBCCDD0011,4\nEEFF22334455,1\n",
    );
    let table = read_table(&path, ParseStrategy::HeaderKeyword).unwrap();
    assert_eq!(
        table.header,
        Some(vec!["EPC".to_string(), "Count".to_string()])
    );
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn header_keyword_falls_back_to_single_column() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "raw.csv", "AABBCCDD0011\nEEFF22334455\n");
    let table = read_table(&path, ParseStrategy::HeaderKeyword).unwrap();
    assert!(table.header.is_none());
    assert_eq!(
        table.rows,
        vec![
            vec!["AABBCCDD0011".to_string()],
            vec!["EEFF22334455".to_string()]
        ]
    );
}

#[test]
fn delimiter_sniff_handles_tab_delimited_export() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "scan.csv",
        "report\tv2\nreader\tR1\n\t\nEPC\tRSSI\nAABBCCDD0011\t-60\nEEFF22334455\t-58\n",
    );
    let table = read_table(&path, ParseStrategy::DelimiterSniff).unwrap();
    assert_eq!(table.header, Some(vec!["EPC".to_string(), "RSSI".to_string()]));
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn delimiter_sniff_reparses_marker_header_as_data() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "scan.csv",
        "preamble,1\npreamble,2\npreamble,3\n//RAW,DUMP\nAABBCCDD0011,1\n",
    );
    let table = read_table(&path, ParseStrategy::DelimiterSniff).unwrap();
    assert!(table.header.is_none());
    // The marker row stays in the data when no header applies.
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn delimiter_sniff_falls_back_to_headerless_comma() {
    let dir = TempDir::new().unwrap();
    // Two rows only: nothing survives the preamble skip, so the final
    // headerless fallback has to carry it.
    let path = write_file(&dir, "short.csv", "AABBCCDD0011\nEEFF22334455\n");
    let table = read_table(&path, ParseStrategy::DelimiterSniff).unwrap();
    assert!(table.header.is_none());
    assert_eq!(table.rows.len(), 2);
}

#[test]
fn workbook_content_scan_reads_xlsx() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("scan.xlsx");
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Session Report").unwrap();
    worksheet.write_string(1, 0, "1234567890ABCDEF1234").unwrap();
    worksheet.write_string(2, 0, "ABCDEF1234567890FFFF").unwrap();
    workbook.save(&path).unwrap();

    let table = read_table(&path, ParseStrategy::ContentScan).unwrap();
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], "1234567890ABCDEF1234");
}
