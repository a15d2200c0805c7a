//! Filesystem tests for classification, sorting, renaming, and marking.

use std::path::PathBuf;

use tempfile::TempDir;

use epc_organize::{
    FormatSignature, RenamePattern, SortOptions, apply_renames, classify_file, mark_processed,
    plan_renames, sort_by_format,
};

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("write fixture");
    path
}

#[test]
fn classifies_files_by_shape() {
    let dir = TempDir::new().unwrap();
    let rfid = write_file(
        &dir,
        "rfid.csv",
        "EPC,Antenna,RSSI,Count,Time\nAABBCCDD,1,-60,3,12:00\n",
    );
    let raw = write_file(
        &dir,
        "raw.csv",
        "AABBCCD0\nAABBCCD1\nAABBCCD2\nAABBCCD3\nnot hex\n",
    );
    let unknown = write_file(&dir, "unknown.csv", "a,b,c\n1,2,3\n");
    let empty = write_file(&dir, "empty.csv", "");

    assert_eq!(classify_file(&rfid), FormatSignature::Rfid);
    assert_eq!(classify_file(&raw), FormatSignature::RawEpc);
    assert_eq!(classify_file(&unknown), FormatSignature::Unknown);
    assert_eq!(classify_file(&empty), FormatSignature::Empty);
}

#[test]
fn sorts_files_into_first_seen_signature_groups() {
    let dir = TempDir::new().unwrap();
    write_file(&dir, "a_raw.csv", "AABBCCD0\nAABBCCD1\n");
    write_file(&dir, "b_unknown.csv", "a,b,c\n1,2,3\n");
    write_file(&dir, "c_raw.csv", "AABBCCD2\nAABBCCD3\n");

    let report = sort_by_format(dir.path(), SortOptions::default()).unwrap();
    assert_eq!(report.groups.len(), 2);
    // First-seen order: raw files were encountered first.
    assert_eq!(report.groups[0].signature, FormatSignature::RawEpc);
    assert_eq!(report.groups[0].files.len(), 2);
    assert!(dir.path().join("FormatGroup_1").is_dir());
    assert!(dir.path().join("FormatGroup_2").is_dir());
    assert!(!dir.path().join("a_raw.csv").exists());
    assert!(
        dir.path()
            .join("FormatGroup_1")
            .join("a_raw.csv")
            .exists()
    );
}

#[test]
fn empty_files_survive_without_the_delete_flag() {
    let dir = TempDir::new().unwrap();
    let empty = write_file(&dir, "empty.csv", "");
    let report = sort_by_format(dir.path(), SortOptions::default()).unwrap();
    assert!(report.deleted.is_empty());
    assert!(!empty.exists());
    assert!(
        dir.path()
            .join("FormatGroup_1")
            .join("empty.csv")
            .exists()
    );
}

#[test]
fn empty_files_are_removed_with_the_delete_flag() {
    let dir = TempDir::new().unwrap();
    let empty = write_file(&dir, "empty.csv", "");
    let report = sort_by_format(dir.path(), SortOptions { delete_empty: true }).unwrap();
    assert_eq!(report.deleted.len(), 1);
    assert!(!empty.exists());
    assert!(report.groups.is_empty());
}

#[test]
fn renames_apply_the_planned_names() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "one.csv", "x");
    let second = write_file(&dir, "two.csv", "x");
    let plans = plan_renames(
        &[first.clone(), second.clone()],
        &RenamePattern::Base("R1_LocA".to_string()),
    );
    let report = apply_renames(&plans);
    assert_eq!(report.applied.len(), 2);
    assert!(report.failed.is_empty());
    assert!(!first.exists());
    assert!(dir.path().join("R1_LocA_1.csv").exists());
    assert!(dir.path().join("R1_LocA_2.csv").exists());
}

#[test]
fn processed_folders_get_the_marker_once() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("batch1");
    std::fs::create_dir(&input).unwrap();
    let marked = mark_processed(&input, "_MERGED").unwrap();
    assert!(marked.ends_with("batch1_MERGED"));
    assert!(marked.is_dir());
    // Marking again is a no-op.
    let again = mark_processed(&marked, "_MERGED").unwrap();
    assert_eq!(again, marked);
}
