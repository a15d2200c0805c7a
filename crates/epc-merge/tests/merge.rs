//! Merge contract tests.

use epc_merge::{MergePolicy, grouped_merge, merge_batches, merge_grouped_records, simple_merge};
use epc_model::{ATTR_LOCATION, ATTR_READER, Batch, EpcRecord, MergedResult, UNKNOWN_VALUE};

#[allow(clippy::wildcard_imports)]
use proptest::prelude::*;

fn record(epc: &str, location: &str) -> EpcRecord {
    EpcRecord::new(epc).with_attribute(ATTR_LOCATION, location)
}

#[test]
fn duplicate_epcs_collapse_into_sorted_joined_sets() {
    let batch = Batch::new(vec![record("X", "B"), record("X", "A")]);
    let merged = grouped_merge(&[batch]);
    assert_eq!(merged.height(), 1);
    assert_eq!(merged.row_for_epc("X").unwrap()[1], "A, B");
}

#[test]
fn grouped_merge_is_commutative_over_batch_order() {
    let b1 = Batch::new(vec![record("X", "A"), record("Y", "C")]);
    let b2 = Batch::new(vec![record("X", "B")]);
    let forward = grouped_merge(&[b1.clone(), b2.clone()]);
    let backward = grouped_merge(&[b2, b1]);
    assert_eq!(forward, backward);
}

#[test]
fn grouped_merge_is_idempotent_on_the_aggregate() {
    let batch = Batch::new(vec![record("X", "A"), record("X", "B")]);
    let once = grouped_merge(&[batch]);
    let again = remerge(&once);
    assert_eq!(once, again);
}

#[test]
fn unknown_placeholders_collapse_once_real_values_exist() {
    let with_location = record("X", "LocA");
    let without = EpcRecord::new("X");
    let merged = grouped_merge(&[Batch::new(vec![without, with_location])]);
    assert_eq!(merged.row_for_epc("X").unwrap()[1], "LocA");
}

#[test]
fn all_unknown_attributes_stay_unknown() {
    let merged = grouped_merge(&[Batch::new(vec![
        record("X", ""),
        record("X", UNKNOWN_VALUE),
    ])]);
    assert_eq!(merged.row_for_epc("X").unwrap()[1], UNKNOWN_VALUE);
}

#[test]
fn columns_sort_case_insensitively_after_the_identifier() {
    let epc = EpcRecord::new("X")
        .with_attribute("location", "a")
        .with_attribute(ATTR_READER, "r")
        .with_attribute("Zone", "z");
    let merged = grouped_merge(&[Batch::new(vec![epc])]);
    assert_eq!(merged.columns, vec!["EPC", "location", ATTR_READER, "Zone"]);
}

#[test]
fn rows_come_out_ascending_by_epc() {
    let batch = Batch::new(vec![record("B", "x"), record("A", "y"), record("C", "z")]);
    let merged = grouped_merge(&[batch]);
    let epcs: Vec<&String> = merged.rows.iter().map(|row| &row[0]).collect();
    assert_eq!(epcs, vec!["A", "B", "C"]);
}

#[test]
fn simple_merge_keeps_the_first_occurrence() {
    let batch = Batch::new(vec![record("X", "first"), record("X", "second")]);
    let merged = simple_merge(&[batch]);
    assert_eq!(merged.height(), 1);
    assert_eq!(merged.row_for_epc("X").unwrap()[1], "first");
}

#[test]
fn merge_policy_selects_the_contract() {
    let batches = [Batch::new(vec![record("X", "A"), record("X", "B")])];
    let grouped = merge_batches(&batches, MergePolicy::Grouped);
    let first = merge_batches(&batches, MergePolicy::KeepFirst);
    assert_eq!(grouped.row_for_epc("X").unwrap()[1], "A, B");
    assert_eq!(first.row_for_epc("X").unwrap()[1], "A");
}

/// Rebuild records from a merged result and group them again.
fn remerge(merged: &MergedResult) -> MergedResult {
    let records: Vec<EpcRecord> = merged
        .rows
        .iter()
        .map(|row| {
            let mut record = EpcRecord::new(row[0].clone());
            for (name, value) in merged.columns.iter().skip(1).zip(row.iter().skip(1)) {
                record.attributes.insert(name.clone(), value.clone());
            }
            record
        })
        .collect();
    let refs: Vec<&EpcRecord> = records.iter().collect();
    merge_grouped_records(&refs)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn batch_order_never_changes_the_grouped_result(
        pairs in proptest::collection::vec(("[0-9A-F]{8,24}", "[A-Z][a-z]{2}"), 0..20),
        split in any::<usize>(),
    ) {
        let records: Vec<EpcRecord> = pairs
            .iter()
            .map(|(epc, location)| record(epc, location))
            .collect();
        let cut = if records.is_empty() { 0 } else { split % records.len() };
        let b1 = Batch::new(records[..cut].to_vec());
        let b2 = Batch::new(records[cut..].to_vec());
        let forward = grouped_merge(&[b1.clone(), b2.clone()]);
        let backward = grouped_merge(&[b2, b1]);
        assert_eq!(forward, backward);
    }
}
