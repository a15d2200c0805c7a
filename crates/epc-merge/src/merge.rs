//! Merge and reconcile accumulated batches.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use tracing::info;

use epc_ingest::read_named_table;
use epc_model::{ATTR_EPC, ATTR_SOURCE_FILE, Batch, BatchSettings, EpcRecord, MergedResult, UNKNOWN_VALUE};

use crate::extract::{SkipReason, SkippedFile};

/// Which duplicate-handling contract the merge step applies.
///
/// Grouped aggregation is the documented default: it is the superset of
/// information. Keep-first exists for outputs that must match the older
/// tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    #[default]
    Grouped,
    KeepFirst,
}

/// Merge all batches under the chosen policy.
pub fn merge_batches(batches: &[Batch], policy: MergePolicy) -> MergedResult {
    match policy {
        MergePolicy::Grouped => grouped_merge(batches),
        MergePolicy::KeepFirst => simple_merge(batches),
    }
}

/// Grouped merge: one row per distinct EPC, every attribute collapsed into
/// the sorted, de-duplicated, comma-joined set of real values contributed
/// across the group.
pub fn grouped_merge(batches: &[Batch]) -> MergedResult {
    let records: Vec<&EpcRecord> = batches
        .iter()
        .flat_map(|batch| batch.records.iter())
        .collect();
    merge_grouped_records(&records)
}

/// Grouped merge over loose records.
///
/// Missing attributes become the `Unknown` placeholder before grouping so
/// the aggregate never silently omits a contributor; the placeholder and
/// empty strings are excluded from the joined set, which falls back to
/// `Unknown` when nothing real remains.
pub fn merge_grouped_records(records: &[&EpcRecord]) -> MergedResult {
    let columns = ordered_columns(records);
    let mut groups: BTreeMap<String, Vec<BTreeSet<String>>> = BTreeMap::new();
    for record in records {
        let epc = record.epc.trim();
        if epc.is_empty() {
            continue;
        }
        let slots = groups
            .entry(epc.to_string())
            .or_insert_with(|| vec![BTreeSet::new(); columns.len() - 1]);
        for (slot, name) in slots.iter_mut().zip(columns.iter().skip(1)) {
            let value = record
                .attribute(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(UNKNOWN_VALUE);
            if !value.eq_ignore_ascii_case(UNKNOWN_VALUE) {
                slot.insert(value.to_string());
            }
        }
    }

    let mut result = MergedResult {
        columns,
        rows: Vec::with_capacity(groups.len()),
    };
    for (epc, slots) in groups {
        let mut row = Vec::with_capacity(result.columns.len());
        row.push(epc);
        for slot in slots {
            if slot.is_empty() {
                row.push(UNKNOWN_VALUE.to_string());
            } else {
                row.push(slot.into_iter().collect::<Vec<_>>().join(", "));
            }
        }
        result.rows.push(row);
    }
    result
}

/// Legacy merge: concatenate, drop duplicate EPCs keeping the first
/// occurrence, sort ascending by EPC.
pub fn simple_merge(batches: &[Batch]) -> MergedResult {
    let records: Vec<&EpcRecord> = batches
        .iter()
        .flat_map(|batch| batch.records.iter())
        .collect();
    let columns = ordered_columns(&records);
    let mut seen = BTreeSet::new();
    let mut kept: Vec<&EpcRecord> = Vec::new();
    for record in records {
        let epc = record.epc.trim();
        if epc.is_empty() {
            continue;
        }
        if seen.insert(epc.to_string()) {
            kept.push(record);
        }
    }
    kept.sort_by(|a, b| a.epc.trim().cmp(b.epc.trim()));

    let mut result = MergedResult {
        columns,
        rows: Vec::with_capacity(kept.len()),
    };
    for record in kept {
        let mut row = Vec::with_capacity(result.columns.len());
        row.push(record.epc.trim().to_string());
        for name in result.columns.iter().skip(1) {
            let value = record
                .attribute(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .unwrap_or(UNKNOWN_VALUE);
            row.push(value.to_string());
        }
        result.rows.push(row);
    }
    result
}

/// Identifier column first, remaining attribute names sorted
/// case-insensitively.
fn ordered_columns(records: &[&EpcRecord]) -> Vec<String> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for record in records {
        names.extend(record.attributes.keys().cloned());
    }
    let mut attributes: Vec<String> = names.into_iter().collect();
    attributes.sort_by_key(|name| name.to_lowercase());
    let mut columns = Vec::with_capacity(attributes.len() + 1);
    columns.push(ATTR_EPC.to_string());
    columns.extend(attributes);
    columns
}

/// Outcome of merging already-merged tables.
#[derive(Debug, Clone)]
pub struct FinalMergeReport {
    pub merged: MergedResult,
    /// Per-file record counts after filtering.
    pub loaded: Vec<(PathBuf, usize)>,
    pub skipped: Vec<SkippedFile>,
}

/// Merge already-merged, header-first tables into one grouped result.
///
/// The source-file column is dropped from the attribute union, truncation
/// and prefix settings re-apply to the identifier, and a table without an
/// `EPC` column is skipped and reported.
pub fn merge_final_files(files: &[PathBuf], settings: &BatchSettings) -> FinalMergeReport {
    let mut records: Vec<EpcRecord> = Vec::new();
    let mut loaded = Vec::new();
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
        let mut count = 0usize;
        for row in &table.rows {
            let raw = row.get(epc_index).map(|cell| cell.trim()).unwrap_or("");
            if raw.is_empty() {
                continue;
            }
            let Some(epc) = settings.truncate_and_filter(raw) else {
                continue;
            };
            let mut record = EpcRecord::new(epc);
            for (index, name) in table.columns.iter().enumerate() {
                if index == epc_index || name == ATTR_SOURCE_FILE {
                    continue;
                }
                let value = row.get(index).map(|cell| cell.trim()).unwrap_or("");
                record.attributes.insert(name.clone(), value.to_string());
            }
            records.push(record);
            count += 1;
        }
        info!(path = %file.display(), records = count, "loaded merged file");
        loaded.push((file.clone(), count));
    }
    let refs: Vec<&EpcRecord> = records.iter().collect();
    FinalMergeReport {
        merged: merge_grouped_records(&refs),
        loaded,
        skipped,
    }
}
