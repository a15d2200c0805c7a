use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use epc_ingest::{
    DEFAULT_PREVIEW_ROWS, ParseStrategy, detect_epc_column, is_tabular_file, list_scan_files,
    read_table, score_columns,
};
use epc_merge::{
    ColumnChoice, CompareMode, CompareReport, FinalMergeReport, MergePolicy, MergeSession,
    compare_masters, load_merged_epcs, merge_batches, merge_final_files,
};
use epc_model::{BatchSettings, parse_prefixes, parse_truncation};
use epc_organize::{
    RenamePattern, SortOptions, SortReport, apply_renames, mark_processed, plan_renames,
    sort_by_format,
};

use crate::cli::{CompareArgs, FinalizeArgs, MergeArgs, PreviewArgs, RenameArgs, SortArgs};
use crate::progress::with_spinner;
use crate::types::{
    BatchSummary, CompareOutcome, FinalizeOutcome, MergeOutcome, PreviewOutcome, RenameOutcome,
};

/// One group of files loaded as a batch, with the folder retained for
/// `--mark-processed`.
struct BatchGroup {
    label: String,
    files: Vec<PathBuf>,
    folder: Option<PathBuf>,
}

/// Folders each become one batch; loose files form one batch together.
fn batch_groups(inputs: &[PathBuf]) -> Result<Vec<BatchGroup>> {
    let mut groups = Vec::new();
    let mut loose: Vec<PathBuf> = Vec::new();
    for input in inputs {
        if input.is_dir() {
            let files = list_scan_files(input)?;
            if files.is_empty() {
                warn!(path = %input.display(), "no scan files in folder");
                continue;
            }
            let label = input
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("folder")
                .to_string();
            groups.push(BatchGroup {
                label,
                files,
                folder: Some(input.clone()),
            });
        } else if is_tabular_file(input) {
            loose.push(input.clone());
        } else {
            warn!(path = %input.display(), "ignoring unsupported input");
        }
    }
    if !loose.is_empty() {
        groups.push(BatchGroup {
            label: "selected files".to_string(),
            files: loose,
            folder: None,
        });
    }
    if groups.is_empty() {
        bail!("no tabular input files found");
    }
    Ok(groups)
}

/// Flatten files and folders into one sorted file list.
fn collect_files(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(list_scan_files(input)?);
        } else if is_tabular_file(input) {
            files.push(input.clone());
        } else {
            warn!(path = %input.display(), "ignoring unsupported input");
        }
    }
    if files.is_empty() {
        bail!("no tabular input files found");
    }
    Ok(files)
}

fn merge_settings(args: &MergeArgs, strategy: ParseStrategy) -> BatchSettings {
    let mut prefixes = Vec::new();
    for entry in &args.prefix {
        prefixes.extend(parse_prefixes(entry));
    }
    let likeness_filter = if args.likeness_filter {
        true
    } else if args.no_likeness_filter {
        false
    } else {
        strategy.default_likeness_filter()
    };
    BatchSettings {
        truncate_len: args.truncate.as_deref().and_then(parse_truncation),
        prefixes,
        likeness_filter,
    }
}

pub fn run_merge(args: &MergeArgs) -> Result<MergeOutcome> {
    let span = info_span!("merge");
    let _guard = span.enter();
    let strategy: ParseStrategy = args.strategy.into();
    let settings = merge_settings(args, strategy);
    let column = match args.column {
        Some(index) => ColumnChoice::Index(index),
        None => ColumnChoice::Auto,
    };
    let groups = batch_groups(&args.inputs)?;

    let mut session = MergeSession::new();
    let mut batches = Vec::new();
    let mut skipped = Vec::new();
    for group in &groups {
        let report = session
            .load_batch(&group.files, strategy, column, &settings)
            .with_context(|| format!("load batch '{}'", group.label))?;
        batches.push(BatchSummary {
            label: group.label.clone(),
            column: report.column,
            files: report.files_loaded,
            records: report.records,
            skipped: report.skipped.len(),
        });
        skipped.extend(report.skipped);
    }

    let total_records = session.total_records();
    if session.is_empty() {
        warn!("no EPC data merged");
        return Ok(MergeOutcome {
            batches,
            total_records,
            merged_rows: 0,
            output: None,
            skipped,
            marked: Vec::new(),
        });
    }

    let policy = if args.legacy_dedupe {
        MergePolicy::KeepFirst
    } else {
        MergePolicy::Grouped
    };
    let loaded = session.into_batches();
    let output_dir = epc_report::merged_dir(&args.output_dir);
    let stem = epc_report::merged_file_stem();
    let (merged_rows, output) = with_spinner(
        "Processing and saving merged EPCs...",
        || -> Result<(usize, PathBuf)> {
            let merged = merge_batches(&loaded, policy);
            let path = epc_report::save_merged(&output_dir, &stem, &merged)?;
            Ok((merged.height(), path))
        },
    )?;

    let mut marked = Vec::new();
    if args.mark_processed {
        for group in &groups {
            let Some(folder) = &group.folder else {
                continue;
            };
            match mark_processed(folder, &args.marker) {
                Ok(path) => marked.push(path),
                Err(error) => warn!(%error, "failed to mark folder as processed"),
            }
        }
    }

    info!(rows = merged_rows, output = %output.display(), "merge complete");
    Ok(MergeOutcome {
        batches,
        total_records,
        merged_rows,
        output: Some(output),
        skipped,
        marked,
    })
}

pub fn run_finalize(args: &FinalizeArgs) -> Result<FinalizeOutcome> {
    let span = info_span!("finalize");
    let _guard = span.enter();
    let files = collect_files(&args.inputs)?;
    let mut prefixes = Vec::new();
    for entry in &args.prefix {
        prefixes.extend(parse_prefixes(entry));
    }
    let settings = BatchSettings {
        truncate_len: args.truncate.as_deref().and_then(parse_truncation),
        prefixes,
        likeness_filter: false,
    };
    let stem = args
        .name
        .clone()
        .unwrap_or_else(epc_report::final_merged_file_stem);
    let output_dir = epc_report::merged_final_dir(&args.output_dir);

    let (report, output) = with_spinner(
        "Processing and saving final merged EPCs...",
        || -> Result<(FinalMergeReport, Option<PathBuf>)> {
            let report = merge_final_files(&files, &settings);
            if report.merged.is_empty() {
                return Ok((report, None));
            }
            let path = epc_report::save_merged(&output_dir, &stem, &report.merged)?;
            Ok((report, Some(path)))
        },
    )?;
    if output.is_none() {
        warn!("no valid files to merge");
    }
    Ok(FinalizeOutcome {
        loaded: report.loaded,
        merged_rows: report.merged.height(),
        output,
        skipped: report.skipped,
    })
}

pub fn run_compare(args: &CompareArgs) -> Result<CompareOutcome> {
    let span = info_span!("compare");
    let _guard = span.enter();
    let merged_files = collect_files(&args.merged).context("collect merged files")?;
    let master_files = collect_files(&args.master).context("collect master files")?;

    let (merged, mut skipped) = load_merged_epcs(&merged_files);
    info!(unique = merged.len(), "loaded merged EPCs");
    if merged.is_empty() {
        bail!("no EPCs loaded from the merged files");
    }

    let mode = if args.combine {
        CompareMode::Combined
    } else {
        CompareMode::PerFile
    };
    let report = with_spinner("Comparing against master lists...", || {
        compare_masters(&master_files, &merged, mode)
    });
    let CompareReport {
        outputs: tables,
        summary,
        total_rows,
        found_rows,
        skipped: compare_skipped,
    } = report;
    skipped.extend(compare_skipped);

    let run_dir = epc_report::comparison_run_dir(&args.output_dir);
    epc_report::ensure_dir(&run_dir)?;
    let mut outputs = Vec::new();
    for (stem, table) in &tables {
        outputs.push(epc_report::save_table(&run_dir, stem, table)?);
    }
    let summary_path =
        epc_report::save_table(&run_dir, "Master_Database_Comparison_Summary", &summary)?;

    Ok(CompareOutcome {
        output_dir: run_dir,
        outputs,
        summary_path,
        summary,
        total_rows,
        found_rows,
        skipped,
    })
}

pub fn run_preview(args: &PreviewArgs) -> Result<PreviewOutcome> {
    let strategy: ParseStrategy = args.strategy.into();
    let mut table = read_table(&args.file, strategy)?;
    table.drop_empty();
    if table.is_empty() {
        bail!("no usable columns found in {}", args.file.display());
    }
    let scores = score_columns(&table, DEFAULT_PREVIEW_ROWS);
    let best = detect_epc_column(&scores).ok();
    Ok(PreviewOutcome {
        file: args.file.clone(),
        scores,
        best,
    })
}

pub fn run_sort(args: &SortArgs) -> Result<SortReport> {
    let span = info_span!("sort");
    let _guard = span.enter();
    let report = sort_by_format(
        &args.folder,
        SortOptions {
            delete_empty: args.delete_empty,
        },
    )?;
    Ok(report)
}

pub fn run_rename(args: &RenameArgs) -> Result<RenameOutcome> {
    let span = info_span!("rename");
    let _guard = span.enter();
    for file in &args.files {
        if !file.is_file() {
            bail!("not a file: {}", file.display());
        }
    }
    let pattern = if let Some(base) = &args.base {
        RenamePattern::Base(base.clone())
    } else if let Some(prefix) = &args.prefix {
        RenamePattern::Prefix(prefix.clone())
    } else {
        bail!("--base or --prefix is required");
    };
    let plans = plan_renames(&args.files, &pattern);
    if args.dry_run {
        return Ok(RenameOutcome {
            plans,
            dry_run: true,
            applied: 0,
            failed: Vec::new(),
        });
    }
    let report = apply_renames(&plans);
    Ok(RenameOutcome {
        plans,
        dry_run: false,
        applied: report.applied.len(),
        failed: report.failed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn folders_and_loose_files_form_separate_batches() {
        let dir = TempDir::new().unwrap();
        let sub = dir.path().join("batch1");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("a.csv"), "x").unwrap();
        let loose_a = dir.path().join("b.csv");
        let loose_b = dir.path().join("c.xlsx");
        std::fs::write(&loose_a, "x").unwrap();
        std::fs::write(&loose_b, "x").unwrap();

        let groups = batch_groups(&[sub.clone(), loose_a, loose_b]).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].label, "batch1");
        assert_eq!(groups[0].folder.as_deref(), Some(sub.as_path()));
        assert_eq!(groups[1].label, "selected files");
        assert_eq!(groups[1].files.len(), 2);
        assert!(groups[1].folder.is_none());
    }

    #[test]
    fn unsupported_inputs_alone_are_an_error() {
        let dir = TempDir::new().unwrap();
        let note = dir.path().join("note.txt");
        std::fs::write(&note, "x").unwrap();
        assert!(batch_groups(&[note]).is_err());
    }
}
