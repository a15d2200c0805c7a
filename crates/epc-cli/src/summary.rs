//! Comfy-table summaries printed after each command.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use epc_ingest::ParseStrategy;
use epc_merge::SkippedFile;
use epc_model::DataTable;
use epc_organize::SortReport;

use crate::types::{CompareOutcome, FinalizeOutcome, MergeOutcome, PreviewOutcome, RenameOutcome};

pub fn print_merge_summary(outcome: &MergeOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Batch"),
        header_cell("Column"),
        header_cell("Files"),
        header_cell("Records"),
        header_cell("Skipped"),
    ]);
    apply_table_style(&mut table);
    for index in 1..=4 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for batch in &outcome.batches {
        table.add_row(vec![
            Cell::new(&batch.label),
            Cell::new(batch.column),
            Cell::new(batch.files),
            Cell::new(batch.records),
            count_cell(batch.skipped, Color::Yellow),
        ]);
    }
    println!("{table}");
    match &outcome.output {
        Some(path) => {
            println!(
                "Merged {} records into {} rows.",
                outcome.total_records, outcome.merged_rows
            );
            println!("Output: {}", path.display());
        }
        None => println!("No EPC data merged."),
    }
    for marked in &outcome.marked {
        println!("Marked as processed: {}", marked.display());
    }
    print_skipped(&outcome.skipped);
}

pub fn print_finalize_summary(outcome: &FinalizeOutcome) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("File"), header_cell("Records")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (path, records) in &outcome.loaded {
        table.add_row(vec![
            Cell::new(path.display().to_string()),
            Cell::new(*records),
        ]);
    }
    println!("{table}");
    match &outcome.output {
        Some(path) => {
            println!("Final merged rows: {}", outcome.merged_rows);
            println!("Output: {}", path.display());
        }
        None => println!("No valid files to merge."),
    }
    print_skipped(&outcome.skipped);
}

pub fn print_compare_summary(outcome: &CompareOutcome) {
    print_data_table(&outcome.summary);
    println!(
        "Found {} of {} master rows.",
        outcome.found_rows, outcome.total_rows
    );
    println!(
        "Wrote {} comparison file(s) to: {}",
        outcome.outputs.len(),
        outcome.output_dir.display()
    );
    println!("Summary: {}", outcome.summary_path.display());
    print_skipped(&outcome.skipped);
}

pub fn print_preview_summary(outcome: &PreviewOutcome) {
    println!("{}", outcome.file.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("EPC-like"),
        header_cell("Preview"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for score in &outcome.scores {
        let is_best = outcome.best == Some(score.index);
        let label = if is_best {
            format!("{} (detected)", score.index)
        } else {
            score.index.to_string()
        };
        let column_cell = if is_best {
            Cell::new(label)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new(label)
        };
        table.add_row(vec![
            column_cell,
            count_cell(score.epc_count, Color::Green),
            Cell::new(score.preview.join(", ")),
        ]);
    }
    println!("{table}");
    if outcome.best.is_none() {
        println!("No EPC-like values detected in any column.");
    }
}

pub fn print_sort_summary(report: &SortReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Folder"),
        header_cell("Signature"),
        header_cell("Files"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for group in &report.groups {
        table.add_row(vec![
            Cell::new(group.folder.display().to_string()),
            Cell::new(group.signature.label()),
            Cell::new(group.files.len()),
        ]);
    }
    println!("{table}");
    if !report.deleted.is_empty() {
        println!("Deleted {} empty file(s).", report.deleted.len());
    }
    if !report.failed.is_empty() {
        eprintln!("Failed:");
        for (path, message) in &report.failed {
            eprintln!("- {}: {message}", path.display());
        }
    }
}

pub fn print_rename_summary(outcome: &RenameOutcome) {
    if outcome.dry_run {
        println!("Planned renames (dry run):");
        for plan in &outcome.plans {
            println!("- {} -> {}", plan.from.display(), plan.to.display());
        }
        return;
    }
    println!("Renamed {} file(s).", outcome.applied);
    if !outcome.failed.is_empty() {
        eprintln!("Failed:");
        for (plan, message) in &outcome.failed {
            eprintln!("- {}: {message}", plan.from.display());
        }
    }
}

pub fn print_strategies() {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Strategy"),
        header_cell("Likeness filter"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    let strategies = [
        (
            ParseStrategy::ContentScan,
            "Skip preamble rows until the first strict EPC-like cell; no header.",
        ),
        (
            ParseStrategy::HeaderKeyword,
            "Use the row naming a tag column and a count column as the header; \
             otherwise treat the file as one raw identifier column.",
        ),
        (
            ParseStrategy::DelimiterSniff,
            "Sniff the delimiter from a sample, skip a fixed 3-row preamble, and \
             fall back to comma parsing when that misbehaves.",
        ),
    ];
    for (strategy, description) in strategies {
        table.add_row(vec![
            Cell::new(strategy.label())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(if strategy.default_likeness_filter() {
                "on"
            } else {
                "off"
            }),
            Cell::new(description),
        ]);
    }
    println!("{table}");
}

fn print_data_table(data: &DataTable) {
    let mut table = Table::new();
    table.set_header(data.columns.iter().map(|name| header_cell(name)).collect::<Vec<_>>());
    apply_table_style(&mut table);
    for row in &data.rows {
        table.add_row(row.iter().map(Cell::new).collect::<Vec<_>>());
    }
    println!("{table}");
}

fn print_skipped(skipped: &[SkippedFile]) {
    if skipped.is_empty() {
        return;
    }
    eprintln!("Skipped {} file(s):", skipped.len());
    for skip in skipped {
        eprintln!("- {}: {}", skip.path.display(), skip.reason);
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        Cell::new(count).fg(Color::DarkGrey)
    }
}
