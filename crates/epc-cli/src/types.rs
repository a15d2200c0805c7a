use std::path::PathBuf;

use epc_ingest::ColumnScore;
use epc_merge::SkippedFile;
use epc_model::DataTable;
use epc_organize::RenamePlan;

#[derive(Debug)]
pub struct BatchSummary {
    pub label: String,
    pub column: usize,
    pub files: usize,
    pub records: usize,
    pub skipped: usize,
}

#[derive(Debug)]
pub struct MergeOutcome {
    pub batches: Vec<BatchSummary>,
    pub total_records: usize,
    pub merged_rows: usize,
    /// `None` when nothing was merged and no file was written.
    pub output: Option<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    pub marked: Vec<PathBuf>,
}

#[derive(Debug)]
pub struct FinalizeOutcome {
    pub loaded: Vec<(PathBuf, usize)>,
    pub merged_rows: usize,
    pub output: Option<PathBuf>,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug)]
pub struct CompareOutcome {
    pub output_dir: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub summary_path: PathBuf,
    pub summary: DataTable,
    pub total_rows: usize,
    pub found_rows: usize,
    pub skipped: Vec<SkippedFile>,
}

#[derive(Debug)]
pub struct PreviewOutcome {
    pub file: PathBuf,
    pub scores: Vec<ColumnScore>,
    /// `None` when no column holds any EPC-like value.
    pub best: Option<usize>,
}

#[derive(Debug)]
pub struct RenameOutcome {
    pub plans: Vec<RenamePlan>,
    pub dry_run: bool,
    pub applied: usize,
    pub failed: Vec<(RenamePlan, String)>,
}
