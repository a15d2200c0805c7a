//! Batch accumulation across load interactions.
//!
//! The session is the explicit replacement for a process-global batch
//! list: the caller owns it, hands it to each batch load, and consumes it
//! for the final merge.

use std::path::PathBuf;

use tracing::{info, warn};

use epc_ingest::{DEFAULT_PREVIEW_ROWS, ParseStrategy, detect_epc_column, read_table, score_columns};
use epc_model::{Batch, BatchSettings};

use crate::error::{MergeError, Result};
use crate::extract::{SkippedFile, extract_file};

/// How the EPC column is chosen for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnChoice {
    /// Score the first file's preview and take the best column.
    #[default]
    Auto,
    /// Operator override: a fixed zero-based column index.
    Index(usize),
}

/// Outcome of one batch load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// The column index the batch settled on.
    pub column: usize,
    /// Files that contributed (possibly zero records after filtering).
    pub files_loaded: usize,
    /// Records added to the session by this load.
    pub records: usize,
    /// Files excluded, with reasons.
    pub skipped: Vec<SkippedFile>,
}

/// Accumulates batches until the caller merges them.
#[derive(Debug, Default)]
pub struct MergeSession {
    batches: Vec<Batch>,
}

impl MergeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    pub fn total_records(&self) -> usize {
        self.batches.iter().map(Batch::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Consume the session for the merge step.
    pub fn into_batches(self) -> Vec<Batch> {
        self.batches
    }

    /// Load one group of files as a batch.
    ///
    /// Column detection runs on the first file's preview unless the caller
    /// supplies an index. Per-file problems are collected in the report;
    /// only detection failure aborts the load.
    pub fn load_batch(
        &mut self,
        files: &[PathBuf],
        strategy: ParseStrategy,
        column: ColumnChoice,
        settings: &BatchSettings,
    ) -> Result<LoadReport> {
        let Some(first) = files.first() else {
            return Err(MergeError::EmptyBatch);
        };
        let column = match column {
            ColumnChoice::Index(index) => index,
            ColumnChoice::Auto => {
                let mut preview = read_table(first, strategy)?;
                preview.drop_empty();
                if preview.is_empty() {
                    return Err(MergeError::NoUsableColumns { path: first.clone() });
                }
                let scores = score_columns(&preview, DEFAULT_PREVIEW_ROWS);
                detect_epc_column(&scores).map_err(|_| MergeError::NoEpcDetected {
                    path: first.clone(),
                })?
            }
        };

        let mut records = Vec::new();
        let mut files_loaded = 0usize;
        let mut skipped = Vec::new();
        for file in files {
            match extract_file(file, strategy, column, settings) {
                Ok(file_records) => {
                    files_loaded += 1;
                    records.extend(file_records);
                }
                Err(reason) => {
                    warn!(path = %file.display(), %reason, "skipping file");
                    skipped.push(SkippedFile {
                        path: file.clone(),
                        reason,
                    });
                }
            }
        }

        let count = records.len();
        if count > 0 {
            self.batches.push(Batch::new(records));
        }
        info!(
            column,
            files = files_loaded,
            records = count,
            skipped = skipped.len(),
            "batch loaded"
        );
        Ok(LoadReport {
            column,
            files_loaded,
            records: count,
            skipped,
        })
    }
}
