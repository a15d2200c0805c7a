use std::path::PathBuf;

use thiserror::Error;

use epc_ingest::IngestError;

#[derive(Debug, Error)]
pub enum MergeError {
    #[error("batch contains no files")]
    EmptyBatch,

    #[error("no usable columns found in {path}")]
    NoUsableColumns { path: PathBuf },

    /// The one condition escalated instead of skipped: with zero EPC-like
    /// values anywhere there is nothing sensible to default to.
    #[error("no EPC-like values detected in any column of {path}")]
    NoEpcDetected { path: PathBuf },

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

pub type Result<T> = std::result::Result<T, MergeError>;
