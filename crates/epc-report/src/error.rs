use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A failed save leaves the in-memory results intact; the operator can
    /// retry after closing the destination elsewhere.
    #[error(
        "failed to write {path}: {message}. If the file is open in another program, close it and try again"
    )]
    Write { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, ReportError>;
