//! Marking input folders as already processed.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{OrganizeError, Result};

/// Default marker appended to processed folder names.
pub const PROCESSED_MARKER: &str = "_MERGED";

/// Rename a folder in place, appending `marker`.
///
/// Mutates input data, so callers gate it behind an explicit flag. Already
/// marked folders are left alone.
pub fn mark_processed(folder: &Path, marker: &str) -> Result<PathBuf> {
    let name = folder
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| OrganizeError::DirectoryNotFound {
            path: folder.to_path_buf(),
        })?;
    if name.ends_with(marker) {
        return Ok(folder.to_path_buf());
    }
    let target = folder.with_file_name(format!("{name}{marker}"));
    std::fs::rename(folder, &target).map_err(|source| OrganizeError::Rename {
        from: folder.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    info!(from = %folder.display(), to = %target.display(), "marked folder as processed");
    Ok(target)
}
