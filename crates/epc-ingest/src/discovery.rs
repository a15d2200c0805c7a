//! Discovery of tabular scan files.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

const TABULAR_EXTENSIONS: [&str; 3] = ["csv", "xls", "xlsx"];

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// Whether the path has a supported tabular extension (case-insensitive).
pub fn is_tabular_file(path: &Path) -> bool {
    extension(path).is_some_and(|ext| TABULAR_EXTENSIONS.contains(&ext.as_str()))
}

/// Whether the path is a spreadsheet workbook rather than delimited text.
pub fn is_workbook(path: &Path) -> bool {
    extension(path).is_some_and(|ext| ext == "xls" || ext == "xlsx")
}

/// Recursively collect scan files under a directory, sorted by path.
pub fn list_scan_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    let mut files = Vec::new();
    walk(dir, &mut files)?;
    files.sort();
    Ok(files)
}

fn walk(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|source| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry_result in entries {
        let entry = entry_result.map_err(|source| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, files)?;
        } else if is_tabular_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}
