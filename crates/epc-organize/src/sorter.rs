//! Physical grouping of scan files into format folders.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::classify::{FormatSignature, classify_file};
use crate::error::{OrganizeError, Result};

/// Sorting behavior toggles.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortOptions {
    /// Physically remove empty files instead of grouping them. Destructive;
    /// off unless the operator asked for it.
    pub delete_empty: bool,
}

/// One destination folder and the files moved into it.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub folder: PathBuf,
    pub signature: FormatSignature,
    pub files: Vec<PathBuf>,
}

/// Outcome of a sorting run.
#[derive(Debug, Clone, Default)]
pub struct SortReport {
    pub groups: Vec<GroupReport>,
    pub deleted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Group the CSV files directly under `folder` into `FormatGroup_<n>`
/// subfolders, numbered in first-seen signature order, and move them via
/// rename. Moves are not reversible.
pub fn sort_by_format(folder: &Path, options: SortOptions) -> Result<SortReport> {
    let files = list_csv_files(folder)?;
    let mut grouped: Vec<(FormatSignature, Vec<PathBuf>)> = Vec::new();
    let mut report = SortReport::default();

    for file in files {
        let signature = classify_file(&file);
        if signature == FormatSignature::Empty && options.delete_empty {
            match std::fs::remove_file(&file) {
                Ok(()) => {
                    info!(path = %file.display(), "deleted empty file");
                    report.deleted.push(file);
                }
                Err(error) => {
                    warn!(path = %file.display(), %error, "failed to delete empty file");
                    report.failed.push((file, error.to_string()));
                }
            }
            continue;
        }
        match grouped.iter_mut().find(|(seen, _)| *seen == signature) {
            Some((_, members)) => members.push(file),
            None => grouped.push((signature, vec![file])),
        }
    }

    for (index, (signature, files)) in grouped.into_iter().enumerate() {
        let group_folder = folder.join(format!("FormatGroup_{}", index + 1));
        std::fs::create_dir_all(&group_folder).map_err(|source| OrganizeError::CreateDir {
            path: group_folder.clone(),
            source,
        })?;
        let mut moved = Vec::new();
        for file in files {
            let Some(name) = file.file_name() else {
                continue;
            };
            let dest = group_folder.join(name);
            match std::fs::rename(&file, &dest) {
                Ok(()) => moved.push(dest),
                Err(error) => {
                    warn!(path = %file.display(), %error, "failed to move file");
                    report.failed.push((file, error.to_string()));
                }
            }
        }
        info!(
            folder = %group_folder.display(),
            signature = %signature,
            files = moved.len(),
            "sorted group"
        );
        report.groups.push(GroupReport {
            folder: group_folder,
            signature,
            files: moved,
        });
    }
    Ok(report)
}

fn list_csv_files(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(OrganizeError::DirectoryNotFound {
            path: folder.to_path_buf(),
        });
    }
    let entries = std::fs::read_dir(folder).map_err(|source| OrganizeError::DirectoryRead {
        path: folder.to_path_buf(),
        source,
    })?;
    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|source| OrganizeError::DirectoryRead {
            path: folder.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
