//! Output directory layout and timestamped names.

use std::path::{Path, PathBuf};

use crate::error::{ReportError, Result};

/// Timestamp suffix used to keep output filenames collision-free.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Create a directory (and parents) if needed, returning it.
pub fn ensure_dir(path: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(path).map_err(|source| ReportError::CreateDir {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}

/// `<base>/merged`, where batch-merge outputs land.
pub fn merged_dir(base: &Path) -> PathBuf {
    base.join("merged")
}

/// `<base>/merged_final`, where consolidated outputs land.
pub fn merged_final_dir(base: &Path) -> PathBuf {
    base.join("merged_final")
}

/// `<base>/comparison_results/Master_Comparison_<ts>`, one folder per run.
pub fn comparison_run_dir(base: &Path) -> PathBuf {
    base.join("comparison_results")
        .join(format!("Master_Comparison_{}", timestamp()))
}

/// Default stem for a batch-merge output.
pub fn merged_file_stem() -> String {
    format!("Merged_EPCs_{}", timestamp())
}

/// Default stem for a consolidated output.
pub fn final_merged_file_stem() -> String {
    format!("Final_Merged_EPCs_{}", timestamp())
}
