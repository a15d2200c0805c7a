//! Batch renaming with a unified naming scheme.
//!
//! Consistent `Reader_Location` style names are what make the metadata
//! derivation in the merge pipeline work, so the renamer exists to get
//! files into that shape up front.

use std::path::PathBuf;

use tracing::{info, warn};

/// How new names are formed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenamePattern {
    /// `<base>_<index><ext>`, 1-based, in selection order.
    Base(String),
    /// `<prefix>_<original name>`.
    Prefix(String),
}

/// One planned rename, previewable before anything is touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// Outcome of applying a plan; failures are collected, not fatal.
#[derive(Debug, Clone, Default)]
pub struct RenameReport {
    pub applied: Vec<RenamePlan>,
    pub failed: Vec<(RenamePlan, String)>,
}

/// Compute target names without touching the filesystem.
pub fn plan_renames(files: &[PathBuf], pattern: &RenamePattern) -> Vec<RenamePlan> {
    files
        .iter()
        .enumerate()
        .map(|(index, file)| {
            let new_name = match pattern {
                RenamePattern::Base(base) => {
                    let extension = file
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| format!(".{ext}"))
                        .unwrap_or_default();
                    format!("{base}_{}{extension}", index + 1)
                }
                RenamePattern::Prefix(prefix) => {
                    let original = file
                        .file_name()
                        .and_then(|name| name.to_str())
                        .unwrap_or_default();
                    format!("{prefix}_{original}")
                }
            };
            RenamePlan {
                from: file.clone(),
                to: file.with_file_name(new_name),
            }
        })
        .collect()
}

/// Apply planned renames in order.
pub fn apply_renames(plans: &[RenamePlan]) -> RenameReport {
    let mut report = RenameReport::default();
    for plan in plans {
        match std::fs::rename(&plan.from, &plan.to) {
            Ok(()) => {
                info!(from = %plan.from.display(), to = %plan.to.display(), "renamed");
                report.applied.push(plan.clone());
            }
            Err(error) => {
                warn!(from = %plan.from.display(), %error, "rename failed");
                report.failed.push((plan.clone(), error.to_string()));
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_pattern_numbers_files_in_order() {
        let files = vec![PathBuf::from("a/x.csv"), PathBuf::from("a/y.xlsx")];
        let plans = plan_renames(&files, &RenamePattern::Base("R1_LocA".to_string()));
        assert_eq!(plans[0].to, PathBuf::from("a/R1_LocA_1.csv"));
        assert_eq!(plans[1].to, PathBuf::from("a/R1_LocA_2.xlsx"));
    }

    #[test]
    fn prefix_pattern_keeps_the_original_name() {
        let files = vec![PathBuf::from("a/scan.csv")];
        let plans = plan_renames(&files, &RenamePattern::Prefix("LocB".to_string()));
        assert_eq!(plans[0].to, PathBuf::from("a/LocB_scan.csv"));
    }
}
