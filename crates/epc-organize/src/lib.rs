//! Filesystem organization for raw scan files.
//!
//! Everything in this crate has physical side effects: moving files into
//! format folders, renaming batches, marking processed input folders.
//! Destructive steps (deleting empty files) stay behind explicit options.

pub mod classify;
pub mod error;
pub mod mark;
pub mod rename;
pub mod sorter;

pub use classify::{
    FormatSignature, RAW_EPC_THRESHOLD, SAMPLE_ROWS, classify_file, classify_table,
};
pub use error::{OrganizeError, Result};
pub use mark::{PROCESSED_MARKER, mark_processed};
pub use rename::{RenamePattern, RenamePlan, RenameReport, apply_renames, plan_renames};
pub use sorter::{GroupReport, SortOptions, SortReport, sort_by_format};
