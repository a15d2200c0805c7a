//! Extraction, batch accumulation, merge, and master reconciliation.
//!
//! The crate is pure with respect to the operator interface: every function
//! takes resolved values (paths, column indexes, settings) and returns
//! tables plus diagnostics. Per-file problems are collected and reported;
//! only column detection failure escalates.

pub mod compare;
pub mod error;
pub mod extract;
pub mod merge;
pub mod session;

pub use compare::{
    CompareMode, CompareReport, FOUND_MARKER, MergedEpcInfo, annotate_master, compare_masters,
    load_merged_epcs, percent_found,
};
pub use error::{MergeError, Result};
pub use extract::{SkipReason, SkippedFile, extract_file, extract_table};
pub use merge::{
    FinalMergeReport, MergePolicy, grouped_merge, merge_batches, merge_final_files,
    merge_grouped_records, simple_merge,
};
pub use session::{ColumnChoice, LoadReport, MergeSession};
