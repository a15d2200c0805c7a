//! CLI argument definitions for the EPC toolkit.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use epc_ingest::ParseStrategy;

#[derive(Parser)]
#[command(
    name = "epc",
    version,
    about = "EPC toolkit - merge, reconcile, and organize RFID stocktake scans",
    long_about = "Merge RFID tag-scan spreadsheets of inconsistent layout, reconcile the\n\
                  result against master lists, and sort raw scan files by detected format.\n\n\
                  Input files may be CSV, XLS, or XLSX; outputs are XLSX workbooks with\n\
                  auto-fitted columns (CSV above the worksheet row ceiling)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load scan batches, merge them, and save one reconciled table.
    Merge(MergeArgs),

    /// Consolidate already-merged workbooks into one final table.
    Finalize(FinalizeArgs),

    /// Reconcile merged EPCs against master database lists.
    Compare(CompareArgs),

    /// Show a file's columns with previews and the auto-detected EPC
    /// column, for picking a --column override.
    Preview(PreviewArgs),

    /// Sort raw scan files into folders by detected format.
    Sort(SortArgs),

    /// Rename a batch of files with a consistent naming scheme.
    Rename(RenameArgs),

    /// List the available parse strategies.
    Strategies,
}

#[derive(Parser)]
pub struct MergeArgs {
    /// Input files and folders. Each folder is loaded as its own batch
    /// (searched recursively); loose files form one batch together.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Layout heuristic for reading the scan files.
    #[arg(long = "strategy", value_enum, default_value = "content-scan")]
    pub strategy: StrategyArg,

    /// Zero-based EPC column override (skips auto-detection).
    #[arg(long = "column", value_name = "INDEX")]
    pub column: Option<usize>,

    /// EPC prefixes to keep, comma-separated. Repeat to extend the list.
    #[arg(long = "prefix", value_name = "LIST")]
    pub prefix: Vec<String>,

    /// Characters to keep from each EPC (e.g. 24). Non-numeric input
    /// disables truncation.
    #[arg(long = "truncate", value_name = "N")]
    pub truncate: Option<String>,

    /// Force the loose likeness filter on.
    #[arg(long = "likeness-filter", conflicts_with = "no_likeness_filter")]
    pub likeness_filter: bool,

    /// Force the loose likeness filter off (the default depends on the
    /// strategy).
    #[arg(long = "no-likeness-filter")]
    pub no_likeness_filter: bool,

    /// Drop duplicate EPCs keeping the first occurrence instead of grouping
    /// attribute values (legacy behavior).
    #[arg(long = "legacy-dedupe")]
    pub legacy_dedupe: bool,

    /// Base directory for the merged/ output folder.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Rename each input folder afterwards to mark it processed.
    ///
    /// Mutates the input tree, so it is never implied.
    #[arg(long = "mark-processed")]
    pub mark_processed: bool,

    /// Marker appended by --mark-processed.
    #[arg(long = "marker", value_name = "SUFFIX", default_value = "_MERGED")]
    pub marker: String,
}

#[derive(Parser)]
pub struct FinalizeArgs {
    /// Merged workbooks (or folders of them) to consolidate.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// EPC prefixes to keep, comma-separated. Repeat to extend the list.
    #[arg(long = "prefix", value_name = "LIST")]
    pub prefix: Vec<String>,

    /// Characters to keep from each EPC. Non-numeric input disables
    /// truncation.
    #[arg(long = "truncate", value_name = "N")]
    pub truncate: Option<String>,

    /// Output file name (without extension); defaults to a timestamped
    /// name.
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Base directory for the merged_final/ output folder.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct CompareArgs {
    /// Final merged EPC files (or folders of them).
    #[arg(long = "merged", value_name = "PATH", required = true, num_args = 1..)]
    pub merged: Vec<PathBuf>,

    /// Master database files (or folders of them).
    #[arg(long = "master", value_name = "PATH", required = true, num_args = 1..)]
    pub master: Vec<PathBuf>,

    /// Stack all master files into one combined output instead of one
    /// output per file.
    #[arg(long = "combine")]
    pub combine: bool,

    /// Base directory for the comparison_results/ output folder.
    #[arg(long = "output-dir", value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,
}

#[derive(Parser)]
pub struct PreviewArgs {
    /// File to inspect.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Layout heuristic for reading the file.
    #[arg(long = "strategy", value_enum, default_value = "content-scan")]
    pub strategy: StrategyArg,
}

#[derive(Parser)]
pub struct SortArgs {
    /// Folder whose CSV files get grouped by format.
    #[arg(value_name = "FOLDER")]
    pub folder: PathBuf,

    /// Physically delete empty files instead of grouping them.
    #[arg(long = "delete-empty")]
    pub delete_empty: bool,
}

#[derive(Parser)]
#[command(group = ArgGroup::new("pattern").required(true).args(["base", "prefix"]))]
pub struct RenameArgs {
    /// Files to rename, in order.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// New base name; files become <base>_<n><ext>.
    #[arg(long = "base", value_name = "NAME")]
    pub base: Option<String>,

    /// Prefix to prepend to each original name.
    #[arg(long = "prefix", value_name = "PREFIX")]
    pub prefix: Option<String>,

    /// Show the planned names without touching anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

/// CLI parse strategy choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum StrategyArg {
    ContentScan,
    HeaderKeyword,
    DelimiterSniff,
}

impl From<StrategyArg> for ParseStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::ContentScan => ParseStrategy::ContentScan,
            StrategyArg::HeaderKeyword => ParseStrategy::HeaderKeyword,
            StrategyArg::DelimiterSniff => ParseStrategy::DelimiterSniff,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
