//! Ingestion for RFID scan exports.
//!
//! Scan files arrive as CSV or workbook exports with no consistent layout:
//! summary preambles, wandering headers, mixed delimiters. This crate finds
//! where the data starts ([`strategy`]), which column holds the tag
//! identifiers ([`detect`]), and which files are worth reading at all
//! ([`discovery`]).

pub mod detect;
pub mod discovery;
pub mod error;
pub mod named;
pub mod predicate;
pub mod raw_table;
pub mod sniff;
pub mod strategy;
pub mod workbook;

pub use detect::{ColumnScore, DEFAULT_PREVIEW_ROWS, detect_epc_column, score_columns};
pub use discovery::{is_tabular_file, is_workbook, list_scan_files};
pub use error::{IngestError, Result};
pub use named::read_named_table;
pub use predicate::{is_hex_identifier, loose_epc_like, strict_epc_like};
pub use raw_table::RawTable;
pub use sniff::{DELIMITER_CANDIDATES, SNIFF_SAMPLE_BYTES, sniff_delimiter};
pub use strategy::{ParseStrategy, read_sample, read_table};
pub use workbook::read_workbook_rows;
