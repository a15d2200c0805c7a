//! Data model for the EPC stocktaking toolkit.
//!
//! This crate defines the plain-value types shared by the ingest, merge,
//! report, and CLI crates: extracted tag records, batch filter settings,
//! and the tabular result types that get written out. It holds no I/O.

pub mod record;
pub mod settings;
pub mod table;

pub use record::{
    ATTR_EPC, ATTR_LOCATION, ATTR_READER, ATTR_SOURCE_FILE, Batch, EpcRecord, UNKNOWN_VALUE,
};
pub use settings::{BatchSettings, parse_prefixes, parse_truncation};
pub use table::{DataTable, MergedResult};
