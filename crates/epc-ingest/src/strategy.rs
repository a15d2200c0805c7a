//! Configurable parse strategies for raw scan files.
//!
//! Reader software pads exports with summary preambles, moves the header
//! around, or writes no header at all. Three strategies cover the layouts
//! seen in the field; which one applies is configuration, not a property
//! of the file. Each yields the same contract: a [`RawTable`] whose rows
//! start where genuine tag data starts.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::discovery::is_workbook;
use crate::error::{IngestError, Result};
use crate::predicate::strict_epc_like;
use crate::raw_table::{RawTable, normalize_cell};
use crate::sniff::{SNIFF_SAMPLE_BYTES, sample_prefix, sniff_delimiter};
use crate::workbook::read_workbook_rows;

/// Rows of reader-software preamble skipped by the sniffing strategy.
const PREAMBLE_ROWS: usize = 3;

/// Marker whose presence in a sniffed header row means the file carries no
/// header at all.
const NO_HEADER_MARKER: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// Scan for the first row containing a strict EPC-like cell; everything
    /// from there on is data, with no header.
    ContentScan,
    /// Find a header row naming a tag column and a count column; without
    /// one the file is a single unnamed column of raw identifiers.
    HeaderKeyword,
    /// Sniff the delimiter from a sample, skip a fixed preamble, and walk a
    /// fallback chain when parsing misbehaves.
    DelimiterSniff,
}

impl ParseStrategy {
    /// Whether extraction applies the loose likeness filter by default.
    pub fn default_likeness_filter(self) -> bool {
        matches!(self, ParseStrategy::DelimiterSniff)
    }

    pub fn label(self) -> &'static str {
        match self {
            ParseStrategy::ContentScan => "content-scan",
            ParseStrategy::HeaderKeyword => "header-keyword",
            ParseStrategy::DelimiterSniff => "delimiter-sniff",
        }
    }
}

/// Read one scan file with the given strategy.
///
/// Workbooks go through calamine and apply the row-level analog of each
/// strategy; text files are parsed with the `csv` reader. Unreadable files
/// surface as errors for the caller to report and skip; they never abort a
/// whole run.
pub fn read_table(path: &Path, strategy: ParseStrategy) -> Result<RawTable> {
    if is_workbook(path) {
        let rows = read_workbook_rows(path)?;
        return table_from_rows(rows, path, strategy);
    }
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    match strategy {
        ParseStrategy::ContentScan => content_scan_text(&text, path),
        ParseStrategy::HeaderKeyword => Ok(header_keyword_text(&text)),
        ParseStrategy::DelimiterSniff => delimiter_sniff_text(&text, path),
    }
}

/// Plain headerless sample read used by format classification: comma for
/// text files, the first worksheet for workbooks, at most `max_rows` rows.
pub fn read_sample(path: &Path, max_rows: usize) -> Result<RawTable> {
    if is_workbook(path) {
        let rows = read_workbook_rows(path)?;
        return Ok(RawTable::new(None, rows.into_iter().take(max_rows).collect()));
    }
    let bytes = fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8_lossy(&bytes);
    let mut table = parse_delimited(&text, b',', 0, false);
    table.rows.truncate(max_rows);
    Ok(table)
}

fn content_scan_text(text: &str, path: &Path) -> Result<RawTable> {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines
        .iter()
        .position(|line| line.trim().split(',').any(strict_epc_like))
        .ok_or_else(|| IngestError::NoDataFound {
            path: path.to_path_buf(),
        })?;
    let body = lines[start..].join("\n");
    Ok(parse_delimited(&body, b',', 0, false))
}

fn header_keyword_text(text: &str) -> RawTable {
    let lines: Vec<&str> = text.lines().collect();
    match lines.iter().position(|line| is_keyword_header(line)) {
        Some(index) => {
            let body = lines[index..].join("\n");
            parse_delimited(&body, b',', 0, true)
        }
        None => {
            let rows = lines
                .iter()
                .map(|line| normalize_cell(line))
                .filter(|line| !line.is_empty())
                .map(|line| vec![line])
                .collect();
            RawTable::new(None, rows)
        }
    }
}

fn delimiter_sniff_text(text: &str, path: &Path) -> Result<RawTable> {
    let sample = sample_prefix(text, SNIFF_SAMPLE_BYTES);
    if let Some(delimiter) = sniff_delimiter(sample) {
        let table = parse_preamble_skipped(text, delimiter);
        if is_usable(&table) {
            return Ok(table);
        }
        debug!(
            path = %path.display(),
            delimiter = %(delimiter as char),
            "sniffed parse unusable, falling back to comma"
        );
    }
    let table = parse_preamble_skipped(text, b',');
    if is_usable(&table) {
        return Ok(table);
    }
    debug!(path = %path.display(), "preamble-skipped parse unusable, trying headerless");
    let table = parse_delimited(text, b',', 0, false);
    if table.is_empty() {
        return Err(IngestError::NoDataFound {
            path: path.to_path_buf(),
        });
    }
    Ok(table)
}

/// Parse with the fixed preamble skip. A header row carrying the `//`
/// marker means the file has none, so re-parse headerless.
fn parse_preamble_skipped(text: &str, delimiter: u8) -> RawTable {
    let table = parse_delimited(text, delimiter, PREAMBLE_ROWS, true);
    let marker = table
        .header
        .as_ref()
        .is_some_and(|header| header.iter().any(|cell| cell.contains(NO_HEADER_MARKER)));
    if marker {
        parse_delimited(text, delimiter, PREAMBLE_ROWS, false)
    } else {
        table
    }
}

/// A parse attempt worked when it produced rows spread over more than one
/// column; single-column output usually means the wrong delimiter.
fn is_usable(table: &RawTable) -> bool {
    !table.is_empty() && table.column_count() > 1
}

fn parse_delimited(text: &str, delimiter: u8, skip_rows: usize, has_header: bool) -> RawTable {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());
    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records().skip(skip_rows) {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                debug!(%error, "skipping malformed record");
                continue;
            }
        };
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    if has_header && !rows.is_empty() {
        let header = rows.remove(0);
        RawTable::new(Some(header), rows)
    } else {
        RawTable::new(None, rows)
    }
}

fn is_keyword_header(line: &str) -> bool {
    let lower = line.to_lowercase();
    (lower.contains("epc") || lower.contains("tag")) && lower.contains("count")
}

fn table_from_rows(rows: Vec<Vec<String>>, path: &Path, strategy: ParseStrategy) -> Result<RawTable> {
    match strategy {
        ParseStrategy::ContentScan => {
            let start = rows
                .iter()
                .position(|row| row.iter().any(|cell| strict_epc_like(cell)))
                .ok_or_else(|| IngestError::NoDataFound {
                    path: path.to_path_buf(),
                })?;
            Ok(RawTable::new(None, rows[start..].to_vec()))
        }
        ParseStrategy::HeaderKeyword => {
            match rows.iter().position(|row| is_keyword_header(&row.join(","))) {
                Some(index) => Ok(RawTable::new(
                    Some(rows[index].clone()),
                    rows[index + 1..].to_vec(),
                )),
                None => {
                    let singles = rows
                        .iter()
                        .filter_map(|row| row.first())
                        .map(|cell| cell.trim().to_string())
                        .filter(|cell| !cell.is_empty())
                        .map(|cell| vec![cell])
                        .collect();
                    Ok(RawTable::new(None, singles))
                }
            }
        }
        ParseStrategy::DelimiterSniff => {
            if rows.len() <= PREAMBLE_ROWS {
                return Ok(RawTable::default());
            }
            let mut body = rows[PREAMBLE_ROWS..].to_vec();
            let header_has_marker = body[0].iter().any(|cell| cell.contains(NO_HEADER_MARKER));
            if header_has_marker {
                Ok(RawTable::new(None, body))
            } else {
                let header = body.remove(0);
                Ok(RawTable::new(Some(header), body))
            }
        }
    }
}
