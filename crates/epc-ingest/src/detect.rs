//! EPC column auto-detection with preview scoring.

use crate::error::{IngestError, Result};
use crate::predicate::strict_epc_like;
use crate::raw_table::RawTable;

/// Rows of preview considered when scoring columns.
pub const DEFAULT_PREVIEW_ROWS: usize = 50;

/// Leading values carried per column for operator-facing previews.
const PREVIEW_VALUES: usize = 3;

/// One column's detection score and preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnScore {
    pub index: usize,
    /// Count of strict EPC-like values within the preview window.
    pub epc_count: usize,
    /// EPC-like hits when any exist, leading non-empty values otherwise.
    pub preview: Vec<String>,
}

/// Score every column by its count of strict EPC-like values.
pub fn score_columns(table: &RawTable, preview_rows: usize) -> Vec<ColumnScore> {
    let mut scores = Vec::new();
    for index in 0..table.column_count() {
        let values: Vec<String> = table
            .rows
            .iter()
            .take(preview_rows)
            .filter_map(|row| row.get(index))
            .map(|cell| cell.trim().to_string())
            .filter(|cell| !cell.is_empty())
            .collect();
        let epc_values: Vec<String> = values
            .iter()
            .filter(|value| strict_epc_like(value))
            .cloned()
            .collect();
        let preview = if epc_values.is_empty() {
            values.iter().take(PREVIEW_VALUES).cloned().collect()
        } else {
            epc_values.iter().take(PREVIEW_VALUES).cloned().collect()
        };
        scores.push(ColumnScore {
            index,
            epc_count: epc_values.len(),
            preview,
        });
    }
    scores
}

/// Pick the column with the most strict EPC-like values.
///
/// Ties keep the first column encountered. When no column holds a single
/// EPC-like value there is nothing sensible to default to, so detection
/// fails and the caller aborts the batch load.
pub fn detect_epc_column(scores: &[ColumnScore]) -> Result<usize> {
    let mut best: Option<&ColumnScore> = None;
    for score in scores {
        let replace = match best {
            None => true,
            Some(current) => score.epc_count > current.epc_count,
        };
        if replace {
            best = Some(score);
        }
    }
    match best {
        Some(score) if score.epc_count > 0 => Ok(score.index),
        _ => Err(IngestError::NoEpcDetected),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| (*cell).to_string()).collect()
    }

    #[test]
    fn picks_column_with_most_epc_like_values() {
        // Column 0 has more non-empty values; column 1 has the EPC hits.
        let mut table = RawTable::new(
            None,
            vec![
                row(&["a", "1234567890ABCDEF1234", ""]),
                row(&["b", "ABCDEF1234567890FFFF", ""]),
                row(&["c", "", ""]),
            ],
        );
        table.drop_empty();
        let scores = score_columns(&table, DEFAULT_PREVIEW_ROWS);
        assert_eq!(scores[0].epc_count, 0);
        assert_eq!(scores[1].epc_count, 2);
        assert_eq!(detect_epc_column(&scores).unwrap(), 1);
    }

    #[test]
    fn first_column_wins_ties() {
        let table = RawTable::new(
            None,
            vec![row(&["1234567890ABCDEF1234", "ABCDEF1234567890FFFF"])],
        );
        let scores = score_columns(&table, DEFAULT_PREVIEW_ROWS);
        assert_eq!(detect_epc_column(&scores).unwrap(), 0);
    }

    #[test]
    fn detection_fails_without_any_epc_like_value() {
        let table = RawTable::new(None, vec![row(&["a", "1"]), row(&["b", "2"])]);
        let scores = score_columns(&table, DEFAULT_PREVIEW_ROWS);
        assert!(matches!(
            detect_epc_column(&scores),
            Err(IngestError::NoEpcDetected)
        ));
    }

    #[test]
    fn preview_prefers_epc_hits() {
        let table = RawTable::new(
            None,
            vec![
                row(&["header"]),
                row(&["1234567890ABCDEF1234"]),
                row(&["1234567890ABCDEF5678"]),
            ],
        );
        let scores = score_columns(&table, DEFAULT_PREVIEW_ROWS);
        assert_eq!(
            scores[0].preview,
            vec!["1234567890ABCDEF1234", "1234567890ABCDEF5678"]
        );
    }
}
