//! Per-batch filter settings and their free-text parsers.

/// Filter settings shared by every file in one batch.
///
/// Application order is fixed: truncation first, then prefix filtering, then
/// the optional loose likeness filter. Truncation changes the string the
/// prefix filter operates on, so the order is part of the contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchSettings {
    /// Keep only the first N characters of each value; `None` disables.
    pub truncate_len: Option<usize>,
    /// Keep only values starting with one of these prefixes; empty disables.
    pub prefixes: Vec<String>,
    /// Apply the loose EPC-likeness predicate as a final value filter.
    pub likeness_filter: bool,
}

impl BatchSettings {
    /// Truncate and prefix-filter a single trimmed value.
    ///
    /// Returns `None` when the value fails the prefix filter. The likeness
    /// filter is applied by the extraction pipeline, which owns the
    /// predicate.
    pub fn truncate_and_filter(&self, value: &str) -> Option<String> {
        let truncated = match self.truncate_len {
            Some(limit) => value.chars().take(limit).collect(),
            None => value.to_string(),
        };
        if !self.prefixes.is_empty()
            && !self
                .prefixes
                .iter()
                .any(|prefix| truncated.starts_with(prefix.as_str()))
        {
            return None;
        }
        Some(truncated)
    }
}

/// Parse a free-text truncation length.
///
/// Only a positive decimal integer enables truncation; anything else
/// (blank, non-numeric, zero) disables it.
pub fn parse_truncation(input: &str) -> Option<usize> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    match trimmed.parse::<usize>() {
        Ok(0) | Err(_) => None,
        Ok(limit) => Some(limit),
    }
}

/// Parse a comma-separated prefix list, trimming each entry and dropping
/// empties. Call repeatedly to extend an existing list.
pub fn parse_prefixes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_parses_positive_integers_only() {
        assert_eq!(parse_truncation("24"), Some(24));
        assert_eq!(parse_truncation(" 16 "), Some(16));
        assert_eq!(parse_truncation(""), None);
        assert_eq!(parse_truncation("abc"), None);
        assert_eq!(parse_truncation("-3"), None);
        assert_eq!(parse_truncation("0"), None);
    }

    #[test]
    fn prefixes_split_and_trim() {
        assert_eq!(parse_prefixes("01, 03"), vec!["01", "03"]);
        assert_eq!(parse_prefixes(" , ,"), Vec::<String>::new());
    }

    #[test]
    fn truncation_beyond_length_is_identity() {
        let settings = BatchSettings {
            truncate_len: Some(24),
            ..BatchSettings::default()
        };
        assert_eq!(
            settings.truncate_and_filter("ABCDEF1234567890XYZ").as_deref(),
            Some("ABCDEF1234567890XYZ")
        );
    }

    #[test]
    fn truncation_applies_before_prefix_filter() {
        // The prefix matches only after the value is cut down.
        let settings = BatchSettings {
            truncate_len: Some(2),
            prefixes: vec!["01".to_string()],
            likeness_filter: false,
        };
        assert_eq!(settings.truncate_and_filter("01FFAA").as_deref(), Some("01"));
        assert_eq!(settings.truncate_and_filter("FF01AA"), None);
    }
}
