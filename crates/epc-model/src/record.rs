//! Extracted tag records and batch containers.

use std::collections::BTreeMap;
use std::path::Path;

/// Canonical name of the identifier column.
pub const ATTR_EPC: &str = "EPC";

/// Reader metadata column, derived from the first filename segment.
pub const ATTR_READER: &str = "Reader";

/// Location metadata column, derived from the second filename segment.
pub const ATTR_LOCATION: &str = "Location";

/// Source file column, the full file stem.
pub const ATTR_SOURCE_FILE: &str = "File Name";

/// Placeholder for attributes a contributing file did not provide.
pub const UNKNOWN_VALUE: &str = "Unknown";

/// One extracted tag identifier with its metadata attributes.
///
/// The `epc` value is non-empty at time of inclusion; attribute names are
/// free-form so batches from different tool generations can coexist.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EpcRecord {
    pub epc: String,
    pub attributes: BTreeMap<String, String>,
}

impl EpcRecord {
    pub fn new(epc: impl Into<String>) -> Self {
        Self {
            epc: epc.into(),
            attributes: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Build a record carrying the standard filename-derived metadata.
    ///
    /// The file stem splits on `_`: first segment becomes the reader, second
    /// the location, each falling back to [`UNKNOWN_VALUE`] when absent. The
    /// full stem is retained as the source file attribute.
    pub fn from_scan(epc: impl Into<String>, source: &Path) -> Self {
        let stem = source
            .file_stem()
            .and_then(|value| value.to_str())
            .unwrap_or("");
        let mut segments = stem.split('_');
        let reader = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .unwrap_or(UNKNOWN_VALUE);
        let location = segments.next().unwrap_or(UNKNOWN_VALUE);
        Self::new(epc)
            .with_attribute(ATTR_READER, reader)
            .with_attribute(ATTR_LOCATION, location)
            .with_attribute(ATTR_SOURCE_FILE, stem)
    }
}

/// One user-initiated group of files processed with shared settings.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Batch {
    pub records: Vec<EpcRecord>,
}

impl Batch {
    pub fn new(records: Vec<EpcRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn from_scan_splits_reader_and_location() {
        let record = EpcRecord::from_scan("AABBCCDD", &PathBuf::from("scans/R1_LocA.csv"));
        assert_eq!(record.attribute(ATTR_READER), Some("R1"));
        assert_eq!(record.attribute(ATTR_LOCATION), Some("LocA"));
        assert_eq!(record.attribute(ATTR_SOURCE_FILE), Some("R1_LocA"));
    }

    #[test]
    fn from_scan_defaults_missing_segments() {
        let record = EpcRecord::from_scan("AABBCCDD", &PathBuf::from("warehouse.csv"));
        assert_eq!(record.attribute(ATTR_READER), Some("warehouse"));
        assert_eq!(record.attribute(ATTR_LOCATION), Some(UNKNOWN_VALUE));
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = EpcRecord::new("AABBCCDDEEFF0011").with_attribute(ATTR_LOCATION, "LocA");
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: EpcRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }
}
