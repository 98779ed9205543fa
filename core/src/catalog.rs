use serde::{Deserialize, Serialize};

use crate::Record;

/// Serializable result of one parse pass, as handed to a renderer.
///
/// A catalog is rebuilt from scratch on every fetch of the feed; it is never
/// merged with a previous catalog.
///
/// # Examples
///
/// ```
/// use handle_feed_core::*;
///
/// let mut catalog = Catalog::new("2024-01-15T10:30:00Z");
/// catalog.records.push(Record::available("@abc", "$40", Category::ThreeLetter));
/// catalog.records.push(Record::sold("@xyz", "gone"));
///
/// assert_eq!(catalog.record_count(), 2);
/// assert_eq!(catalog.sold_count(), 1);
/// assert_eq!(catalog.contract_version, CONTRACT_VERSION);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Record contract version (populated from
    /// [`CONTRACT_VERSION`](crate::CONTRACT_VERSION)).
    pub contract_version: String,
    /// RFC 3339 timestamp of the parse pass.
    pub generated_at: String,
    /// SHA-256 hex digest of the raw feed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_sha256: Option<String>,
    /// Document-level discount percent; 0 when the feed has no directive.
    #[serde(default)]
    pub global_discount: u32,
    /// Records in first-seen order, or in the order requested by the caller.
    pub records: Vec<Record>,
}

impl Catalog {
    /// Creates an empty catalog stamped with `generated_at`.
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            contract_version: crate::CONTRACT_VERSION.to_string(),
            generated_at: generated_at.into(),
            feed_sha256: None,
            global_discount: 0,
            records: Vec::new(),
        }
    }

    /// Creates a catalog holding `records`.
    pub fn with_records(generated_at: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            records,
            ..Self::new(generated_at)
        }
    }

    /// Returns the number of records in this catalog.
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Returns the number of sold records.
    pub fn sold_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_sold).count()
    }
}
