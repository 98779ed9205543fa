//! Category filters offered to storefront viewers.
//!
//! Besides the stored [`Category`] values, viewers can pick the synthetic
//! `All`, `New` and `Hot` filters. Every filter except `Sold` only ever shows
//! records that are still available.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Category, ParseLabelError, Record};

/// A record filter, either synthetic or backed by a stored category.
///
/// # Examples
///
/// ```
/// use handle_feed_core::{Category, Filter};
///
/// assert_eq!("Hot".parse::<Filter>(), Ok(Filter::Hot));
/// assert_eq!("3 char".parse::<Filter>(), Ok(Filter::Category(Category::ThreeChar)));
/// assert_eq!(Filter::default().to_string(), "All");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    #[default]
    All,
    New,
    Hot,
    Category(Category),
}

impl Filter {
    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::New => "New",
            Filter::Hot => "Hot",
            Filter::Category(category) => category.label(),
        }
    }

    /// Returns `true` when `record` belongs under this filter.
    pub fn matches(self, record: &Record) -> bool {
        match self {
            Filter::Category(Category::Sold) => record.is_sold,
            _ if record.is_sold => false,
            Filter::All => true,
            Filter::New => record.is_new,
            Filter::Hot => record.is_hot,
            Filter::Category(category) => record.category == category,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Filter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        for filter in [Filter::All, Filter::New, Filter::Hot] {
            if filter.label().eq_ignore_ascii_case(wanted) {
                return Ok(filter);
            }
        }
        wanted
            .parse::<Category>()
            .map(Filter::Category)
            .map_err(|_| ParseLabelError::Filter(s.to_string()))
    }
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Filter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A filter that has at least one record, with its record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCount {
    pub filter: Filter,
    pub count: usize,
}

/// Returns the records shown under `filter`, in input order.
///
/// # Examples
///
/// ```
/// use handle_feed_core::*;
///
/// let records = vec![
///     Record::available("@abc", "$40", Category::ThreeLetter),
///     Record::sold("@xyz", ""),
/// ];
/// assert_eq!(filter_records(&records, Filter::All).len(), 1);
/// assert_eq!(filter_records(&records, Filter::Category(Category::Sold))[0].handle, "@xyz");
/// ```
pub fn filter_records(records: &[Record], filter: Filter) -> Vec<Record> {
    records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect()
}

/// Lists the filters worth offering for `records`.
///
/// `All` always comes first. `New`, `Hot` and each length category appear
/// only when some available record falls under them; `Sold` appears when any
/// record is sold.
pub fn available_filters(records: &[Record]) -> Vec<FilterCount> {
    let count = |filter: Filter| records.iter().filter(|r| filter.matches(r)).count();

    let mut filters = vec![FilterCount {
        filter: Filter::All,
        count: count(Filter::All),
    }];

    let candidates = [Filter::New, Filter::Hot]
        .into_iter()
        .chain(Category::ALL.into_iter().map(Filter::Category));
    for filter in candidates {
        let n = count(filter);
        if n > 0 {
            filters.push(FilterCount { filter, count: n });
        }
    }

    filters
}
