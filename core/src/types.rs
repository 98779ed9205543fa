//! Record type definitions for listing feeds.
//!
//! This module defines the data model produced by one parse pass over a
//! listing feed. The types serialize with [`serde`] so that a renderer or any
//! other collaborator can consume them as JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version of the record contract (semver).
///
/// Embedded in every [`Catalog`](crate::Catalog) so consumers can detect
/// incompatible output.
pub const CONTRACT_VERSION: &str = "1.0.0";

/// Price text used for sold records.
pub const SOLD_PRICE: &str = "SOLD";

/// Returned when a label does not name a known category, sort option or filter.
///
/// # Examples
///
/// ```
/// use handle_feed_core::{Category, ParseLabelError};
///
/// let err = "5 letter".parse::<Category>().unwrap_err();
/// assert_eq!(err, ParseLabelError::Category("5 letter".into()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseLabelError {
    #[error("unknown category: {0}")]
    Category(String),
    #[error("unknown sort option: {0}")]
    SortOption(String),
    #[error("unknown filter: {0}")]
    Filter(String),
}

/// Status flags stripped from the front of a feed line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Markers {
    pub is_new: bool,
    pub is_hot: bool,
}

/// Fields extracted from one cleaned feed line by a grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Handle without the leading `@`.
    pub handle: String,
    /// Trimmed price-or-status text (e.g. `"$40"`, `"sold"`, `"TBA"`).
    pub raw_price_or_status: String,
    /// Per-record discount percent; `None` when the grammar has no inline discount.
    pub inline_discount_percent: Option<u32>,
    /// Free text after the last separator, untrimmed.
    pub description: String,
}

impl MatchResult {
    /// Returns the handle in its `@handle` form.
    pub fn full_handle(&self) -> String {
        format!("@{}", self.handle)
    }
}

/// Category label derived from the shape of a handle.
///
/// Sold records are always [`Category::Sold`], whatever their handle looks
/// like.
///
/// # Examples
///
/// ```
/// use handle_feed_core::Category;
///
/// assert_eq!(Category::ThreeLetter.to_string(), "3 letter");
/// assert_eq!("semi usernames".parse::<Category>(), Ok(Category::SemiUsernames));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "3 letter")]
    ThreeLetter,
    #[serde(rename = "4 letter")]
    FourLetter,
    #[serde(rename = "3 char")]
    ThreeChar,
    #[serde(rename = "Semi usernames")]
    SemiUsernames,
    #[serde(rename = "Sold")]
    Sold,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Category; 5] = [
        Category::ThreeLetter,
        Category::FourLetter,
        Category::ThreeChar,
        Category::SemiUsernames,
        Category::Sold,
    ];

    /// Display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Category::ThreeLetter => "3 letter",
            Category::FourLetter => "4 letter",
            Category::ThreeChar => "3 char",
            Category::SemiUsernames => "Semi usernames",
            Category::Sold => "Sold",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLabelError::Category(s.to_string()))
    }
}

/// User-selected ordering for a record list.
///
/// # Examples
///
/// ```
/// use handle_feed_core::SortOption;
///
/// assert_eq!(SortOption::default(), SortOption::PriceDesc);
/// assert_eq!("price-asc".parse::<SortOption>(), Ok(SortOption::PriceAsc));
/// assert_eq!(SortOption::AlphabeticalDesc.label(), "Alphabetical Z-A");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    AlphabeticalAsc,
    AlphabeticalDesc,
    PriceAsc,
    /// Initial storefront ordering.
    #[default]
    PriceDesc,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption::AlphabeticalAsc,
        SortOption::AlphabeticalDesc,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
    ];

    /// Machine name, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOption::AlphabeticalAsc => "alphabetical-asc",
            SortOption::AlphabeticalDesc => "alphabetical-desc",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
        }
    }

    /// Human-readable label for sort pickers.
    pub fn label(self) -> &'static str {
        match self {
            SortOption::AlphabeticalAsc => "Alphabetical A-Z",
            SortOption::AlphabeticalDesc => "Alphabetical Z-A",
            SortOption::PriceAsc => "Price Low to High",
            SortOption::PriceDesc => "Price High to Low",
        }
    }

    /// Returns `true` for the two descending options.
    pub fn is_descending(self) -> bool {
        matches!(self, SortOption::AlphabeticalDesc | SortOption::PriceDesc)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortOption::ALL
            .into_iter()
            .find(|option| option.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLabelError::SortOption(s.to_string()))
    }
}

/// One normalized listing, ready for display.
///
/// # Examples
///
/// ```
/// use handle_feed_core::{Category, Record};
///
/// let sold = Record::sold("@abc", "gone");
/// assert_eq!(sold.price, "SOLD");
/// assert_eq!(sold.category, Category::Sold);
///
/// let json = serde_json::to_value(&sold).unwrap();
/// assert_eq!(json["isSold"], true);
/// assert_eq!(json["category"], "Sold");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Handle including the leading `@`; unique within one parse pass.
    pub handle: String,
    /// `"SOLD"`, `"$N"`, `"$N (D% off $M)"`, or unparsable text passed through.
    pub price: String,
    /// Trimmed free text; may be empty.
    pub description: String,
    pub category: Category,
    pub is_new: bool,
    pub is_hot: bool,
    pub is_sold: bool,
}

impl Record {
    /// Creates a sold record with no markers.
    pub fn sold(handle: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            price: SOLD_PRICE.to_string(),
            description: description.into(),
            category: Category::Sold,
            is_new: false,
            is_hot: false,
            is_sold: true,
        }
    }

    /// Creates an available record with no markers.
    pub fn available(
        handle: impl Into<String>,
        price: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            handle: handle.into(),
            price: price.into(),
            description: String::new(),
            category,
            is_new: false,
            is_hot: false,
            is_sold: false,
        }
    }

    /// Adds a description.
    pub fn with_description(mut self, desc: &str) -> Self {
        self.description = desc.to_string();
        self
    }

    /// Applies marker flags.
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.is_new = markers.is_new;
        self.is_hot = markers.is_hot;
        self
    }

    /// Returns the marker flags carried by this record.
    pub fn markers(&self) -> Markers {
        Markers {
            is_new: self.is_new,
            is_hot: self.is_hot,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_labels_match_serde() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.label()));
            assert_eq!(category.label().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn test_sort_option_names_match_serde() {
        for option in SortOption::ALL {
            let json = serde_json::to_string(&option).unwrap();
            assert_eq!(json, format!("\"{}\"", option.as_str()));
            assert_eq!(option.as_str().parse::<SortOption>(), Ok(option));
        }
    }

    #[test]
    fn test_unknown_sort_option_is_rejected() {
        assert_eq!(
            "newest".parse::<SortOption>(),
            Err(ParseLabelError::SortOption("newest".to_string()))
        );
    }

    #[test]
    fn test_record_round_trips_camel_case_keys() {
        let record = Record::available("@abc", "$40", Category::ThreeLetter)
            .with_description("nice")
            .with_markers(Markers {
                is_new: true,
                is_hot: false,
            });
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["handle"], "@abc");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["isHot"], false);
        assert_eq!(json["category"], "3 letter");

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_full_handle_adds_prefix() {
        let m = MatchResult {
            handle: "alice".to_string(),
            raw_price_or_status: "$40".to_string(),
            inline_discount_percent: None,
            description: String::new(),
        };
        assert_eq!(m.full_handle(), "@alice");
    }
}
