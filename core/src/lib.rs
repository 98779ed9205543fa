//! Core record types and pure operations for handle listing feeds.
//!
//! This crate defines the output model of the feed pipeline and the
//! operations a renderer runs on it:
//!
//! - [`Record`]: one normalized listing (handle, display price, category,
//!   status flags).
//! - [`Category`] and [`SortOption`]: closed enums for the category labels
//!   and the user-selectable orderings.
//! - [`Catalog`]: a versioned envelope for the records of one parse pass.
//!
//! Sorting ([`sort_records`]) and filtering ([`filter_records`],
//! [`available_filters`]) never mutate their input. Validation
//! ([`validate_record`], [`validate_catalog`]) checks the invariants a parse
//! pass guarantees.
//!
//! # Example
//!
//! ```
//! use handle_feed_core::*;
//!
//! let records = vec![
//!     Record::available("@abcd", "$30", Category::FourLetter),
//!     Record::available("@abc", "$20 (50% off $40)", Category::ThreeLetter),
//!     Record::sold("@xy1", "gone"),
//! ];
//!
//! let cheapest_first = sort_records(&filter_records(&records, Filter::All), SortOption::PriceAsc);
//! assert_eq!(cheapest_first[0].handle, "@abc");
//! assert!(validate_catalog(&Catalog::with_records("2024-01-01T00:00:00Z", records)).is_empty());
//! ```

mod catalog;
mod filter;
mod price;
mod sort;
mod types;
mod validate;

pub use catalog::Catalog;
pub use filter::{Filter, FilterCount, available_filters, filter_records};
pub use price::{format_amount, leading_number, price_amount};
pub use sort::{compare_records, sort_records};
pub use types::*;
pub use validate::{ValidationError, validate_catalog, validate_record};
