//! Record and catalog validation.
//!
//! Checks the structural invariants a parse pass guarantees, so that catalogs
//! loaded back from disk (or produced by another tool) can be trusted by a
//! renderer. Handles must be unique and well-formed, and sold records must
//! carry the `SOLD` price and category.
//!
//! # Examples
//!
//! ```
//! use handle_feed_core::*;
//!
//! let mut catalog = Catalog::new("2024-01-01T00:00:00Z");
//! catalog.records.push(Record::available("@abc", "$40", Category::ThreeLetter));
//! assert!(validate_catalog(&catalog).is_empty());
//!
//! // Invalid: handle missing its leading @
//! catalog.records.push(Record::available("abcd", "$40", Category::FourLetter));
//! assert!(!validate_catalog(&catalog).is_empty());
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Catalog, Category, Record, SOLD_PRICE};

/// Record/catalog validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Catalog contract version is empty.
    #[error("catalog contract version cannot be empty")]
    EmptyContractVersion,
    /// Handle is empty or just `@`.
    #[error("record handle cannot be empty")]
    EmptyHandle,
    /// Handle does not start with `@`.
    #[error("handle must start with '@': {0}")]
    MissingHandlePrefix(String),
    /// Handle contains characters outside `[A-Za-z0-9_.]`.
    #[error("invalid handle characters: {0}")]
    InvalidHandle(String),
    /// Two records share the same `@handle`.
    #[error("duplicate handle in catalog: {0}")]
    DuplicateHandle(String),
    /// Sold record whose price is not `SOLD`.
    #[error("sold record must be priced SOLD: {0}")]
    SoldPriceMismatch(String),
    /// Sold record whose category is not `Sold`.
    #[error("sold record must be categorized Sold: {0}")]
    SoldCategoryMismatch(String),
    /// Available record categorized `Sold`.
    #[error("available record cannot be categorized Sold: {0}")]
    UnsoldInSoldCategory(String),
}

/// Validates a full catalog.
///
/// Checks the contract version, then each record in order, then handle
/// uniqueness. Stops at the first problem.
pub fn validate_catalog(catalog: &Catalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if catalog.contract_version.trim().is_empty() {
        errors.push(ValidationError::EmptyContractVersion);
        return errors;
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for record in &catalog.records {
        errors.extend(validate_record(record));
        if !errors.is_empty() {
            return errors;
        }
        if !seen.insert(record.handle.as_str()) {
            errors.push(ValidationError::DuplicateHandle(record.handle.clone()));
            return errors;
        }
    }

    errors
}

/// Validates one record.
///
/// # Examples
///
/// ```
/// use handle_feed_core::*;
///
/// let mut record = Record::sold("@abc", "");
/// assert!(validate_record(&record).is_empty());
///
/// record.price = "$10".to_string();
/// assert_eq!(
///     validate_record(&record),
///     vec![ValidationError::SoldPriceMismatch("@abc".to_string())]
/// );
/// ```
pub fn validate_record(record: &Record) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let handle = record.handle.as_str();

    let Some(bare) = handle.strip_prefix('@') else {
        if handle.trim().is_empty() {
            errors.push(ValidationError::EmptyHandle);
        } else {
            errors.push(ValidationError::MissingHandlePrefix(handle.to_string()));
        }
        return errors;
    };

    if bare.is_empty() {
        errors.push(ValidationError::EmptyHandle);
        return errors;
    }

    if !bare
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '.'))
    {
        errors.push(ValidationError::InvalidHandle(handle.to_string()));
        return errors;
    }

    if record.is_sold {
        if record.price != SOLD_PRICE {
            errors.push(ValidationError::SoldPriceMismatch(handle.to_string()));
            return errors;
        }
        if record.category != Category::Sold {
            errors.push(ValidationError::SoldCategoryMismatch(handle.to_string()));
            return errors;
        }
    } else if record.category == Category::Sold {
        errors.push(ValidationError::UnsoldInSoldCategory(handle.to_string()));
    }

    errors
}
