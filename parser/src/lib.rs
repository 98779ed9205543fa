//! Listing-feed parsing and pricing.
//!
//! This crate turns a line-oriented listing feed into normalized, priced and
//! categorized [`Record`]s. A feed looks like:
//!
//! ```text
//! discount - 20%
//! new @alice - $40 - a great handle
//! hot @bob - $25 %10 - limited offer
//! @charlie - SOLD - no longer available
//! @dave - $15 -
//! ```
//!
//! # Main entry points
//!
//! - [`parse_feed`]: parse feed text into records, in first-seen order.
//! - [`parse_feed_with_report`]: same, plus a [`ParseReport`] describing
//!   skipped lines, dropped duplicates and unparsable prices.
//! - [`FeedRun::into_catalog`]: wrap the records in a versioned
//!   [`Catalog`] for a renderer.
//!
//! Parsing is a pure function of the text and never fails. Fetching and
//! rendering the feed are left to the caller.
//!
//! # Example
//!
//! ```
//! use handle_feed_core::{Category, SortOption, sort_records};
//! use handle_feed_parser::parse_feed;
//!
//! let records = parse_feed("discount - 50%\n@abc - $40 - x\n@zed.q - sold - gone");
//! assert_eq!(records[0].price, "$20 (50% off $40)");
//! assert_eq!(records[0].category, Category::ThreeLetter);
//! assert_eq!(records[1].category, Category::Sold);
//!
//! let by_name = sort_records(&records, SortOption::AlphabeticalDesc);
//! assert_eq!(by_name[0].handle, "@zed.q");
//! ```
//!
//! [`Record`]: handle_feed_core::Record
//! [`Catalog`]: handle_feed_core::Catalog

pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod report;

use std::path::Path;

use handle_feed_core::{Catalog, Record};

pub use config::FeedConfig;
pub use error::{FeedError, Result};
use parser::FeedParser;
use report::ParseReport;

/// Parses feed text into records without any diagnostics.
///
/// # Examples
///
/// ```
/// use handle_feed_parser::parse_feed;
///
/// let records = parse_feed("@dup - $10 - a\n@dup - $20 - b");
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].price, "$10");
/// ```
pub fn parse_feed(feed_text: &str) -> Vec<Record> {
    FeedParser::new(feed_text).parse()
}

/// Records of one parse pass together with its report.
#[derive(Debug, Clone)]
pub struct FeedRun {
    pub records: Vec<Record>,
    pub global_discount: u32,
    pub report: ParseReport,
}

impl FeedRun {
    /// Wraps the records in a [`Catalog`] stamped with `generated_at`.
    pub fn into_catalog(self, generated_at: impl Into<String>) -> Catalog {
        let mut catalog = Catalog::with_records(generated_at, self.records);
        catalog.global_discount = self.global_discount;
        catalog.feed_sha256 = Some(self.report.feed_sha256);
        catalog
    }
}

/// Parses feed text and reports how each line was handled.
///
/// # Examples
///
/// ```
/// use handle_feed_parser::parse_feed_with_report;
///
/// let run = parse_feed_with_report("@abc - $40 - x\nnot a listing");
/// assert_eq!(run.records.len(), 1);
/// assert_eq!(run.report.skipped_lines[0].line, 2);
/// println!("coverage: {:.2}", run.report.coverage);
/// ```
pub fn parse_feed_with_report(feed_text: &str) -> FeedRun {
    let mut parser = FeedParser::new(feed_text);
    let records = parser.parse();
    let report = ParseReport::from_diagnostics(feed_text, parser.diagnostics(), records.len());

    FeedRun {
        records,
        global_discount: parser.global_discount(),
        report,
    }
}

/// Reads feed text from a file.
pub fn read_feed(path: impl AsRef<Path>) -> Result<String> {
    Ok(std::fs::read_to_string(path)?)
}

/// Loads a catalog previously written as JSON.
pub fn load_catalog(path: impl AsRef<Path>) -> Result<Catalog> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
