//! Listing-feed parser.
//!
//! Converts a line-oriented feed into normalized [`Record`]s. Each parse pass
//! runs the same stages, left to right:
//!
//! 1. **Normalize**: split into non-empty lines and consume a leading
//!    `discount - N%` directive.
//! 2. **Markers**: strip leading `new` / `hot` tokens into flags.
//! 3. **Grammars**: match the cleaned line against the ordered grammar list
//!    (inline-discount first, then regular).
//! 4. **Dedup**: drop any `@handle` already seen in this pass.
//! 5. **Pricing and classification**: resolve the display price and the
//!    category of each surviving match.
//!
//! Malformed input never fails the pass. Unmatched lines are skipped and
//! unparsable prices pass through as text; [`ParseDiagnostics`] records
//! each such event.
//!
//! The primary entry point is [`FeedParser::new`] followed by
//! [`FeedParser::parse`], but most consumers should use the higher-level
//! [`parse_feed`](crate::parse_feed) function instead.
//!
//! [`Record`]: handle_feed_core::Record

mod classify;
mod dedup;
mod grammar;
mod markers;
mod normalize;
mod pricing;

pub use classify::{categorize, classify_handle};
pub use grammar::{Grammar, INLINE_DISCOUNT, REGULAR, grammars, match_line};
pub use markers::extract_markers;
pub use normalize::{Directive, FeedLine, NormalizedFeed, normalize_feed};
pub use pricing::{PriceTag, ResolvedPrice, resolve_price};

use handle_feed_core::{Markers, MatchResult, Record};
use tracing::debug;

use dedup::Dedup;

/// A feed line that no grammar accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    pub number: usize,
    pub text: String,
}

/// Diagnostics for a single parse run.
#[derive(Debug, Clone, Default)]
pub struct ParseDiagnostics {
    pub directive: Option<Directive>,
    pub total_lines: usize,
    pub record_lines: usize,
    pub recognized_lines: usize,
    pub skipped_lines: Vec<SkippedLine>,
    pub duplicate_handles: Vec<String>,
    pub unpriced_handles: Vec<String>,
    /// Number of lines matched by each grammar, in grammar order.
    pub grammar_hits: Vec<(&'static str, usize)>,
}

impl ParseDiagnostics {
    /// Share of record lines that matched a grammar.
    pub fn coverage(&self) -> f64 {
        if self.record_lines == 0 {
            return 0.0;
        }
        self.recognized_lines as f64 / self.record_lines as f64
    }

    fn record_hit(&mut self, grammar: &'static str) {
        if let Some((_, count)) = self.grammar_hits.iter_mut().find(|(name, _)| *name == grammar) {
            *count += 1;
        }
    }

    /// Human-readable summaries of everything that degraded the output.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self
            .directive
            .as_ref()
            .is_some_and(|directive| directive.percent.is_none())
        {
            warnings.push("Discount directive has no readable percent; using 0%".to_string());
        }
        if !self.skipped_lines.is_empty() {
            warnings.push(format!(
                "Skipped {} line(s) matching no record grammar",
                self.skipped_lines.len()
            ));
        }
        if !self.duplicate_handles.is_empty() {
            warnings.push(format!(
                "Dropped {} duplicate handle(s): {}",
                self.duplicate_handles.len(),
                self.duplicate_handles.join(", ")
            ));
        }
        if !self.unpriced_handles.is_empty() {
            warnings.push(format!(
                "Kept unparsable price text for: {}",
                self.unpriced_handles.join(", ")
            ));
        }

        warnings
    }
}

/// A grammar match that survived marker extraction.
#[derive(Debug)]
struct Candidate {
    markers: Markers,
    found: MatchResult,
}

/// Parser for one listing feed.
pub struct FeedParser {
    raw_feed: String,
    global_discount: u32,
    diagnostics: ParseDiagnostics,
}

impl FeedParser {
    /// Creates a new parser over the given feed text.
    pub fn new(feed_text: &str) -> Self {
        Self {
            raw_feed: feed_text.to_string(),
            global_discount: 0,
            diagnostics: ParseDiagnostics::default(),
        }
    }

    /// Runs the pipeline and returns records in first-seen order.
    ///
    /// Calling `parse` again starts a fresh pass and resets diagnostics.
    pub fn parse(&mut self) -> Vec<Record> {
        let feed = normalize_feed(&self.raw_feed);
        let global_discount = feed.global_discount();

        let mut diagnostics = ParseDiagnostics {
            total_lines: feed.total_lines(),
            record_lines: feed.lines.len(),
            grammar_hits: grammars().iter().map(|g| (g.name, 0)).collect(),
            ..ParseDiagnostics::default()
        };

        let mut candidates = Vec::with_capacity(feed.lines.len());
        for line in &feed.lines {
            let (markers, cleaned) = extract_markers(&line.text);
            match match_line(cleaned) {
                Some((grammar, found)) => {
                    diagnostics.recognized_lines += 1;
                    diagnostics.record_hit(grammar);
                    candidates.push(Candidate { markers, found });
                }
                None => {
                    debug!(line = line.number, text = %line.text, "Skipping unrecognized line");
                    diagnostics.skipped_lines.push(SkippedLine {
                        number: line.number,
                        text: line.text.clone(),
                    });
                }
            }
        }

        let (unique, duplicates) = candidates
            .into_iter()
            .fold(Dedup::default(), |state, candidate| {
                state.offer(candidate.found.full_handle(), candidate)
            })
            .finish();
        for handle in &duplicates {
            debug!(handle = %handle, "Dropping duplicate handle");
        }
        diagnostics.duplicate_handles = duplicates;

        let records = unique
            .into_iter()
            .map(|candidate| {
                let (record, price_parsed) = build_record(candidate, global_discount);
                if !price_parsed {
                    debug!(handle = %record.handle, price = %record.price, "Unparsable price kept verbatim");
                    diagnostics.unpriced_handles.push(record.handle.clone());
                }
                record
            })
            .collect();

        diagnostics.directive = feed.directive;
        self.global_discount = global_discount;
        self.diagnostics = diagnostics;
        records
    }

    /// Document-level discount found by the last [`parse`](Self::parse).
    pub fn global_discount(&self) -> u32 {
        self.global_discount
    }

    pub fn diagnostics(&self) -> &ParseDiagnostics {
        &self.diagnostics
    }

    pub fn warnings(&self) -> Vec<String> {
        self.diagnostics.warnings()
    }
}

/// Prices and classifies one candidate. The flag is `false` when the price
/// text was passed through unparsed.
fn build_record(candidate: Candidate, global_discount: u32) -> (Record, bool) {
    let Candidate { markers, found } = candidate;
    let handle = found.full_handle();
    let resolved = resolve_price(
        &found.raw_price_or_status,
        found.inline_discount_percent,
        global_discount,
    );

    let record = Record {
        category: categorize(&handle, resolved.is_sold),
        handle,
        price: resolved.price,
        description: found.description.trim().to_string(),
        is_new: markers.is_new,
        is_hot: markers.is_hot,
        is_sold: resolved.is_sold,
    };
    (record, resolved.parsed)
}
