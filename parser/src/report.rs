//! Structured parse reporting.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::parser::ParseDiagnostics;

/// The discount directive as it appeared in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveReport {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent: Option<u32>,
    pub malformed: bool,
}

/// A line that matched no record grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedLineReport {
    /// 1-based position among the feed's non-empty lines.
    pub line: usize,
    pub text: String,
}

/// Lines matched by one grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarHitReport {
    pub grammar: String,
    pub lines: usize,
}

/// Per-feed parse report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub feed_sha256: String,
    pub total_lines: usize,
    pub record_lines: usize,
    pub recognized_lines: usize,
    pub record_count: usize,
    pub coverage: f64,
    pub global_discount: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directive: Option<DirectiveReport>,
    pub grammar_hits: Vec<GrammarHitReport>,
    pub skipped_lines: Vec<SkippedLineReport>,
    pub duplicate_handles: Vec<String>,
    pub unpriced_handles: Vec<String>,
    pub warnings: Vec<String>,
}

impl ParseReport {
    /// Builds a report from the diagnostics of one parse pass over `feed_text`.
    pub fn from_diagnostics(
        feed_text: &str,
        diagnostics: &ParseDiagnostics,
        record_count: usize,
    ) -> Self {
        let directive = diagnostics.directive.as_ref().map(|d| DirectiveReport {
            text: d.text.clone(),
            percent: d.percent,
            malformed: d.percent.is_none(),
        });

        Self {
            feed_sha256: feed_digest(feed_text),
            total_lines: diagnostics.total_lines,
            record_lines: diagnostics.record_lines,
            recognized_lines: diagnostics.recognized_lines,
            record_count,
            coverage: diagnostics.coverage(),
            global_discount: directive.as_ref().and_then(|d| d.percent).unwrap_or(0),
            directive,
            grammar_hits: diagnostics
                .grammar_hits
                .iter()
                .map(|(name, lines)| GrammarHitReport {
                    grammar: (*name).to_string(),
                    lines: *lines,
                })
                .collect(),
            skipped_lines: diagnostics
                .skipped_lines
                .iter()
                .map(|skipped| SkippedLineReport {
                    line: skipped.number,
                    text: skipped.text.clone(),
                })
                .collect(),
            duplicate_handles: diagnostics.duplicate_handles.clone(),
            unpriced_handles: diagnostics.unpriced_handles.clone(),
            warnings: diagnostics.warnings(),
        }
    }

    /// Returns `true` when every record line produced a record.
    pub fn is_clean(&self) -> bool {
        self.skipped_lines.is_empty()
            && self.duplicate_handles.is_empty()
            && self.unpriced_handles.is_empty()
            && !self.directive.as_ref().is_some_and(|d| d.malformed)
    }
}

/// SHA-256 hex digest of the raw feed text.
///
/// A collaborator polling the feed can compare digests to skip re-rendering
/// an unchanged feed.
pub fn feed_digest(feed_text: &str) -> String {
    format!("{:x}", Sha256::digest(feed_text.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::FeedParser;

    #[test]
    fn test_feed_digest_is_stable_hex() {
        let digest = feed_digest("");
        assert_eq!(
            digest,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(feed_digest("@a - $1 - x"), feed_digest("@a - $1 - x"));
        assert_ne!(feed_digest("@a - $1 - x"), feed_digest("@a - $2 - x"));
    }

    #[test]
    fn test_report_flags_malformed_directive() {
        let text = "discount - some%\n@abc - $40 - x";
        let mut parser = FeedParser::new(text);
        let records = parser.parse();
        let report = ParseReport::from_diagnostics(text, parser.diagnostics(), records.len());

        assert_eq!(report.global_discount, 0);
        assert!(report.directive.as_ref().is_some_and(|d| d.malformed));
        assert!(!report.is_clean());
        assert_eq!(report.record_count, 1);
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let text = "@abc - $40 - x\n???";
        let mut parser = FeedParser::new(text);
        let records = parser.parse();
        let report = ParseReport::from_diagnostics(text, parser.diagnostics(), records.len());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["recognizedLines"], 1);
        assert_eq!(json["skippedLines"][0]["line"], 2);
        assert_eq!(json["grammarHits"][1]["grammar"], "regular");
        assert!(json.get("directive").is_none());
    }
}
