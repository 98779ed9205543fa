//! Feed line normalization and discount-directive extraction.

use regex::Regex;
use std::sync::LazyLock;

use tracing::debug;

/// One non-empty feed line with its 1-based position among non-empty lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedLine {
    pub number: usize,
    pub text: String,
}

/// The document-level discount line, when the feed starts with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub text: String,
    /// `None` when the line starts with `discount -` but carries no `N%`.
    pub percent: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct NormalizedFeed {
    pub directive: Option<Directive>,
    pub lines: Vec<FeedLine>,
}

impl NormalizedFeed {
    /// Discount applied to records without an inline discount; 0 when absent
    /// or malformed.
    pub fn global_discount(&self) -> u32 {
        self.directive
            .as_ref()
            .and_then(|directive| directive.percent)
            .unwrap_or(0)
    }

    /// Number of non-empty lines, including a consumed directive.
    pub fn total_lines(&self) -> usize {
        self.lines.len() + usize::from(self.directive.is_some())
    }
}

const DIRECTIVE_PREFIX: &str = "discount -";

/// Splits `raw` into non-empty lines and consumes a leading discount directive.
///
/// Lines are kept verbatim (only blank lines are dropped). The directive is
/// only recognized on the first non-empty line; it is removed from the record
/// lines even when its percent cannot be read.
pub fn normalize_feed(raw: &str) -> NormalizedFeed {
    static DIRECTIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"discount\s*-\s*([0-9]+)%").expect("static regex must compile")
    });

    let mut lines: Vec<FeedLine> = raw
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(index, text)| FeedLine {
            number: index + 1,
            text: text.to_string(),
        })
        .collect();

    let first = lines
        .first()
        .map(|line| line.text.trim().to_lowercase())
        .filter(|lowered| lowered.starts_with(DIRECTIVE_PREFIX));

    let directive = first.map(|lowered| {
        let percent = DIRECTIVE_RE
            .captures(&lowered)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());
        let consumed = lines.remove(0);
        match percent {
            Some(percent) => debug!(percent, "Consumed discount directive"),
            None => debug!(line = %consumed.text, "Malformed discount directive, using 0%"),
        }
        Directive {
            text: consumed.text,
            percent,
        }
    });

    NormalizedFeed { directive, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_are_dropped() {
        let feed = normalize_feed("\n@a - $1 - x\n   \n\n@b - $2 - y\n");
        let texts: Vec<&str> = feed.lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, ["@a - $1 - x", "@b - $2 - y"]);
        assert_eq!(feed.lines[1].number, 2);
        assert!(feed.directive.is_none());
        assert_eq!(feed.global_discount(), 0);
    }

    #[test]
    fn test_directive_is_case_insensitive_and_consumed() {
        let feed = normalize_feed("  DISCOUNT - 20%\n@abc - $40 - x");
        assert_eq!(feed.global_discount(), 20);
        assert_eq!(feed.lines.len(), 1);
        assert_eq!(feed.lines[0].number, 2);
        assert_eq!(feed.total_lines(), 2);
    }

    #[test]
    fn test_malformed_directive_is_still_consumed() {
        let feed = normalize_feed("discount - lots\n@abc - $40 - x");
        assert_eq!(feed.global_discount(), 0);
        assert_eq!(
            feed.directive,
            Some(Directive {
                text: "discount - lots".to_string(),
                percent: None,
            })
        );
        assert_eq!(feed.lines.len(), 1);
    }

    #[test]
    fn test_directive_only_recognized_on_first_line() {
        let feed = normalize_feed("@abc - $40 - x\ndiscount - 50%");
        assert!(feed.directive.is_none());
        assert_eq!(feed.lines.len(), 2);
    }

    #[test]
    fn test_directive_needs_hyphen_right_after_keyword() {
        let feed = normalize_feed("discount 50%\n@abc - $40 - x");
        assert!(feed.directive.is_none());
        assert_eq!(feed.lines.len(), 2);
    }

    #[test]
    fn test_directive_percent_must_use_ascii_digits() {
        let feed = normalize_feed("discount - ٢٠%\n@abc - $40 - x");
        assert_eq!(feed.global_discount(), 0);
        assert!(feed.directive.is_some_and(|d| d.percent.is_none()));
        assert_eq!(feed.lines.len(), 1);
    }

    #[test]
    fn test_carriage_returns_survive_as_line_content() {
        let feed = normalize_feed("@a - $1 - x\r\n\r\n@b - $2 - y");
        assert_eq!(feed.lines.len(), 2);
        assert_eq!(feed.lines[0].text, "@a - $1 - x\r");
    }
}
