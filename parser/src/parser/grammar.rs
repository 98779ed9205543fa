//! Record grammars tried against a cleaned feed line.
//!
//! Grammars are data: a pattern plus a field extractor. They are tried in
//! order and the first match wins, so a more specific grammar must come
//! before the more general one that would also accept its lines.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use handle_feed_core::MatchResult;

/// A named line pattern and the extractor that turns its captures into fields.
pub struct Grammar {
    pub name: &'static str,
    pattern: Regex,
    extract: fn(&Captures<'_>) -> MatchResult,
}

impl Grammar {
    /// Searches `line` for this grammar; the match need not start the line.
    pub fn apply(&self, line: &str) -> Option<MatchResult> {
        self.pattern.captures(line).map(|caps| (self.extract)(&caps))
    }
}

/// Name of the `@handle - $N %D - description` grammar.
pub const INLINE_DISCOUNT: &str = "inline-discount";
/// Name of the `@handle - price-or-status - description` grammar.
pub const REGULAR: &str = "regular";

static GRAMMARS: LazyLock<Vec<Grammar>> = LazyLock::new(|| {
    // All patterns are compile-time constants. An expect() failure indicates
    // a programmer error in the pattern, not a runtime condition.
    vec![
        Grammar {
            name: INLINE_DISCOUNT,
            pattern: Regex::new(
                r"@([A-Za-z0-9_.]+)\s*-\s*\$([0-9]+(?:\.[0-9]+)?)\s*%([0-9]+)\s*-\s*(.*)?",
            )
            .expect("static regex must compile"),
            extract: |caps| MatchResult {
                handle: group(caps, 1).to_string(),
                raw_price_or_status: format!("${}", group(caps, 2)),
                inline_discount_percent: group(caps, 3).parse().ok(),
                description: group(caps, 4).to_string(),
            },
        },
        Grammar {
            name: REGULAR,
            pattern: Regex::new(r"@([A-Za-z0-9_.]+)\s*-\s*([^-]+)\s*-\s*(.*)?")
                .expect("static regex must compile"),
            extract: |caps| MatchResult {
                handle: group(caps, 1).to_string(),
                raw_price_or_status: group(caps, 2).trim().to_string(),
                inline_discount_percent: None,
                description: group(caps, 3).to_string(),
            },
        },
    ]
});

fn group<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str())
}

/// Returns the grammars in the order they are tried.
pub fn grammars() -> &'static [Grammar] {
    &GRAMMARS
}

/// Applies each grammar in turn and returns the first match with its grammar name.
pub fn match_line(line: &str) -> Option<(&'static str, MatchResult)> {
    grammars()
        .iter()
        .find_map(|grammar| grammar.apply(line).map(|found| (grammar.name, found)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_discount_grammar_wins() {
        let (name, found) = match_line("@bob - $25 %10 - limited offer").unwrap();
        assert_eq!(name, INLINE_DISCOUNT);
        assert_eq!(found.handle, "bob");
        assert_eq!(found.raw_price_or_status, "$25");
        assert_eq!(found.inline_discount_percent, Some(10));
        assert_eq!(found.description, "limited offer");
    }

    #[test]
    fn test_inline_discount_keeps_fraction() {
        let (_, found) = match_line("@bob - $12.50 %5 - x").unwrap();
        assert_eq!(found.raw_price_or_status, "$12.50");
    }

    #[test]
    fn test_regular_grammar_trims_price() {
        let (name, found) = match_line("@alice - $40 - a great handle").unwrap();
        assert_eq!(name, REGULAR);
        assert_eq!(found.handle, "alice");
        assert_eq!(found.raw_price_or_status, "$40");
        assert_eq!(found.inline_discount_percent, None);
        assert_eq!(found.description, "a great handle");
    }

    #[test]
    fn test_regular_grammar_accepts_status_and_empty_description() {
        let (_, found) = match_line("@charlie - SOLD - no longer available").unwrap();
        assert_eq!(found.raw_price_or_status, "SOLD");

        let (_, found) = match_line("@dave - $15 -").unwrap();
        assert_eq!(found.raw_price_or_status, "$15");
        assert_eq!(found.description, "");
    }

    #[test]
    fn test_description_may_contain_hyphens() {
        let (_, found) = match_line("@a.b_c - $5 - one - two").unwrap();
        assert_eq!(found.handle, "a.b_c");
        assert_eq!(found.description, "one - two");
    }

    #[test]
    fn test_unmatched_lines() {
        assert!(match_line("just some text").is_none());
        assert!(match_line("@alice $40").is_none());
        assert!(match_line("@alice - $40").is_none());
        assert!(match_line("@ - $40 - x").is_none());
    }

    #[test]
    fn test_handle_may_appear_mid_line() {
        let (_, found) = match_line("* @zed - $3 - x").unwrap();
        assert_eq!(found.handle, "zed");
    }

    #[test]
    fn test_non_ascii_digits_fall_back_to_regular_grammar() {
        let (name, found) = match_line("@abc - $٤٠ %10 - x").unwrap();
        assert_eq!(name, REGULAR);
        assert_eq!(found.raw_price_or_status, "$٤٠ %10");
        assert_eq!(found.inline_discount_percent, None);
    }

    #[test]
    fn test_grammar_order() {
        let names: Vec<&str> = grammars().iter().map(|g| g.name).collect();
        assert_eq!(names, [INLINE_DISCOUNT, REGULAR]);
    }
}
