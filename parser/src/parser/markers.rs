//! Leading status markers (`new`, `hot`).

use handle_feed_core::Markers;

const NEW: &str = "new";
const HOT: &str = "hot";

/// Strips leading `new ` / `hot ` tokens from `line`.
///
/// Tokens match case-insensitively, in either order, each at most once. A
/// token must be followed by a space; all whitespace after it is consumed.
pub fn extract_markers(line: &str) -> (Markers, &str) {
    let mut markers = Markers::default();
    let mut rest = line;

    loop {
        if !markers.is_new {
            if let Some(tail) = strip_marker(rest, NEW) {
                markers.is_new = true;
                rest = tail;
                continue;
            }
        }
        if !markers.is_hot {
            if let Some(tail) = strip_marker(rest, HOT) {
                markers.is_hot = true;
                rest = tail;
                continue;
            }
        }
        break;
    }

    (markers, rest)
}

fn strip_marker<'a>(line: &'a str, word: &str) -> Option<&'a str> {
    let head = line.get(..word.len())?;
    if !head.eq_ignore_ascii_case(word) {
        return None;
    }
    let tail = &line[word.len()..];
    tail.starts_with(' ').then(|| tail.trim_start())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_markers() {
        let (markers, rest) = extract_markers("@abc - $1 - x");
        assert_eq!(markers, Markers::default());
        assert_eq!(rest, "@abc - $1 - x");
    }

    #[test]
    fn test_single_markers_any_case() {
        let (markers, rest) = extract_markers("NEW   @abc - $1 - x");
        assert!(markers.is_new && !markers.is_hot);
        assert_eq!(rest, "@abc - $1 - x");

        let (markers, rest) = extract_markers("Hot @abc - $1 - x");
        assert!(!markers.is_new && markers.is_hot);
        assert_eq!(rest, "@abc - $1 - x");
    }

    #[test]
    fn test_both_markers_either_order() {
        for line in ["new hot @abc - $1 - x", "hot new @abc - $1 - x"] {
            let (markers, rest) = extract_markers(line);
            assert!(markers.is_new && markers.is_hot, "{line}");
            assert_eq!(rest, "@abc - $1 - x");
        }
    }

    #[test]
    fn test_marker_needs_trailing_space() {
        let (markers, rest) = extract_markers("newbie @abc - $1 - x");
        assert_eq!(markers, Markers::default());
        assert_eq!(rest, "newbie @abc - $1 - x");

        let (markers, _) = extract_markers("new");
        assert!(!markers.is_new);
    }

    #[test]
    fn test_each_marker_consumed_once() {
        let (markers, rest) = extract_markers("new new @abc - $1 - x");
        assert!(markers.is_new);
        assert_eq!(rest, "new @abc - $1 - x");
    }

    #[test]
    fn test_leading_whitespace_blocks_markers() {
        let (markers, rest) = extract_markers(" new @abc - $1 - x");
        assert!(!markers.is_new);
        assert_eq!(rest, " new @abc - $1 - x");
    }

    #[test]
    fn test_multibyte_prefix_does_not_panic() {
        let (markers, rest) = extract_markers("né @abc");
        assert_eq!(markers, Markers::default());
        assert_eq!(rest, "né @abc");
    }
}
