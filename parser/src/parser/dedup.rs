//! First-occurrence-wins handle deduplication.

use std::collections::HashSet;

/// Fold state for one parse pass: handles seen so far, the items kept, and
/// the keys of rejected repeats.
#[derive(Debug)]
pub struct Dedup<T> {
    seen: HashSet<String>,
    kept: Vec<T>,
    rejected: Vec<String>,
}

impl<T> Default for Dedup<T> {
    fn default() -> Self {
        Self {
            seen: HashSet::new(),
            kept: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl<T> Dedup<T> {
    /// Keeps `item` unless `key` was already offered. Keys compare exactly.
    pub fn offer(mut self, key: String, item: T) -> Self {
        if self.seen.contains(&key) {
            self.rejected.push(key);
        } else {
            self.seen.insert(key);
            self.kept.push(item);
        }
        self
    }

    /// Returns the kept items in first-seen order and the rejected keys.
    pub fn finish(self) -> (Vec<T>, Vec<String>) {
        (self.kept, self.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let (kept, rejected) = [("@dup", 10), ("@other", 5), ("@dup", 20)]
            .into_iter()
            .fold(Dedup::default(), |state, (key, price)| {
                state.offer(key.to_string(), price)
            })
            .finish();
        assert_eq!(kept, [10, 5]);
        assert_eq!(rejected, ["@dup"]);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let (kept, rejected) = Dedup::default()
            .offer("@Abc".to_string(), 1)
            .offer("@abc".to_string(), 2)
            .finish();
        assert_eq!(kept, [1, 2]);
        assert!(rejected.is_empty());
    }
}
