//! Record ordering for the supported [`SortOption`]s.
//!
//! Sold records carry no numeric price, so the price orderings fall back to
//! handle order whenever a sold record takes part in a comparison. The
//! alphabetical orderings ignore sold status entirely.
//!
//! # Examples
//!
//! ```
//! use handle_feed_core::*;
//!
//! let records = vec![
//!     Record::available("@bob", "$25", Category::ThreeLetter),
//!     Record::available("@alice", "$40", Category::SemiUsernames),
//!     Record::available("@carol", "$5", Category::SemiUsernames),
//! ];
//!
//! let sorted = sort_records(&records, SortOption::PriceDesc);
//! let handles: Vec<&str> = sorted.iter().map(|r| r.handle.as_str()).collect();
//! assert_eq!(handles, ["@alice", "@bob", "@carol"]);
//! ```

use std::cmp::Ordering;

use crate::{Record, SortOption, price_amount};

/// Compares two records under `option`.
///
/// Handles are compared byte-wise. Price comparisons read the leading `$N`
/// amount of each price string; a price with no leading amount compares
/// equal to anything.
pub fn compare_records(a: &Record, b: &Record, option: SortOption) -> Ordering {
    if a.is_sold && b.is_sold {
        return by_handle(a, b, option);
    }

    match option {
        SortOption::AlphabeticalAsc | SortOption::AlphabeticalDesc => by_handle(a, b, option),
        SortOption::PriceAsc | SortOption::PriceDesc => {
            if a.is_sold || b.is_sold {
                return by_handle(a, b, option);
            }
            let ordering = match (price_amount(&a.price), price_amount(&b.price)) {
                (Some(pa), Some(pb)) => pa.partial_cmp(&pb).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            };
            if option.is_descending() {
                ordering.reverse()
            } else {
                ordering
            }
        }
    }
}

fn by_handle(a: &Record, b: &Record, option: SortOption) -> Ordering {
    let ordering = a.handle.cmp(&b.handle);
    if option.is_descending() {
        ordering.reverse()
    } else {
        ordering
    }
}

/// Returns a new vector ordered by `option`; the input is left untouched.
///
/// Records that compare equal keep their input order.
pub fn sort_records(records: &[Record], option: SortOption) -> Vec<Record> {
    let mut sorted = records.to_vec();
    merge_sort_by(&mut sorted, &|a, b| compare_records(a, b, option));
    sorted
}

/// Stable top-down merge sort.
///
/// `compare_records` is not transitive when sold and priced records are
/// mixed under a price ordering, and `slice::sort_by` may panic on such
/// comparators. This sort only ever asks "is right strictly before left",
/// so any comparator yields a deterministic permutation.
fn merge_sort_by<T: Clone, F>(items: &mut [T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    let len = items.len();
    if len <= 1 {
        return;
    }

    let mid = len / 2;
    merge_sort_by(&mut items[..mid], compare);
    merge_sort_by(&mut items[mid..], compare);

    let mut merged = Vec::with_capacity(len);
    let (mut left, mut right) = (0, mid);
    while left < mid && right < len {
        if compare(&items[right], &items[left]) == Ordering::Less {
            merged.push(items[right].clone());
            right += 1;
        } else {
            merged.push(items[left].clone());
            left += 1;
        }
    }
    merged.extend_from_slice(&items[left..mid]);
    merged.extend_from_slice(&items[right..len]);
    items.clone_from_slice(&merged);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn priced(handle: &str, price: &str) -> Record {
        Record::available(handle, price, Category::SemiUsernames)
    }

    fn handles(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.handle.as_str()).collect()
    }

    #[test]
    fn test_alphabetical_orders_by_handle() {
        let records = vec![priced("@carol", "$1"), priced("@alice", "$9"), priced("@bob", "$5")];

        let asc = sort_records(&records, SortOption::AlphabeticalAsc);
        assert_eq!(handles(&asc), ["@alice", "@bob", "@carol"]);

        let desc = sort_records(&records, SortOption::AlphabeticalDesc);
        assert_eq!(handles(&desc), ["@carol", "@bob", "@alice"]);
    }

    #[test]
    fn test_alphabetical_ignores_sold_status() {
        let records = vec![Record::sold("@zed", ""), priced("@amy", "$10"), Record::sold("@bo", "")];
        let sorted = sort_records(&records, SortOption::AlphabeticalAsc);
        assert_eq!(handles(&sorted), ["@amy", "@bo", "@zed"]);
    }

    #[test]
    fn test_price_orders_numerically_not_lexically() {
        let records = vec![priced("@a", "$100"), priced("@b", "$9"), priced("@c", "$25")];

        let asc = sort_records(&records, SortOption::PriceAsc);
        assert_eq!(handles(&asc), ["@b", "@c", "@a"]);

        let desc = sort_records(&records, SortOption::PriceDesc);
        assert_eq!(handles(&desc), ["@a", "@c", "@b"]);
    }

    #[test]
    fn test_price_uses_leading_amount_of_discounted_price() {
        let records = vec![priced("@a", "$20 (50% off $40)"), priced("@b", "$30")];
        let asc = sort_records(&records, SortOption::PriceAsc);
        assert_eq!(handles(&asc), ["@a", "@b"]);
    }

    #[test]
    fn test_price_falls_back_to_handle_against_sold() {
        let sold = Record::sold("@a", "");
        let cheap = priced("@b", "$1");

        assert_eq!(compare_records(&sold, &cheap, SortOption::PriceAsc), Ordering::Less);
        assert_eq!(compare_records(&sold, &cheap, SortOption::PriceDesc), Ordering::Greater);

        let sorted = sort_records(&[cheap, sold], SortOption::PriceAsc);
        assert_eq!(handles(&sorted), ["@a", "@b"]);
    }

    #[test]
    fn test_both_sold_compare_by_handle() {
        let records = vec![Record::sold("@b", ""), Record::sold("@a", "")];
        assert_eq!(handles(&sort_records(&records, SortOption::PriceAsc)), ["@a", "@b"]);
        assert_eq!(handles(&sort_records(&records, SortOption::PriceDesc)), ["@b", "@a"]);
    }

    #[test]
    fn test_equal_prices_keep_input_order() {
        let records = vec![priced("@b", "$10"), priced("@a", "$10")];
        let sorted = sort_records(&records, SortOption::PriceAsc);
        assert_eq!(handles(&sorted), ["@b", "@a"]);
    }

    #[test]
    fn test_cyclic_comparisons_do_not_panic() {
        // @c < @a by price, @a < @b and @b < @c by handle
        let records = vec![priced("@c", "$5"), Record::sold("@b", ""), priced("@a", "$10")];
        let sorted = sort_records(&records, SortOption::PriceAsc);
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let records = vec![priced("@b", "$2"), priced("@a", "$1")];
        let _ = sort_records(&records, SortOption::PriceAsc);
        assert_eq!(handles(&records), ["@b", "@a"]);
    }
}
