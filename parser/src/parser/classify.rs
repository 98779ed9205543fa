//! Handle-shape category classification.

use handle_feed_core::Category;

/// Derives the length/shape category of `handle` (with or without its `@`).
///
/// Rules are checked in order: three ASCII letters, four ASCII letters,
/// three characters of any kind, then everything else.
pub fn classify_handle(handle: &str) -> Category {
    let bare = handle.strip_prefix('@').unwrap_or(handle);
    let all_letters = bare.chars().all(|ch| ch.is_ascii_alphabetic());
    let len = bare.chars().count();

    match len {
        3 if all_letters => Category::ThreeLetter,
        4 if all_letters => Category::FourLetter,
        3 => Category::ThreeChar,
        _ => Category::SemiUsernames,
    }
}

/// Category of a record: sold records are always [`Category::Sold`].
pub fn categorize(handle: &str, is_sold: bool) -> Category {
    if is_sold {
        Category::Sold
    } else {
        classify_handle(handle)
    }
}
