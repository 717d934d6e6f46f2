//! Whitespace normalization and excerpt truncation

use super::MaxLength;

/// Appended to every truncated text.
pub const ELLIPSIS: &str = "...";

/// A space in the last fifth of the window is a good enough word boundary.
const WORD_BOUNDARY_RATIO: f64 = 0.8;

/// Collapse whitespace runs to single spaces and trim both ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut `text` to at most `max` characters, preferring a word boundary, and mark the cut.
///
/// Lengths are counted in `char`s. Text that already fits is returned unchanged.
pub fn truncate(text: &str, max: MaxLength) -> String {
    let MaxLength::Chars(limit) = max else {
        return text.to_string();
    };
    let Some((window_end, _)) = text.char_indices().nth(limit) else {
        return text.to_string();
    };
    let window = &text[..window_end];

    let cut = match window.rfind(' ') {
        Some(space) if window[..space].chars().count() as f64 >= limit as f64 * WORD_BOUNDARY_RATIO => {
            &window[..space]
        }
        _ => window,
    };
    format!("{cut}{ELLIPSIS}")
}
