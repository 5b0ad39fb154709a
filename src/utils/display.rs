//! Column-aware text helpers for the fixed-width listing.
//!
//! Widths are measured in terminal columns with `unicode-width`, so wide
//! characters in author names and titles do not break the layout.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Width of the listing in columns.
pub const LISTING_WIDTH: usize = 80;

/// Display width of `text` in columns.
#[inline]
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cut `text` so it occupies at most `max_width` columns.
///
/// No ellipsis is appended; a wide character that would straddle the limit
/// is dropped.
///
/// # Examples
///
/// ```
/// use ads_search::utils::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Hello World", 5), "Hello");
/// assert_eq!(truncate_to_width("Hi", 8), "Hi");
/// ```
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }

    let mut current_width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if current_width + w > max_width {
            break;
        }
        current_width += w;
        out.push(c);
    }
    out
}

/// Join `left` and `right` with spaces so that `right` ends at column `width`.
///
/// When the two parts do not fit, the padding collapses to nothing.
pub fn pad_between(left: &str, right: &str, width: usize) -> String {
    let used = display_width(left) + display_width(right);
    let pad = width.saturating_sub(used);
    format!("{}{}{}", left, " ".repeat(pad), right)
}

/// Word-wrap `text` to lines of at most `width` columns.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}
