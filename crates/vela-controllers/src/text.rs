#![forbid(unsafe_code)]

//! Display-text helpers for fallback rendering.
//!
//! Width is measured in display cells and truncation respects grapheme
//! boundaries, so combining sequences and wide characters are never split.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Suffix appended to truncated text.
pub const ELLIPSIS: char = '…';

/// Truncate `text` to fit within `max_width` display cells, appending an
/// ellipsis when anything was cut.
///
/// Text that already fits is returned unchanged. A budget too small for the
/// ellipsis itself yields an empty string.
#[must_use]
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let ellipsis_width = ELLIPSIS.width().unwrap_or(1);
    if max_width < ellipsis_width {
        return String::new();
    }

    let budget = max_width - ellipsis_width;
    let mut out = String::new();
    let mut used = 0;
    for grapheme in text.graphemes(true) {
        let grapheme_width = grapheme.width();
        if used + grapheme_width > budget {
            break;
        }
        out.push_str(grapheme);
        used += grapheme_width;
    }
    out.push(ELLIPSIS);
    out
}

/// Capitalize the first letter of each word, lowercasing the rest.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_word_bounds() {
        if word.chars().next().is_some_and(char::is_alphabetic) {
            let mut graphemes = word.graphemes(true);
            if let Some(first) = graphemes.next() {
                out.push_str(&first.to_uppercase());
                out.push_str(&graphemes.as_str().to_lowercase());
            }
        } else {
            out.push_str(word);
        }
    }
    out
}

/// Accessible description for a substitute visual shown when a resource
/// fails to load.
#[must_use]
pub fn fallback_label(alt: &str) -> String {
    format!("Failed to load image: {alt}")
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- truncate_with_ellipsis tests ---

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
        assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    }

    #[test]
    fn long_text_gets_ellipsis_within_budget() {
        assert_eq!(truncate_with_ellipsis("hello world", 8), "hello w…");
    }

    #[test]
    fn zero_budget_yields_empty() {
        assert_eq!(truncate_with_ellipsis("hello", 0), "");
    }

    #[test]
    fn budget_of_one_is_just_ellipsis() {
        assert_eq!(truncate_with_ellipsis("hello", 1), "…");
    }

    #[test]
    fn wide_chars_are_not_split() {
        // Each CJK glyph is two cells; budget 4 leaves 3 cells for content,
        // which fits one glyph plus the ellipsis.
        assert_eq!(truncate_with_ellipsis("日本語", 4), "日…");
    }

    #[test]
    fn combining_sequences_stay_together() {
        let text = "e\u{301}e\u{301}e\u{301}"; // é é é as combining pairs
        let truncated = truncate_with_ellipsis(text, 2);
        assert_eq!(truncated, format!("e\u{301}{ELLIPSIS}"));
    }

    // --- title_case tests ---

    #[test]
    fn capitalizes_each_word() {
        assert_eq!(title_case("hello world"), "Hello World");
    }

    #[test]
    fn lowercases_the_rest() {
        assert_eq!(title_case("HELLO wORLD"), "Hello World");
    }

    #[test]
    fn preserves_punctuation_and_spacing() {
        assert_eq!(title_case("one,  two-three"), "One,  Two-Three");
    }

    #[test]
    fn leaves_numbers_alone() {
        assert_eq!(title_case("42 answers"), "42 Answers");
    }

    #[test]
    fn empty_string() {
        assert_eq!(title_case(""), "");
    }

    // --- fallback_label tests ---

    #[test]
    fn fallback_label_embeds_alt() {
        assert_eq!(
            fallback_label("Network diagram"),
            "Failed to load image: Network diagram"
        );
    }
}
