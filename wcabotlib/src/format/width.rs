//! Monospace display width.
//!
//! Table layout must count terminal columns, not chars: a CJK ideograph
//! takes two columns and a combining mark takes none.

use unicode_width::UnicodeWidthChar;

/// Number of terminal columns `s` occupies.
///
/// Wide characters count 2, zero-width and combining characters count 0,
/// everything else 1. If any character has no defined width (control
/// characters), the whole string is measured by its char count instead.
///
/// ```rust
/// use wcabotlib::format::display_width;
///
/// assert_eq!(display_width("abc"), 3);
/// assert_eq!(display_width("杜ab"), 4);
/// ```
pub fn display_width(s: &str) -> usize {
    s.chars()
        .try_fold(0usize, |acc, c| c.width().map(|w| acc + w))
        .unwrap_or_else(|| s.chars().count())
}

/// Pad on the right (left-align) up to `width` display columns.
pub fn pad_right(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", s, " ".repeat(fill))
}

/// Pad on the left (right-align) up to `width` display columns.
pub fn pad_left(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{}{}", " ".repeat(fill), s)
}
