//! Display width of characters, used for approximate glyph advances.

use unicode_width::UnicodeWidthChar;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WidthMethod {
    /// Ambiguous width = 1 (Western text).
    #[default]
    Narrow,
    /// East Asian ambiguous width = 2.
    Wide,
}

/// Width of a character in cells (0, 1 or 2).
///
/// Control characters and combining marks are zero width.
#[inline]
#[must_use]
pub fn char_width(c: char, method: WidthMethod) -> usize {
    if c.is_ascii() {
        return usize::from(!c.is_ascii_control());
    }
    match method {
        WidthMethod::Narrow => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Wide => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Width of a string in cells.
#[must_use]
pub fn str_width(s: &str, method: WidthMethod) -> usize {
    s.chars().map(|c| char_width(c, method)).sum()
}
