//! Character-column addressing within run text.
//!
//! A column counts Unicode scalar values, never bytes, so caret motion is
//! per character regardless of encoding width. Every function clamps a
//! column past the end to the end of the string.

/// Number of columns (characters) in `s`.
#[inline]
#[must_use]
pub fn columns(s: &str) -> usize {
    if s.is_ascii() {
        s.len()
    } else {
        s.chars().count()
    }
}

/// Byte offset of `column` in `s`.
#[must_use]
pub fn byte_offset(s: &str, column: usize) -> usize {
    if s.is_ascii() {
        return column.min(s.len());
    }
    s.char_indices()
        .nth(column)
        .map_or(s.len(), |(offset, _)| offset)
}

/// The slice of `s` covering columns `[start, end)`.
#[must_use]
pub fn slice(s: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(s, start);
    let to = byte_offset(s, end.max(start));
    &s[from..to]
}

/// Character at `column`, if any.
#[must_use]
pub fn char_at(s: &str, column: usize) -> Option<char> {
    s.chars().nth(column)
}

/// Insert `text` into `s` at `column`.
pub fn insert_at(s: &mut String, column: usize, text: &str) {
    let offset = byte_offset(s, column);
    s.insert_str(offset, text);
}

/// Remove columns `[start, start + n)` from `s`, returning the removed text.
pub fn remove_range(s: &mut String, start: usize, n: usize) -> String {
    let from = byte_offset(s, start);
    let to = byte_offset(s, start + n);
    s.drain(from..to).collect()
}

/// Split `s` at `column`, leaving the prefix in `s` and returning the rest.
pub fn split_off(s: &mut String, column: usize) -> String {
    let offset = byte_offset(s, column);
    s.split_off(offset)
}
