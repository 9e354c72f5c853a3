//! Word boundary classification for caret motion and word selection.
//!
//! Lines are cut at Unicode (UAX #29) word boundaries and every piece is
//! classified by its first character. Runs of whitespace are merged into a
//! single segment. All positions are character columns.

use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

/// Classification of a word segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Spaces and other whitespace.
    Whitespace,
    /// Anything else (punctuation, symbols).
    Punctuation,
}

/// Classify a single character.
#[must_use]
pub fn classify(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Whitespace
    } else if c.is_alphanumeric() || c == '_' {
        CharClass::Word
    } else {
        CharClass::Punctuation
    }
}

/// A classified piece of a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WordSegment {
    /// Column range covered by the segment.
    pub columns: Range<usize>,
    pub class: CharClass,
}

/// Cut `line` into classified segments covering every column.
#[must_use]
pub fn word_segments(line: &str) -> Vec<WordSegment> {
    let mut segments: Vec<WordSegment> = Vec::new();
    let mut col = 0;
    for piece in line.split_word_bounds() {
        let len = piece.chars().count();
        let class = piece.chars().next().map_or(CharClass::Whitespace, classify);
        let start = col;
        col += len;
        if let Some(last) = segments.last_mut() {
            if class == CharClass::Whitespace && last.class == CharClass::Whitespace {
                last.columns.end = col;
                continue;
            }
        }
        segments.push(WordSegment {
            columns: start..col,
            class,
        });
    }
    segments
}

/// Start of the next word after `column`, or the end of the line.
#[must_use]
pub fn next_word_start(line: &str, column: usize) -> usize {
    let segments = word_segments(line);
    let end = segments.last().map_or(0, |s| s.columns.end);
    segments
        .iter()
        .find(|s| s.columns.start > column && s.class != CharClass::Whitespace)
        .map_or(end, |s| s.columns.start)
}

/// Start of the word before `column`, or column 0.
#[must_use]
pub fn prev_word_start(line: &str, column: usize) -> usize {
    word_segments(line)
        .iter()
        .rev()
        .find(|s| s.columns.start < column && s.class != CharClass::Whitespace)
        .map_or(0, |s| s.columns.start)
}

/// Column range of the word under `column`.
///
/// At a boundary, a word to the left wins over whitespace to the right.
/// Returns an empty range at `column` for an empty line.
#[must_use]
pub fn word_at(line: &str, column: usize) -> Range<usize> {
    let segments = word_segments(line);
    let right = segments.iter().find(|s| s.columns.contains(&column));
    let left = segments.iter().find(|s| s.columns.end == column);

    match (left, right) {
        (Some(l), Some(r)) if r.class == CharClass::Whitespace && l.class != CharClass::Whitespace => {
            l.columns.clone()
        }
        (_, Some(r)) => r.columns.clone(),
        (Some(l), None) => l.columns.clone(),
        (None, None) => column..column,
    }
}
