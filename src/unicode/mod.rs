//! Unicode utilities for column addressing, display width and word boundaries.

pub mod columns;
mod width;
mod word;

pub use width::{WidthMethod, char_width, str_width};
pub use word::{CharClass, WordSegment, classify, next_word_start, prev_word_start, word_at, word_segments};
