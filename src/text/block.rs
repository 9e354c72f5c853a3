//! One line of formatted text.
//!
//! A [`TextBlock`] owns an ordered list of [`TextFragment`]s. After every
//! structural change the list is simplified:
//!
//! - empty fragments are dropped, except that an empty line keeps exactly
//!   one empty fragment so the caret always has a format to read;
//! - adjacent fragments with identical formats are merged.
//!
//! Column arguments must lie in `[0, columns()]`. Out-of-range columns are
//! a caller bug and trip a debug assertion; [`TextCursor`] clamps before
//! calling in.

use crate::format::{CharFormat, FormatId, FormatValue};
use crate::geometry::{PointF, RectF};
use crate::markup;
use crate::text::TextCursor;
use crate::text::fragment::TextFragment;
use crate::text::layout::LayoutContext;
use crate::unicode::columns;

/// A line of text: fragments plus line-level layout state.
#[derive(Clone, Debug)]
pub struct TextBlock {
    fragments: Vec<TextFragment>,
    y: f64,
    line_spacing: f64,
    bbox: RectF,
    eol: bool,
}

/// Blocks compare by content only.
impl PartialEq for TextBlock {
    fn eq(&self, other: &Self) -> bool {
        self.fragments == other.fragments
    }
}

impl Default for TextBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBlock {
    /// An empty line in the default format.
    #[must_use]
    pub fn new() -> Self {
        Self::with_format(CharFormat::default())
    }

    /// An empty line whose caret format is `format`.
    #[must_use]
    pub fn with_format(format: CharFormat) -> Self {
        Self {
            fragments: vec![TextFragment::empty(format)],
            y: 0.0,
            line_spacing: 0.0,
            bbox: RectF::default(),
            eol: false,
        }
    }

    /// A line built from fragments, simplified.
    #[must_use]
    pub fn from_fragments(fragments: Vec<TextFragment>) -> Self {
        let mut block = Self {
            fragments,
            ..Self::new()
        };
        if block.fragments.is_empty() {
            block.fragments.push(TextFragment::default());
        }
        block.simplify();
        block
    }

    #[must_use]
    pub fn fragments(&self) -> &[TextFragment] {
        &self.fragments
    }

    /// Fragments that carry text.
    pub fn fragments_without_empty(&self) -> impl Iterator<Item = &TextFragment> {
        self.fragments.iter().filter(|f| !f.is_empty())
    }

    /// Total number of characters on the line.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.fragments.iter().map(TextFragment::columns).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.iter().all(TextFragment::is_empty)
    }

    /// Whether this is the last line of the text.
    #[must_use]
    pub fn eol(&self) -> bool {
        self.eol
    }

    pub fn set_eol(&mut self, eol: bool) {
        self.eol = eol;
    }

    /// Baseline position within the text item.
    #[must_use]
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    #[must_use]
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Bounding box relative to the baseline, as of the last layout.
    #[must_use]
    pub fn bounding_rect(&self) -> RectF {
        self.bbox
    }

    /// Plain text of the whole line.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }

    /// Map a line column to `(fragment index, column within fragment)`.
    ///
    /// A column on a boundary belongs to the fragment on its right. The
    /// end-of-line column has no covering fragment.
    fn locate(&self, column: usize) -> Option<(usize, usize)> {
        let mut col = 0;
        for (idx, f) in self.fragments.iter().enumerate() {
            let cols = f.columns();
            if column < col + cols {
                return Some((idx, column - col));
            }
            col += cols;
        }
        None
    }

    /// Fragment covering `column`; the last fragment at the end of the line.
    #[must_use]
    pub fn fragment(&self, column: usize) -> Option<&TextFragment> {
        self.locate(column)
            .map(|(idx, _)| &self.fragments[idx])
            .or_else(|| self.fragments.last())
    }

    /// Format of the character at `column`.
    #[must_use]
    pub fn format_at(&self, column: usize) -> Option<&CharFormat> {
        self.fragment(column).map(|f| &f.format)
    }

    /// Insert `text` at the cursor column in the cursor's format.
    ///
    /// `text` must not contain a line break; use [`split`](Self::split).
    pub fn insert(&mut self, cursor: &TextCursor, text: &str) {
        debug_assert!(!text.contains('\n'), "line break inserted into a block");
        debug_assert!(cursor.column() <= self.columns());
        if text.is_empty() {
            return;
        }
        let format = cursor.format();
        self.remove_empty_fragment();

        match self.locate(cursor.column()) {
            Some((idx, rcol)) if self.fragments[idx].format == *format => {
                columns::insert_at(&mut self.fragments[idx].text, rcol, text);
            }
            Some((idx, 0)) => {
                self.fragments
                    .insert(idx, TextFragment::new(text, format.clone()));
            }
            Some((idx, rcol)) => {
                let tail = self.fragments[idx].split(rcol);
                self.fragments
                    .insert(idx + 1, TextFragment::new(text, format.clone()));
                self.fragments.insert(idx + 2, tail);
            }
            None => match self.fragments.last_mut() {
                Some(last) if last.format == *format => last.text.push_str(text),
                _ => self
                    .fragments
                    .push(TextFragment::new(text, format.clone())),
            },
        }
        self.simplify();
        self.invalidate();
    }

    /// Append `text` in `format` at the end of the line.
    pub(crate) fn push_text(&mut self, text: &str, format: &CharFormat) {
        if text.is_empty() {
            return;
        }
        self.remove_empty_fragment();
        match self.fragments.last_mut() {
            Some(last) if last.format == *format => last.text.push_str(text),
            _ => self
                .fragments
                .push(TextFragment::new(text, format.clone())),
        }
        self.invalidate();
    }

    /// Set the caret format of an empty line.
    pub(crate) fn set_empty_format(&mut self, format: &CharFormat) {
        if self.is_empty() {
            self.fragments.truncate(1);
            if let Some(f) = self.fragments.first_mut() {
                f.format = format.clone();
            } else {
                self.fragments.push(TextFragment::empty(format.clone()));
            }
        }
    }

    /// Put every run, and the caret of an empty line, in one format.
    pub(crate) fn reset_format(&mut self, format: &CharFormat) {
        for f in &mut self.fragments {
            f.format = format.clone();
        }
        self.simplify();
        self.invalidate();
    }

    /// Remove the character at `column`, returning it.
    pub fn remove(&mut self, column: usize, cursor: &TextCursor) -> String {
        self.remove_range(column, 1, cursor)
    }

    /// Remove `n` characters starting at `start`, returning them.
    pub fn remove_range(&mut self, start: usize, n: usize, cursor: &TextCursor) -> String {
        debug_assert!(
            start + n <= self.columns(),
            "remove {n} at {start} past end of {}-column line",
            self.columns()
        );
        let end = start + n;
        let mut removed = String::new();
        let mut col = 0;
        for f in &mut self.fragments {
            let cols = f.columns();
            let from = start.max(col);
            let to = end.min(col + cols);
            if from < to {
                removed.push_str(&columns::remove_range(&mut f.text, from - col, to - from));
            }
            col += cols;
        }
        self.simplify();
        self.insert_empty_fragment_if_needed(cursor);
        self.invalidate();
        removed
    }

    /// Break the line at `column`.
    ///
    /// This block keeps `[0, column)`; the returned block holds the rest
    /// and takes over the end-of-text flag.
    #[must_use]
    pub fn split(&mut self, column: usize, cursor: &TextCursor) -> Self {
        debug_assert!(column <= self.columns());
        let mut tail = Vec::new();
        match self.locate(column) {
            Some((idx, 0)) => tail.extend(self.fragments.drain(idx..)),
            Some((idx, rcol)) => {
                tail.push(self.fragments[idx].split(rcol));
                tail.extend(self.fragments.drain(idx + 1..));
            }
            None => {
                let format = self
                    .fragments
                    .last()
                    .map_or_else(|| cursor.format().clone(), |f| f.format.clone());
                tail.push(TextFragment::empty(format));
            }
        }
        self.insert_empty_fragment_if_needed(cursor);

        let mut rest = Self::from_fragments(tail);
        rest.eol = self.eol;
        self.eol = false;
        self.invalidate();
        rest
    }

    /// Join `next` onto the end of this line.
    pub fn append(&mut self, next: Self) {
        self.fragments.extend(next.fragments);
        self.eol = next.eol;
        self.simplify();
        self.invalidate();
    }

    /// Apply a format attribute to columns `[start, start + n)`.
    ///
    /// On an empty line a range starting at column 0 changes the caret
    /// format carried by the empty fragment.
    pub fn change_format(&mut self, id: FormatId, value: &FormatValue, start: usize, n: usize) {
        debug_assert!(start + n <= self.columns());
        if self.is_empty() {
            if start == 0 {
                for f in &mut self.fragments {
                    f.change_format(id, value);
                }
            }
            return;
        }
        if n == 0 {
            return;
        }
        let end = start + n;
        self.split_at(start);
        self.split_at(end);

        let mut col = 0;
        for f in &mut self.fragments {
            let cols = f.columns();
            if col >= start && col + cols <= end {
                f.change_format(id, value);
            }
            col += cols;
        }
        self.simplify();
        self.invalidate();
    }

    /// Ensure a fragment boundary at `column`.
    fn split_at(&mut self, column: usize) {
        if let Some((idx, rcol)) = self.locate(column) {
            if rcol > 0 {
                let tail = self.fragments[idx].split(rcol);
                self.fragments.insert(idx + 1, tail);
            }
        }
    }

    /// Text of columns `[start, end)`.
    ///
    /// With `with_format` the text is escaped markup with each run wrapped
    /// in its own style tags, suitable for pasting elsewhere.
    #[must_use]
    pub fn text(&self, start: usize, end: usize, with_format: bool) -> String {
        let mut out = String::new();
        let mut tags = markup::RunTags::default();
        let mut col = 0;
        for f in self.fragments_without_empty() {
            let cols = f.columns();
            let from = start.max(col);
            let to = end.min(col + cols);
            if from < to {
                let piece = columns::slice(&f.text, from - col, to - col);
                if with_format {
                    tags.write_run(&mut out, piece, &f.format);
                } else {
                    out.push_str(piece);
                }
            }
            col += cols;
        }
        out
    }

    /// Drop the placeholder fragment of an empty line before writing text.
    fn remove_empty_fragment(&mut self) {
        if self.is_empty() {
            self.fragments.clear();
        }
    }

    /// Give an emptied line one fragment in the caret format.
    fn insert_empty_fragment_if_needed(&mut self, cursor: &TextCursor) {
        if self.is_empty() {
            self.set_empty_format(cursor.format());
        }
    }

    /// Drop empty fragments and merge neighbours with equal formats.
    fn simplify(&mut self) {
        if self.is_empty() {
            self.fragments.truncate(1);
            return;
        }
        let mut merged: Vec<TextFragment> = Vec::with_capacity(self.fragments.len());
        for f in self.fragments.drain(..).filter(|f| !f.is_empty()) {
            match merged.last_mut() {
                Some(last) if last.format == f.format => last.text.push_str(&f.text),
                _ => merged.push(f),
            }
        }
        self.fragments = merged;
    }

    fn invalidate(&mut self) {
        self.bbox = RectF::default();
    }

    /// Place fragments left to right and compute spacing and bounding box.
    pub fn layout(&mut self, ctx: &LayoutContext) {
        let mut x = 0.0;
        let mut bbox = RectF::default();
        let mut spacing: f64 = 0.0;
        for f in &mut self.fragments {
            let draw = ctx.draw_format(&f.format);
            let width = ctx.metrics.advance(&f.text, &draw);
            let shift = ctx.baseline_shift(&f.format);
            let ascent = ctx.metrics.ascent(&draw);
            let descent = ctx.metrics.descent(&draw);
            f.pos = PointF::new(x, shift);
            bbox = bbox.united(&RectF::new(x, shift - ascent, width, ascent + descent));
            spacing = spacing.max(ctx.metrics.line_spacing(&draw));
            x += width;
        }
        self.bbox = bbox;
        self.line_spacing = spacing * ctx.line_spacing;
    }

    /// X position of the caret at `column`.
    #[must_use]
    pub fn xpos(&self, column: usize, ctx: &LayoutContext) -> f64 {
        let mut col = 0;
        for f in &self.fragments {
            let cols = f.columns();
            if column <= col + cols {
                let prefix = columns::slice(&f.text, 0, column - col);
                return f.pos.x + ctx.advance(prefix, &f.format);
            }
            col += cols;
        }
        self.fragments
            .last()
            .map_or(0.0, |f| f.pos.x + ctx.advance(&f.text, &f.format))
    }

    /// Column nearest to the x position `x`.
    #[must_use]
    pub fn column(&self, x: f64, ctx: &LayoutContext) -> usize {
        let mut col = 0;
        for f in self.fragments_without_empty() {
            if x <= f.pos.x {
                return col;
            }
            let mut prev = 0.0;
            for (byte, c) in f.text.char_indices() {
                let next = ctx.advance(&f.text[..byte + c.len_utf8()], &f.format);
                if x <= f.pos.x + prev + (next - prev) * 0.5 {
                    return col;
                }
                col += 1;
                prev = next;
            }
        }
        col
    }

    /// Rectangle spanned by columns `[col1, col2)`, relative to the baseline.
    #[must_use]
    pub fn bounding_rect_range(&self, col1: usize, col2: usize, ctx: &LayoutContext) -> RectF {
        let x1 = self.xpos(col1, ctx);
        let x2 = self.xpos(col2, ctx);
        RectF::new(x1, self.bbox.y, x2 - x1, self.bbox.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor_at(column: usize, format: CharFormat) -> TextCursor {
        let mut cursor = TextCursor::new();
        cursor.set_column(column);
        cursor.set_char_format(format);
        cursor
    }

    fn plain() -> CharFormat {
        CharFormat::default()
    }

    fn bold() -> CharFormat {
        CharFormat::default().with_bold()
    }

    fn assert_simplified(block: &TextBlock) {
        assert!(!block.fragments().is_empty(), "block has no fragments");
        let sum: usize = block.fragments().iter().map(TextFragment::columns).sum();
        assert_eq!(sum, block.columns());
        for pair in block.fragments().windows(2) {
            assert_ne!(pair[0].format, pair[1].format, "adjacent equal formats");
        }
        if block.columns() > 0 {
            assert!(block.fragments().iter().all(|f| !f.is_empty()));
        } else {
            assert_eq!(block.fragments().len(), 1);
        }
    }

    #[test]
    fn test_new_block_has_one_empty_fragment() {
        let block = TextBlock::new();
        assert_eq!(block.fragments().len(), 1);
        assert_eq!(block.columns(), 0);
        assert!(block.fragment(0).is_some());
    }

    #[test]
    fn test_insert_into_empty_block() {
        let mut block = TextBlock::new();
        block.insert(&cursor_at(0, plain()), "ab");
        assert_eq!(block.fragments().len(), 1);
        assert_eq!(block.fragments()[0].text, "ab");
        assert_simplified(&block);
    }

    #[test]
    fn test_insert_then_bold_first_column() {
        let mut block = TextBlock::new();
        block.insert(&cursor_at(0, plain()), "ab");
        block.change_format(FormatId::Bold, &FormatValue::Bool(true), 0, 1);

        let frags = block.fragments();
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].text, "a");
        assert!(frags[0].format.bold());
        assert_eq!(frags[1].text, "b");
        assert!(!frags[1].format.bold());
    }

    #[test]
    fn test_insert_different_format_mid_run_splits() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("forte", plain())]);
        block.insert(&cursor_at(2, bold()), "XX");

        let texts: Vec<_> = block.fragments().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["fo", "XX", "rte"]);
        assert!(block.fragments()[1].format.bold());
        assert_simplified(&block);
    }

    #[test]
    fn test_insert_at_boundary_merges_with_left_neighbour() {
        let mut block = TextBlock::from_fragments(vec![
            TextFragment::new("ab", bold()),
            TextFragment::new("cd", plain()),
        ]);
        block.insert(&cursor_at(2, bold()), "X");
        let texts: Vec<_> = block.fragments().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["abX", "cd"]);
        assert_simplified(&block);
    }

    #[test]
    fn test_insert_at_end_with_new_format_appends() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("mp", plain())]);
        block.insert(&cursor_at(2, bold()), "!");
        assert_eq!(block.fragments().len(), 2);
        assert_eq!(block.plain_text(), "mp!");
    }

    #[test]
    fn test_remove_last_character_keeps_empty_fragment() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("x", bold())]);
        let removed = block.remove(0, &cursor_at(0, bold()));
        assert_eq!(removed, "x");
        assert_eq!(block.columns(), 0);
        assert_eq!(block.fragments().len(), 1);
        assert!(block.fragments()[0].is_empty());
        assert!(block.fragments()[0].format.bold());
    }

    #[test]
    fn test_remove_range_across_fragments_merges() {
        let mut block = TextBlock::from_fragments(vec![
            TextFragment::new("abc", plain()),
            TextFragment::new("XY", bold()),
            TextFragment::new("def", plain()),
        ]);
        let removed = block.remove_range(2, 4, &cursor_at(2, plain()));
        assert_eq!(removed, "cXYd");
        assert_eq!(block.fragments().len(), 1);
        assert_eq!(block.plain_text(), "abef");
    }

    #[test]
    fn test_split_mid_line() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("hello", plain())]);
        block.set_eol(true);
        let rest = block.split(2, &cursor_at(2, plain()));
        assert_eq!(block.plain_text(), "he");
        assert_eq!(rest.plain_text(), "llo");
        assert!(!block.eol());
        assert!(rest.eol());
    }

    #[test]
    fn test_split_at_end_creates_empty_line_with_last_format() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("Fine", bold())]);
        let rest = block.split(4, &cursor_at(4, plain()));
        assert_eq!(block.plain_text(), "Fine");
        assert_eq!(rest.columns(), 0);
        assert_eq!(rest.fragments().len(), 1);
        assert!(rest.fragments()[0].format.bold());
    }

    #[test]
    fn test_split_at_start_leaves_empty_head() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("Coda", bold())]);
        let rest = block.split(0, &cursor_at(0, bold()));
        assert_eq!(block.columns(), 0);
        assert_eq!(block.fragments().len(), 1);
        assert_eq!(rest.plain_text(), "Coda");
    }

    #[test]
    fn test_append_joins_lines() {
        let mut a = TextBlock::from_fragments(vec![TextFragment::new("Da ", plain())]);
        let mut b = TextBlock::from_fragments(vec![TextFragment::new("Capo", plain())]);
        b.set_eol(true);
        a.append(b);
        assert_eq!(a.plain_text(), "Da Capo");
        assert_eq!(a.fragments().len(), 1);
        assert!(a.eol());
    }

    #[test]
    fn test_append_to_empty_line_drops_placeholder() {
        let mut a = TextBlock::with_format(bold());
        let b = TextBlock::from_fragments(vec![TextFragment::new("x", plain())]);
        a.append(b);
        assert_eq!(a.fragments().len(), 1);
        assert!(!a.fragments()[0].format.bold());
    }

    #[test]
    fn test_change_format_middle_of_run() {
        let mut block = TextBlock::from_fragments(vec![TextFragment::new("abcdef", plain())]);
        block.change_format(FormatId::Italic, &FormatValue::Bool(true), 2, 2);
        let texts: Vec<_> = block.fragments().iter().map(|f| f.text.as_str()).collect();
        assert_eq!(texts, ["ab", "cd", "ef"]);
        assert!(block.fragments()[1].format.italic());
        assert_simplified(&block);
    }

    #[test]
    fn test_change_format_that_unifies_runs_merges() {
        let mut block = TextBlock::from_fragments(vec![
            TextFragment::new("ab", bold()),
            TextFragment::new("cd", plain()),
        ]);
        block.change_format(FormatId::Bold, &FormatValue::Bool(true), 2, 2);
        assert_eq!(block.fragments().len(), 1);
        assert!(block.fragments()[0].format.bold());
    }

    #[test]
    fn test_change_format_on_empty_line() {
        let mut block = TextBlock::new();
        block.change_format(FormatId::Underline, &FormatValue::Bool(true), 0, 0);
        assert!(block.fragments()[0].format.underline());
    }

    #[test]
    fn test_fragment_and_format_at() {
        let block = TextBlock::from_fragments(vec![
            TextFragment::new("ab", bold()),
            TextFragment::new("cd", plain()),
        ]);
        assert!(block.format_at(1).unwrap().bold());
        assert!(!block.format_at(2).unwrap().bold());
        // end of line resolves to the last fragment
        assert_eq!(block.fragment(4).unwrap().text, "cd");
    }

    #[test]
    fn test_text_plain_and_formatted() {
        let block = TextBlock::from_fragments(vec![
            TextFragment::new("a<b", bold()),
            TextFragment::new("cd", plain()),
        ]);
        assert_eq!(block.text(1, 4, false), "<bc");
        assert_eq!(
            block.text(0, 5, true),
            "<font size=\"12\"/><b>a&lt;b</b>cd"
        );
    }

    #[test]
    fn test_layout_positions_and_geometry() {
        let ctx = LayoutContext::default();
        let mut block = TextBlock::from_fragments(vec![
            TextFragment::new("ab", bold()),
            TextFragment::new("cd", plain()),
        ]);
        block.layout(&ctx);

        assert_eq!(block.fragments()[0].pos.x, 0.0);
        assert_eq!(block.fragments()[1].pos.x, 12.0);
        assert_eq!(block.bounding_rect(), RectF::new(0.0, -9.0, 24.0, 12.0));
        assert_eq!(block.xpos(3, &ctx), 18.0);
        assert_eq!(block.column(17.0, &ctx), 3);
        assert_eq!(block.column(-5.0, &ctx), 0);
        assert_eq!(block.column(100.0, &ctx), 4);

        let r = block.bounding_rect_range(1, 3, &ctx);
        assert_eq!(r, RectF::new(6.0, -9.0, 12.0, 12.0));
    }

    #[test]
    fn test_layout_empty_block_has_height() {
        let mut block = TextBlock::new();
        block.layout(&LayoutContext::default());
        assert_eq!(block.bounding_rect().height, 12.0);
        assert_eq!(block.bounding_rect().width, 0.0);
        assert!(block.line_spacing() > 0.0);
    }

    // Column contract: `columns()` itself is a valid position, one past it
    // is not.

    fn fortissimo() -> TextBlock {
        let mut block = TextBlock::new();
        block.insert(&cursor_at(0, bold()), "ff");
        block.insert(&cursor_at(2, plain()), "z");
        block
    }

    #[test]
    fn test_operations_at_end_column() {
        let mut block = fortissimo();
        let end = block.columns();
        assert_eq!(end, 3);

        block.insert(&cursor_at(end, plain()), "!");
        assert_eq!(block.plain_text(), "ffz!");

        let end = block.columns();
        assert_eq!(block.remove_range(end, 0, &cursor_at(end, plain())), "");
        block.change_format(FormatId::Italic, &FormatValue::Bool(true), end, 0);
        assert_eq!(block.plain_text(), "ffz!");
        assert_simplified(&block);

        assert_eq!(block.remove_range(end - 1, 1, &cursor_at(end - 1, plain())), "!");
        assert_eq!(block.format_at(block.columns()), Some(&plain()));

        let tail = block.split(block.columns(), &cursor_at(3, plain()));
        assert!(tail.is_empty());
        assert_eq!(block.plain_text(), "ffz");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cursor.column() <= self.columns()")]
    fn test_insert_past_end_panics() {
        let mut block = fortissimo();
        block.insert(&cursor_at(4, plain()), "x");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past end of 3-column line")]
    fn test_remove_range_past_end_panics() {
        let mut block = fortissimo();
        block.remove_range(2, 2, &cursor_at(2, plain()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "past end of 3-column line")]
    fn test_remove_at_end_panics() {
        let mut block = fortissimo();
        block.remove(3, &cursor_at(3, plain()));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "start + n <= self.columns()")]
    fn test_change_format_past_end_panics() {
        let mut block = fortissimo();
        block.change_format(FormatId::Bold, &FormatValue::Bool(false), 1, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "column <= self.columns()")]
    fn test_split_past_end_panics() {
        let mut block = fortissimo();
        let _ = block.split(4, &cursor_at(4, plain()));
    }
}
