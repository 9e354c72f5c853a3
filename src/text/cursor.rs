//! Caret and selection over the lines of a [`TextBase`].
//!
//! The cursor holds indices only. Every operation borrows the text it
//! works on, so one cursor can never outlive or alias the blocks it
//! addresses. Rows index blocks; columns count characters within a row.

use crate::event::{TextEvent, emit_event};
use crate::format::{CharFormat, FormatId, FormatValue, SelectionFormat};
use crate::geometry::{PointF, RectF};
use crate::text::{TextBase, TextBlock};
use crate::unicode::{columns, next_word_start, prev_word_start, word_at};

/// Caret motion units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOperation {
    /// First column of the first line.
    Start,
    /// Same x position on the previous line.
    Up,
    StartOfLine,
    Left,
    /// Start of the previous word, wrapping to the previous line end.
    WordLeft,
    /// Last column of the last line.
    End,
    /// Same x position on the next line.
    Down,
    EndOfLine,
    /// Start of the next word, wrapping to the next line start.
    NextWord,
    Right,
}

/// Whether a motion drags the selection anchor along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MoveMode {
    /// Collapse the selection onto the caret.
    #[default]
    MoveAnchor,
    /// Keep the anchor and extend the selection.
    KeepAnchor,
}

/// Unit for [`TextCursor::select`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SelectTextType {
    Word,
    All,
}

/// A selection expressed in linear text positions.
///
/// Positions count one unit per character plus one per line break, so
/// they survive the text being re-parsed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TextRange {
    pub start_position: usize,
    pub end_position: usize,
    pub text: String,
}

/// Editing caret with a selection anchor and a live caret format.
#[derive(Clone, Debug, Default)]
pub struct TextCursor {
    format: CharFormat,
    row: usize,
    column: usize,
    select_line: usize,
    select_column: usize,
    editing: bool,
}

impl TextCursor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn select_line(&self) -> usize {
        self.select_line
    }

    #[must_use]
    pub fn select_column(&self) -> usize {
        self.select_column
    }

    pub fn set_row(&mut self, row: usize) {
        self.row = row;
    }

    pub fn set_column(&mut self, column: usize) {
        self.column = column;
    }

    pub fn set_select_line(&mut self, line: usize) {
        self.select_line = line;
    }

    pub fn set_select_column(&mut self, column: usize) {
        self.select_column = column;
    }

    /// Format new text is typed in.
    #[must_use]
    pub fn format(&self) -> &CharFormat {
        &self.format
    }

    /// Replace the caret format wholesale.
    pub fn set_char_format(&mut self, format: CharFormat) {
        self.format = format;
    }

    #[must_use]
    pub fn editing(&self) -> bool {
        self.editing
    }

    pub fn start_edit(&mut self) {
        self.editing = true;
    }

    pub fn end_edit(&mut self) {
        self.editing = false;
        self.clear_selection();
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.select_line != self.row || self.select_column != self.column
    }

    /// Drop the anchor onto the caret.
    pub fn clear_selection(&mut self) {
        self.select_line = self.row;
        self.select_column = self.column;
    }

    /// Place caret and anchor at `(row, column)`.
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
        self.clear_selection();
    }

    /// Selection endpoints ordered start first.
    #[must_use]
    pub fn selection_bounds(&self) -> ((usize, usize), (usize, usize)) {
        let caret = (self.row, self.column);
        let anchor = (self.select_line, self.select_column);
        if anchor <= caret {
            (anchor, caret)
        } else {
            (caret, anchor)
        }
    }

    /// Column count of the caret's line.
    #[must_use]
    pub fn columns(&self, text: &TextBase) -> usize {
        text.blocks().get(self.row).map_or(0, TextBlock::columns)
    }

    /// Pull row and columns back inside the text.
    pub(crate) fn clamp(&mut self, text: &TextBase) {
        let last = text.blocks().len().saturating_sub(1);
        let fit = |row: usize, col: usize| {
            let row = row.min(last);
            let cols = text.blocks().get(row).map_or(0, TextBlock::columns);
            (row, col.min(cols))
        };
        (self.row, self.column) = fit(self.row, self.column);
        (self.select_line, self.select_column) = fit(self.select_line, self.select_column);
    }

    /// Reconcile the caret format with the text around the caret.
    ///
    /// The character left of the caret wins; at column 0 the character
    /// under the caret is used, and on an empty line its placeholder
    /// fragment.
    pub fn update_cursor_format(&mut self, text: &TextBase) {
        let Some(block) = text.blocks().get(self.row) else {
            return;
        };
        let column = self.column.saturating_sub(1);
        if let Some(format) = block.format_at(column) {
            self.format = format.clone();
        }
    }

    /// Move the caret `count` times by `op`.
    ///
    /// With [`MoveMode::MoveAnchor`] an existing selection collapses; a
    /// horizontal move first lands on the matching selection edge. Returns
    /// whether the caret moved.
    pub fn move_position(
        &mut self,
        text: &TextBase,
        op: MoveOperation,
        mode: MoveMode,
        count: usize,
    ) -> bool {
        let before = (self.row, self.column);
        let blocks = text.blocks();
        if blocks.is_empty() {
            return false;
        }
        let last = blocks.len() - 1;
        let cols = |row: usize| blocks[row].columns();

        let mut remaining = count;
        if mode == MoveMode::MoveAnchor && self.has_selection() && remaining > 0 {
            let (start, end) = self.selection_bounds();
            match op {
                MoveOperation::Left | MoveOperation::WordLeft => {
                    (self.row, self.column) = start;
                    remaining -= 1;
                }
                MoveOperation::Right | MoveOperation::NextWord => {
                    (self.row, self.column) = end;
                    remaining -= 1;
                }
                _ => {}
            }
        }

        let ctx = text.layout_context();
        for _ in 0..remaining {
            match op {
                MoveOperation::Start => (self.row, self.column) = (0, 0),
                MoveOperation::End => (self.row, self.column) = (last, cols(last)),
                MoveOperation::StartOfLine => self.column = 0,
                MoveOperation::EndOfLine => self.column = cols(self.row),
                MoveOperation::Left => {
                    if self.column > 0 {
                        self.column -= 1;
                    } else if self.row > 0 {
                        self.row -= 1;
                        self.column = cols(self.row);
                    }
                }
                MoveOperation::Right => {
                    if self.column < cols(self.row) {
                        self.column += 1;
                    } else if self.row < last {
                        self.row += 1;
                        self.column = 0;
                    }
                }
                MoveOperation::Up | MoveOperation::Down => {
                    let target = if op == MoveOperation::Up {
                        self.row.checked_sub(1)
                    } else {
                        Some(self.row + 1).filter(|&r| r <= last)
                    };
                    if let Some(row) = target {
                        let x = blocks[self.row].xpos(self.column, &ctx);
                        self.row = row;
                        self.column = blocks[row].column(x, &ctx);
                    }
                }
                MoveOperation::WordLeft => {
                    if self.column > 0 {
                        self.column = prev_word_start(&blocks[self.row].plain_text(), self.column);
                    } else if self.row > 0 {
                        self.row -= 1;
                        self.column = cols(self.row);
                    }
                }
                MoveOperation::NextWord => {
                    if self.column < cols(self.row) {
                        self.column = next_word_start(&blocks[self.row].plain_text(), self.column);
                    } else if self.row < last {
                        self.row += 1;
                        self.column = 0;
                    }
                }
            }
        }

        if mode == MoveMode::MoveAnchor {
            self.clear_selection();
        }
        self.update_cursor_format(text);

        let moved = (self.row, self.column) != before;
        if moved {
            emit_event(&TextEvent::CursorChanged {
                position: self.current_position(text),
            });
        }
        moved
    }

    /// Select the word under the caret.
    pub fn select_word(&mut self, text: &TextBase) {
        let Some(block) = text.blocks().get(self.row) else {
            return;
        };
        let range = word_at(&block.plain_text(), self.column);
        self.select_line = self.row;
        self.select_column = range.start;
        self.column = range.end;
        self.update_cursor_format(text);
    }

    /// Select a word or the whole text.
    pub fn select(&mut self, text: &TextBase, kind: SelectTextType) {
        match kind {
            SelectTextType::Word => self.select_word(text),
            SelectTextType::All => {
                self.move_position(text, MoveOperation::Start, MoveMode::MoveAnchor, 1);
                self.move_position(text, MoveOperation::End, MoveMode::KeepAnchor, 1);
            }
        }
    }

    /// Place the caret at the point `p`, given in item coordinates.
    ///
    /// The row is the first line whose descent reaches `p.y`, falling back
    /// to the last line. Returns whether the caret moved.
    pub fn set(&mut self, text: &TextBase, p: PointF, mode: MoveMode) -> bool {
        let blocks = text.blocks();
        if blocks.is_empty() {
            return false;
        }
        let before = (self.row, self.column);
        let ctx = text.layout_context();

        self.row = blocks
            .iter()
            .position(|b| b.y() + b.bounding_rect().bottom() >= p.y)
            .unwrap_or(blocks.len() - 1);
        self.column = blocks[self.row].column(p.x, &ctx);

        if mode == MoveMode::MoveAnchor {
            self.clear_selection();
        }
        self.update_cursor_format(text);

        let moved = (self.row, self.column) != before;
        if moved {
            emit_event(&TextEvent::CursorChanged {
                position: self.current_position(text),
            });
        }
        moved
    }

    /// Caret rectangle in item coordinates.
    #[must_use]
    pub fn cursor_rect(&self, text: &TextBase) -> RectF {
        let Some(block) = text.blocks().get(self.row) else {
            return RectF::default();
        };
        let ctx = text.layout_context();
        let draw = ctx.draw_format(&self.format);
        let ascent = ctx.metrics.ascent(&draw);
        let descent = ctx.metrics.descent(&draw);
        let x = block.xpos(self.column, &ctx);
        RectF::new(x, block.y() - ascent, 0.0, ascent + descent)
    }

    /// Character right of the caret.
    #[must_use]
    pub fn current_character(&self, text: &TextBase) -> Option<char> {
        let block = text.blocks().get(self.row)?;
        columns::char_at(&block.plain_text(), self.column)
    }

    /// Text between `(r1, c1)` and `(r2, c2)`, rows joined by line breaks.
    ///
    /// With `with_format` each run is written as markup.
    #[must_use]
    pub fn extract_text(
        &self,
        text: &TextBase,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
        with_format: bool,
    ) -> String {
        let ((r1, c1), (r2, c2)) = if (r1, c1) <= (r2, c2) {
            ((r1, c1), (r2, c2))
        } else {
            ((r2, c2), (r1, c1))
        };
        let blocks = text.blocks();
        let mut out = String::new();
        for row in r1..=r2.min(blocks.len().saturating_sub(1)) {
            let block = &blocks[row];
            let start = if row == r1 { c1 } else { 0 };
            let end = if row == r2 { c2 } else { block.columns() };
            if row > r1 {
                out.push('\n');
            }
            out.push_str(&block.text(start, end, with_format));
        }
        out
    }

    /// The selected text.
    #[must_use]
    pub fn selected_text(&self, text: &TextBase, with_format: bool) -> String {
        let ((r1, c1), (r2, c2)) = self.selection_bounds();
        self.extract_text(text, r1, c1, r2, c2, with_format)
    }

    /// Linear position of `(row, column)`.
    #[must_use]
    pub fn position(text: &TextBase, row: usize, column: usize) -> usize {
        text.blocks()
            .iter()
            .take(row)
            .map(|b| b.columns() + 1)
            .sum::<usize>()
            + column
    }

    /// Linear position of the caret.
    #[must_use]
    pub fn current_position(&self, text: &TextBase) -> usize {
        Self::position(text, self.row, self.column)
    }

    /// `(row, column)` of a linear position, if it lies inside the text.
    #[must_use]
    pub fn position_to_local_coord(text: &TextBase, position: usize) -> Option<(usize, usize)> {
        let mut remaining = position;
        for (row, block) in text.blocks().iter().enumerate() {
            let cols = block.columns();
            if remaining <= cols {
                return Some((row, remaining));
            }
            remaining -= cols + 1;
        }
        None
    }

    /// The selection as linear positions plus its plain text.
    #[must_use]
    pub fn selection_range(&self, text: &TextBase) -> TextRange {
        let ((r1, c1), (r2, c2)) = self.selection_bounds();
        TextRange {
            start_position: Self::position(text, r1, c1),
            end_position: Self::position(text, r2, c2),
            text: self.selected_text(text, false),
        }
    }

    /// Set one caret format attribute.
    ///
    /// With a selection the change is applied to the selected runs too.
    /// On an empty line the placeholder fragment takes it so it survives
    /// caret reconciliation.
    pub fn set_format(&mut self, text: &mut TextBase, id: FormatId, value: &FormatValue) {
        debug_assert!(self.editing, "set_format outside an edit session");
        self.format.set_format_value(id, value);
        if self.has_selection() {
            self.change_selection_format(text, id, value);
        } else if text.blocks().get(self.row).is_some_and(TextBlock::is_empty) {
            text.blocks_mut()[self.row].change_format(id, value, 0, 0);
        }
    }

    /// Apply one attribute to every selected character.
    pub fn change_selection_format(&mut self, text: &mut TextBase, id: FormatId, value: &FormatValue) {
        debug_assert!(self.editing, "change_selection_format outside an edit session");
        if !self.has_selection() {
            return;
        }
        let ((r1, c1), (r2, c2)) = self.selection_bounds();
        let blocks = text.blocks_mut();
        for row in r1..=r2.min(blocks.len().saturating_sub(1)) {
            let block = &mut blocks[row];
            let start = if row == r1 { c1 } else { 0 };
            let end = if row == r2 { c2 } else { block.columns() };
            block.change_format(id, value, start, end - start);
        }
        text.layout();
    }

    /// Format shared by the selection, or the caret format without one.
    #[must_use]
    pub fn selected_fragments_format(&self, text: &TextBase) -> SelectionFormat {
        if !self.has_selection() {
            return SelectionFormat::from_format(&self.format);
        }
        let ((r1, c1), (r2, c2)) = self.selection_bounds();
        let mut shared: Option<SelectionFormat> = None;
        for (row, block) in text.blocks().iter().enumerate().take(r2 + 1).skip(r1) {
            let start = if row == r1 { c1 } else { 0 };
            let end = if row == r2 { c2 } else { block.columns() };
            let mut col = 0;
            for f in block.fragments_without_empty() {
                let cols = f.columns();
                if col < end && col + cols > start {
                    match shared.as_mut() {
                        Some(s) => s.merge(&f.format),
                        None => shared = Some(SelectionFormat::from_format(&f.format)),
                    }
                }
                col += cols;
            }
        }
        shared.unwrap_or_else(|| SelectionFormat::from_format(&self.format))
    }
}
