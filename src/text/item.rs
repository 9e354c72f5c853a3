//! The owning text item and its edit sessions.
//!
//! [`TextBase`] owns the lines of a text, its item-level properties and an
//! undo history. Markup is parsed eagerly into blocks; the markup and
//! plain-text strings are derived caches, cleared by the single mutable
//! accessor [`TextBase::blocks_mut`]. Text that was never edited therefore
//! returns the markup it was set from unchanged.
//!
//! Interactive editing goes through an [`EditSession`], which borrows the
//! item mutably for its whole lifetime and commits to the undo history
//! when dropped.
//!
//! # Examples
//!
//! ```
//! use scoretext::{FormatId, FormatValue, MoveMode, MoveOperation, TextBase};
//!
//! let mut text = TextBase::from_xml("Allegro");
//! {
//!     let mut edit = text.edit();
//!     edit.insert_text(" vivace");
//!     edit.move_position(MoveOperation::WordLeft, MoveMode::KeepAnchor, 1);
//!     edit.set_format(FormatId::Italic, &FormatValue::Bool(true));
//! }
//! assert_eq!(text.xml_text(), "Allegro <i>vivace</i>");
//! assert!(text.undo().unwrap());
//! assert_eq!(text.xml_text(), "Allegro");
//! ```

use crate::config::TextStyle;
use crate::error::{Error, Result};
use crate::event::{LogLevel, TextEvent, emit_event, emit_log};
use crate::format::{CharFormat, FormatId, FormatValue, SelectionFormat};
use crate::geometry::{PointF, RectF};
use crate::markup::{self, MarkupSink};
use crate::property::{PropertyId, PropertyValue};
use crate::text::cursor::{MoveMode, MoveOperation, SelectTextType, TextCursor, TextRange};
use crate::text::layout::{ApproximateMetrics, FontMetrics, LayoutContext};
use crate::text::{TextBlock, TextFragment};
use crate::undo::{PropertyChange, UndoLog, UndoStack};
use crate::unicode::columns;
use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

/// A formatted multi-line text.
#[derive(Clone)]
pub struct TextBase {
    defaults: TextStyle,
    style: TextStyle,
    blocks: Vec<TextBlock>,
    xml: RefCell<Option<String>>,
    plain: RefCell<Option<String>>,
    metrics: Arc<dyn FontMetrics>,
    bbox: RectF,
    undo: UndoStack,
    /// Caret position recorded with the last undone or redone edit.
    restored_position: Option<usize>,
}

impl fmt::Debug for TextBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextBase")
            .field("style", &self.style)
            .field("blocks", &self.blocks)
            .field("bbox", &self.bbox)
            .finish_non_exhaustive()
    }
}

impl Default for TextBase {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBase {
    /// An empty text in the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::with_style(TextStyle::default())
    }

    /// An empty text whose defaults are `style`.
    #[must_use]
    pub fn with_style(style: TextStyle) -> Self {
        let mut text = Self {
            blocks: markup::parse("", &style.base_format()),
            defaults: style.clone(),
            style,
            xml: RefCell::new(Some(String::new())),
            plain: RefCell::new(None),
            metrics: Arc::new(ApproximateMetrics::default()),
            bbox: RectF::default(),
            undo: UndoStack::new(),
            restored_position: None,
        };
        text.layout();
        text
    }

    /// A text in the default style holding `xml`.
    #[must_use]
    pub fn from_xml(xml: &str) -> Self {
        let mut text = Self::new();
        text.set_xml_text(xml);
        text
    }

    /// Replace the measurement backend and lay out again.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Arc<dyn FontMetrics>) -> Self {
        self.metrics = metrics;
        self.layout();
        self
    }

    #[must_use]
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Format unmarked text is in.
    #[must_use]
    pub fn base_format(&self) -> CharFormat {
        self.style.base_format()
    }

    #[must_use]
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Mutable lines. Clears the derived markup and plain-text strings.
    pub(crate) fn blocks_mut(&mut self) -> &mut Vec<TextBlock> {
        self.restored_position = None;
        self.xml.get_mut().take();
        self.plain.get_mut().take();
        &mut self.blocks
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.blocks.len()
    }

    /// The text as markup.
    #[must_use]
    pub fn xml_text(&self) -> String {
        self.xml
            .borrow_mut()
            .get_or_insert_with(|| markup::emit(&self.blocks, &self.style.base_format()))
            .clone()
    }

    /// Replace the content with `xml`. Not recorded for undo.
    pub fn set_xml_text(&mut self, xml: &str) {
        self.restored_position = None;
        self.blocks = markup::parse(xml, &self.style.base_format());
        *self.xml.get_mut() = Some(xml.to_string());
        self.plain.get_mut().take();
        self.layout();
    }

    /// The text without formatting, lines joined by `\n`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.plain
            .borrow_mut()
            .get_or_insert_with(|| {
                let lines: Vec<String> = self.blocks.iter().map(TextBlock::plain_text).collect();
                lines.join("\n")
            })
            .clone()
    }

    /// Replace the content with unformatted text.
    pub fn set_plain_text(&mut self, plain: &str) {
        self.set_xml_text(&markup::plain_to_xml_text(plain));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1 && self.blocks[0].columns() == 0
    }

    /// Remove all content. Not recorded for undo.
    pub fn clear(&mut self) {
        self.set_xml_text("");
    }

    /// Runs across all lines, with a `"\n"` fragment between lines.
    ///
    /// The separator fragments are the only fragments anywhere that hold a
    /// line break; they exist for exporters that want a flat run list.
    #[must_use]
    pub fn fragment_list(&self) -> Vec<TextFragment> {
        let base = self.base_format();
        let mut list = Vec::new();
        for (row, block) in self.blocks.iter().enumerate() {
            if row > 0 {
                list.push(TextFragment {
                    format: base.clone(),
                    pos: PointF::default(),
                    text: "\n".to_string(),
                });
            }
            list.extend(block.fragments_without_empty().cloned());
        }
        list
    }

    /// Whether any run departs from the base format.
    #[must_use]
    pub fn has_custom_formatting(&self) -> bool {
        let base = self.base_format();
        self.blocks
            .iter()
            .flat_map(TextBlock::fragments_without_empty)
            .any(|f| f.format != base)
    }

    /// Put every run back into the base format. Recorded for undo.
    pub fn reset_formatting(&mut self) {
        let old = self.xml_text();
        let base = self.base_format();
        for block in self.blocks_mut() {
            block.reset_format(&base);
        }
        self.layout();
        let new = self.xml_text();
        self.undo.record(PropertyChange::new(
            PropertyId::Text,
            PropertyValue::String(old),
            PropertyValue::String(new),
        ));
        self.undo.commit();
    }

    /// Context for layout and geometry queries.
    #[must_use]
    pub fn layout_context(&self) -> LayoutContext {
        LayoutContext {
            metrics: Arc::clone(&self.metrics),
            base: self.style.base_format(),
            line_spacing: self.style.line_spacing,
        }
    }

    /// Lay out every line top to bottom.
    ///
    /// Each baseline sits one line spacing below the previous one, the
    /// first one line spacing below the top of the item.
    pub fn layout(&mut self) {
        let ctx = self.layout_context();
        let mut y = 0.0;
        let mut bbox = RectF::default();
        for block in &mut self.blocks {
            block.layout(&ctx);
            y += block.line_spacing();
            block.set_y(y);
            bbox = bbox.united(&block.bounding_rect().translated(0.0, y));
        }
        self.bbox = bbox;
    }

    /// Bounding box of all lines, as of the last layout.
    #[must_use]
    pub fn bounding_rect(&self) -> RectF {
        self.bbox
    }

    /// Start an interactive edit, committing to this item's own history.
    ///
    /// The caret starts at the end of the text, or right after an undo or
    /// redo at the position recorded with the replayed edit.
    pub fn edit(&mut self) -> EditSession<'_> {
        EditSession::new(self, None)
    }

    /// Start an interactive edit that commits to the host's `log`.
    pub fn edit_logged<'a>(&'a mut self, log: &'a mut dyn UndoLog) -> EditSession<'a> {
        EditSession::new(self, Some(log))
    }

    /// Caret position the next edit session will start at, if any.
    #[must_use]
    pub fn restored_cursor_position(&self) -> Option<usize> {
        self.restored_position
    }

    /// Read a property.
    #[must_use]
    pub fn get_property(&self, id: PropertyId) -> PropertyValue {
        self.style
            .value(id)
            .unwrap_or_else(|| PropertyValue::String(self.xml_text()))
    }

    /// Value a property has in a freshly created item.
    #[must_use]
    pub fn property_default(&self, id: PropertyId) -> PropertyValue {
        self.defaults
            .value(id)
            .unwrap_or_else(|| PropertyValue::String(String::new()))
    }

    /// Write a property without recording it.
    ///
    /// Changing the base font re-reads the markup, so runs that inherit
    /// from the base pick up the new value.
    pub fn set_property(&mut self, id: PropertyId, value: &PropertyValue) -> Result<()> {
        if id == PropertyId::Text {
            self.set_xml_text(value.to_text(id)?);
            return Ok(());
        }
        let xml = self.xml_text();
        self.style.set_value(id, value)?;
        if matches!(
            id,
            PropertyId::FontStyle | PropertyId::FontFace | PropertyId::FontSize
        ) {
            self.set_xml_text(&xml);
        } else {
            self.layout();
        }
        Ok(())
    }

    /// Write a property and record the change in `log`.
    pub fn set_property_logged(
        &mut self,
        id: PropertyId,
        value: &PropertyValue,
        log: &mut dyn UndoLog,
    ) -> Result<()> {
        let old = self.get_property(id);
        self.set_property(id, value)?;
        log.record(PropertyChange::new(id, old, self.get_property(id)));
        log.commit();
        Ok(())
    }

    /// Write a property and record the change in this item's history.
    pub fn undo_change_property(&mut self, id: PropertyId, value: &PropertyValue) -> Result<()> {
        let mut undo = std::mem::take(&mut self.undo);
        let result = self.set_property_logged(id, value, &mut undo);
        self.undo = undo;
        result
    }

    #[must_use]
    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo
    }

    pub fn undo_stack_mut(&mut self) -> &mut UndoStack {
        &mut self.undo
    }

    /// Revert the most recent change group. Returns false if there is none.
    ///
    /// If a value cannot be written back, the group is left applied and
    /// stays on the undo stack.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(group) = self.undo.pop_undo() else {
            return Ok(false);
        };
        if let Err(err) = self.replay(group.iter().rev().map(PropertyChange::invert)) {
            self.undo.push_undo(group);
            return Err(err);
        }
        self.restored_position = group.iter().find_map(|c| c.cursor_position);
        self.undo.push_redo(group);
        Ok(true)
    }

    /// Reapply the most recently undone group. Returns false if there is none.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(group) = self.undo.pop_redo() else {
            return Ok(false);
        };
        if let Err(err) = self.replay(group.iter().cloned()) {
            self.undo.push_redo(group);
            return Err(err);
        }
        self.restored_position = group.iter().find_map(|c| c.cursor_position);
        self.undo.push_undo(group);
        Ok(true)
    }

    /// Write the new value of each change in order. On failure the values
    /// already written are put back.
    fn replay(&mut self, changes: impl Iterator<Item = PropertyChange>) -> Result<()> {
        let mut written: Vec<PropertyChange> = Vec::new();
        for change in changes {
            if let Err(err) = self.set_property(change.id, &change.new) {
                for done in written.iter().rev() {
                    // Restoring a value that was just read back cannot fail.
                    let _ = self.set_property(done.id, &done.old);
                }
                return Err(err);
            }
            written.push(change);
        }
        Ok(())
    }
}

/// An active edit of a [`TextBase`].
///
/// Holds the caret. Every operation keeps the text laid out and the caret
/// format reconciled. Dropping the session ends the edit: if the markup
/// changed, the change is recorded as one undo group, in the host log the
/// session was opened with or else in the item's own history.
pub struct EditSession<'a> {
    text: &'a mut TextBase,
    cursor: TextCursor,
    start_xml: String,
    log: Option<&'a mut dyn UndoLog>,
}

impl<'a> EditSession<'a> {
    fn new(text: &'a mut TextBase, log: Option<&'a mut dyn UndoLog>) -> Self {
        let start_xml = text.xml_text();
        let mut cursor = TextCursor::new();
        cursor.start_edit();
        cursor.move_position(text, MoveOperation::End, MoveMode::MoveAnchor, 1);
        let restored = text
            .restored_position
            .take()
            .and_then(|p| TextCursor::position_to_local_coord(text, p));
        if let Some((row, column)) = restored {
            cursor.set_position(row, column);
            cursor.update_cursor_format(text);
        }
        Self {
            text,
            cursor,
            start_xml,
            log,
        }
    }

    #[must_use]
    pub fn text(&self) -> &TextBase {
        self.text
    }

    #[must_use]
    pub fn cursor(&self) -> &TextCursor {
        &self.cursor
    }

    /// Place the caret, clamped to the text.
    pub fn set_position(&mut self, row: usize, column: usize) {
        self.cursor.set_position(row, column);
        self.cursor.clamp(self.text);
        self.cursor.clear_selection();
        self.cursor.update_cursor_format(self.text);
    }

    /// Place the caret at a linear position.
    pub fn set_cursor_position(&mut self, position: usize) -> Result<()> {
        let text: &TextBase = self.text;
        let (row, column) = TextCursor::position_to_local_coord(text, position).ok_or_else(|| {
            let last = text.rows().saturating_sub(1);
            let len = TextCursor::position(text, last, text.blocks().last().map_or(0, TextBlock::columns));
            Error::PositionOutOfRange { position, len }
        })?;
        self.set_position(row, column);
        Ok(())
    }

    #[must_use]
    pub fn current_position(&self) -> usize {
        self.cursor.current_position(self.text)
    }

    pub fn move_position(&mut self, op: MoveOperation, mode: MoveMode, count: usize) -> bool {
        self.cursor.move_position(self.text, op, mode, count)
    }

    /// Place the caret at a point in item coordinates.
    pub fn set(&mut self, p: PointF, mode: MoveMode) -> bool {
        self.cursor.set(self.text, p, mode)
    }

    pub fn select_word(&mut self) {
        self.cursor.select_word(self.text);
    }

    pub fn select_all(&mut self) {
        self.cursor.select(self.text, SelectTextType::All);
    }

    pub fn select(&mut self, kind: SelectTextType) {
        self.cursor.select(self.text, kind);
    }

    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.cursor.has_selection()
    }

    #[must_use]
    pub fn selected_text(&self, with_format: bool) -> String {
        self.cursor.selected_text(self.text, with_format)
    }

    #[must_use]
    pub fn selection_range(&self) -> TextRange {
        self.cursor.selection_range(self.text)
    }

    #[must_use]
    pub fn selected_fragments_format(&self) -> SelectionFormat {
        self.cursor.selected_fragments_format(self.text)
    }

    #[must_use]
    pub fn current_character(&self) -> Option<char> {
        self.cursor.current_character(self.text)
    }

    #[must_use]
    pub fn cursor_rect(&self) -> RectF {
        self.cursor.cursor_rect(self.text)
    }

    /// Set a format attribute at the caret, and on the selection if any.
    pub fn set_format(&mut self, id: FormatId, value: &FormatValue) {
        self.cursor.set_format(self.text, id, value);
        self.text.layout();
    }

    pub fn change_selection_format(&mut self, id: FormatId, value: &FormatValue) {
        self.cursor.change_selection_format(self.text, id, value);
    }

    /// Type `s` at the caret, replacing the selection.
    ///
    /// Line breaks in `s` split the line.
    pub fn insert_text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.delete_selected_text();
        let start = self.current_position();
        for (idx, line) in s.split('\n').enumerate() {
            if idx > 0 {
                self.split_line();
            }
            if !line.is_empty() {
                let row = self.cursor.row();
                self.text.blocks_mut()[row].insert(&self.cursor, line);
                let column = self.cursor.column() + columns::columns(line);
                self.cursor.set_position(row, column);
            }
        }
        self.cursor.update_cursor_format(self.text);
        self.text.layout();
        emit_event(&TextEvent::TextInserted {
            start,
            end: self.current_position(),
            text: s.to_string(),
        });
    }

    /// Break the line at the caret.
    fn split_line(&mut self) {
        let row = self.cursor.row();
        let blocks = self.text.blocks_mut();
        let rest = blocks[row].split(self.cursor.column(), &self.cursor);
        blocks.insert(row + 1, rest);
        self.cursor.set_position(row + 1, 0);
        self.cursor.update_cursor_format(self.text);
    }

    /// Delete forward, or the selection. Returns whether anything changed.
    ///
    /// At the end of a line the next line is joined on.
    pub fn delete_char(&mut self) -> bool {
        if self.cursor.has_selection() {
            return self.delete_selected_text();
        }
        let row = self.cursor.row();
        let column = self.cursor.column();
        let start = self.current_position();
        let cols = self.cursor.columns(self.text);
        if column >= cols && row + 1 >= self.text.rows() {
            return false;
        }
        let blocks = self.text.blocks_mut();
        let removed = if column < cols {
            blocks[row].remove(column, &self.cursor)
        } else {
            let next = blocks.remove(row + 1);
            blocks[row].append(next);
            "\n".to_string()
        };
        self.cursor.update_cursor_format(self.text);
        self.text.layout();
        emit_event(&TextEvent::TextRemoved {
            start,
            end: start + 1,
            text: removed,
        });
        true
    }

    /// Delete backward, or the selection. Returns whether anything changed.
    ///
    /// At column 0 the line is joined onto the previous one.
    pub fn backspace(&mut self) -> bool {
        if self.cursor.has_selection() {
            return self.delete_selected_text();
        }
        self.cursor
            .move_position(self.text, MoveOperation::Left, MoveMode::MoveAnchor, 1)
            && self.delete_char()
    }

    /// Remove the selected text. Returns false without a selection.
    pub fn delete_selected_text(&mut self) -> bool {
        if !self.cursor.has_selection() {
            return false;
        }
        let ((r1, c1), (r2, c2)) = self.cursor.selection_bounds();
        let range = self.cursor.selection_range(self.text);
        self.cursor.set_position(r1, c1);
        self.cursor.update_cursor_format(self.text);

        let blocks = self.text.blocks_mut();
        if r1 == r2 {
            blocks[r1].remove_range(c1, c2 - c1, &self.cursor);
        } else {
            blocks[r2].remove_range(0, c2, &self.cursor);
            let first_cols = blocks[r1].columns();
            blocks[r1].remove_range(c1, first_cols - c1, &self.cursor);
            let mut removed: Vec<TextBlock> = blocks.drain(r1 + 1..=r2).collect();
            if let Some(last) = removed.pop() {
                blocks[r1].append(last);
            }
        }
        self.cursor.update_cursor_format(self.text);
        self.text.layout();
        emit_event(&TextEvent::TextRemoved {
            start: range.start_position,
            end: range.end_position,
            text: range.text,
        });
        true
    }

    /// The selection as markup.
    #[must_use]
    pub fn copy(&self) -> String {
        self.selected_text(true)
    }

    /// Remove the selection, returning it as markup.
    pub fn cut(&mut self) -> String {
        let markup = self.copy();
        self.delete_selected_text();
        markup
    }

    /// Insert markup at the caret, keeping its formatting.
    ///
    /// Tags in `xml` apply on top of the caret format; the selection is
    /// replaced.
    pub fn paste(&mut self, xml: &str) {
        self.delete_selected_text();
        let mut format = self.cursor.format().clone();
        markup::scan(xml, &mut format, &mut PasteSink { session: self });
    }
}

struct PasteSink<'s, 'a> {
    session: &'s mut EditSession<'a>,
}

impl MarkupSink for PasteSink<'_, '_> {
    fn text(&mut self, text: &str, format: &CharFormat) {
        self.session.cursor.set_char_format(format.clone());
        self.session.insert_text(text);
    }

    fn line_break(&mut self, _format: &CharFormat) {
        self.session.insert_text("\n");
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        let position = self.current_position();
        self.cursor.end_edit();
        let xml = self.text.xml_text();
        if xml == self.start_xml {
            return;
        }
        emit_log(
            LogLevel::Info,
            &format!(
                "text edit committed ({} -> {} bytes of markup)",
                self.start_xml.len(),
                xml.len()
            ),
        );
        let old = std::mem::take(&mut self.start_xml);
        let change = PropertyChange::new(
            PropertyId::Text,
            PropertyValue::String(old),
            PropertyValue::String(xml),
        )
        .with_cursor_position(position);
        let log: &mut dyn UndoLog = match self.log.as_deref_mut() {
            Some(log) => log,
            None => &mut self.text.undo,
        };
        log.record(change);
        log.commit();
    }
}
