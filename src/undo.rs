//! Property-change undo log.
//!
//! Every committed mutation of a text item is recorded as a
//! [`PropertyChange`]: the property identifier plus the old and new value.
//! Changes made together (one edit session, one property write) form a
//! group that undo and redo replay as a unit.

use crate::property::{PropertyId, PropertyValue};

/// One recorded property change.
///
/// Text changes made in an edit session also carry the linear caret
/// position at commit, so undo can put the caret back.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyChange {
    pub id: PropertyId,
    pub old: PropertyValue,
    pub new: PropertyValue,
    pub cursor_position: Option<usize>,
}

impl PropertyChange {
    #[must_use]
    pub fn new(id: PropertyId, old: PropertyValue, new: PropertyValue) -> Self {
        Self {
            id,
            old,
            new,
            cursor_position: None,
        }
    }

    #[must_use]
    pub fn with_cursor_position(mut self, position: usize) -> Self {
        self.cursor_position = Some(position);
        self
    }

    /// The change that reverts this one.
    #[must_use]
    pub fn invert(&self) -> Self {
        Self {
            id: self.id,
            old: self.new.clone(),
            new: self.old.clone(),
            cursor_position: self.cursor_position,
        }
    }
}

/// Receiver of committed property changes.
///
/// [`UndoStack`] is the in-memory implementation; a host document can
/// supply its own transaction log instead.
pub trait UndoLog {
    /// Add a change to the open group.
    fn record(&mut self, change: PropertyChange);
    /// Close the open group.
    fn commit(&mut self);
}

/// Default maximum number of undo groups to retain.
const DEFAULT_MAX_HISTORY_DEPTH: usize = 1000;

/// Grouped undo/redo history with bounded memory usage.
#[derive(Clone, Debug)]
pub struct UndoStack {
    undo_stack: Vec<Vec<PropertyChange>>,
    redo_stack: Vec<Vec<PropertyChange>>,
    current_group: Vec<PropertyChange>,
    /// Maximum number of undo groups to retain. Oldest entries are dropped when exceeded.
    max_depth: usize,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            current_group: Vec::new(),
            max_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl UndoStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history with a custom maximum depth.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
    }

    /// Record a change into the open group. Clears the redo stack.
    pub fn record(&mut self, change: PropertyChange) {
        if change.old == change.new {
            return;
        }
        self.current_group.push(change);
        self.redo_stack.clear();
    }

    /// Close the open group.
    pub fn commit(&mut self) {
        if !self.current_group.is_empty() {
            self.undo_stack
                .push(std::mem::take(&mut self.current_group));
            if self.undo_stack.len() > self.max_depth {
                let excess = self.undo_stack.len() - self.max_depth;
                self.undo_stack.drain(..excess);
            }
        }
    }

    pub(crate) fn pop_undo(&mut self) -> Option<Vec<PropertyChange>> {
        self.commit();
        self.undo_stack.pop()
    }

    pub(crate) fn push_redo(&mut self, changes: Vec<PropertyChange>) {
        self.redo_stack.push(changes);
    }

    pub(crate) fn pop_redo(&mut self) -> Option<Vec<PropertyChange>> {
        self.redo_stack.pop()
    }

    pub(crate) fn push_undo(&mut self, changes: Vec<PropertyChange>) {
        self.undo_stack.push(changes);
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty() || !self.current_group.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Committed groups, oldest first.
    #[must_use]
    pub fn groups(&self) -> &[Vec<PropertyChange>] {
        &self.undo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_group.clear();
    }
}

impl UndoLog for UndoStack {
    fn record(&mut self, change: PropertyChange) {
        UndoStack::record(self, change);
    }

    fn commit(&mut self) {
        UndoStack::commit(self);
    }
}
