//! A run of characters sharing one format.

use crate::format::{CharFormat, FormatId, FormatValue};
use crate::geometry::PointF;
use crate::unicode::columns;

/// A contiguous run of text with a single [`CharFormat`].
///
/// `pos.x` is the draw offset within the line and is filled in by layout;
/// `pos.y` is only non-zero for superscript and subscript runs. The text
/// never contains a line break.
#[derive(Clone, Debug, Default)]
pub struct TextFragment {
    pub format: CharFormat,
    pub pos: PointF,
    pub text: String,
}

/// Fragments compare by content and format, not by layout position.
impl PartialEq for TextFragment {
    fn eq(&self, other: &Self) -> bool {
        self.format == other.format && self.text == other.text
    }
}

impl TextFragment {
    /// Create a fragment holding `text` in `format`.
    #[must_use]
    pub fn new(text: impl Into<String>, format: CharFormat) -> Self {
        let text = text.into();
        debug_assert!(!text.contains('\n'), "line break inside a fragment");
        Self {
            format,
            pos: PointF::default(),
            text,
        }
    }

    /// Create an empty fragment that only carries a format.
    #[must_use]
    pub fn empty(format: CharFormat) -> Self {
        Self::new(String::new(), format)
    }

    /// Number of characters in the run.
    #[must_use]
    pub fn columns(&self) -> usize {
        columns::columns(&self.text)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split the run at `column`.
    ///
    /// Truncates this fragment to `[0, column)` and returns a fragment with
    /// the same format holding the rest. The caller recomputes positions.
    /// `column` must lie strictly inside the run.
    #[must_use]
    pub fn split(&mut self, column: usize) -> Self {
        debug_assert!(
            column > 0 && column < self.columns(),
            "split column {column} not inside fragment of {} columns",
            self.columns()
        );
        let rest = columns::split_off(&mut self.text, column);
        Self {
            format: self.format.clone(),
            pos: PointF::default(),
            text: rest,
        }
    }

    /// Apply one format attribute to the whole run.
    pub fn change_format(&mut self, id: FormatId, value: &FormatValue) {
        self.format.set_format_value(id, value);
    }
}
