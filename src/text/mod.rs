//! Styled multi-line text with cursor editing.
//!
//! Key types:
//!
//! - [`TextFragment`]: a run of characters in one [`CharFormat`]
//! - [`TextBlock`]: one line, an ordered list of fragments kept simplified
//! - [`TextCursor`]: caret and selection over the lines of a text
//! - [`TextBase`]: the owning text item, with properties and undo history
//! - [`EditSession`]: an active edit, committed on drop
//!
//! # Examples
//!
//! ```
//! use scoretext::{MoveMode, MoveOperation, TextBase};
//!
//! let mut text = TextBase::from_xml("<b>Presto</b>");
//! {
//!     let mut edit = text.edit();
//!     edit.move_position(MoveOperation::StartOfLine, MoveMode::MoveAnchor, 1);
//!     edit.insert_text("Più ");
//! }
//! assert_eq!(text.plain_text(), "Più Presto");
//! assert_eq!(text.xml_text(), "<b>Più Presto</b>");
//! ```
//!
//! [`CharFormat`]: crate::CharFormat

mod block;
mod cursor;
mod fragment;
mod item;
pub mod layout;

pub use block::TextBlock;
pub use cursor::{MoveMode, MoveOperation, SelectTextType, TextCursor, TextRange};
pub use fragment::TextFragment;
pub use item::{EditSession, TextBase};
pub use layout::{ApproximateMetrics, FontMetrics, LayoutContext};
