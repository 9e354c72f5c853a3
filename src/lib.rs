//! `scoretext` - Rich text model for score annotations
//!
//! Short, richly formatted multi-line texts (titles, lyrics, tempo marks,
//! frame text) as lines of styled runs, with cursor-based editing,
//! selection formatting, undo, and conversion to and from a small markup
//! dialect.

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Column counts feed float layout math
#![allow(clippy::module_name_repetitions)] // Allow TextBlock in text etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::format_push_string)] // format! with push_str is fine
#![allow(clippy::needless_pass_by_value)] // Allow pass by value for small Copy types
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Formats compare sizes exactly
#![allow(clippy::should_implement_trait)] // Frame::drop is a drop-target operation
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::semicolon_if_nothing_returned)] // Style preference
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod config;
pub mod error;
pub mod event;
pub mod format;
pub mod frame;
pub mod geometry;
pub mod markup;
pub mod property;
pub mod text;
pub mod undo;
pub mod unicode;

// Re-export core types at crate root
pub use config::TextStyle;
pub use error::{Error, Result};
pub use event::{
    LogLevel, TextEvent, clear_event_callback, emit_event, emit_log, set_event_callback,
    set_log_callback,
};
pub use format::{CharFormat, FontStyle, FormatId, FormatValue, SelectionFormat, VerticalAlignment};
pub use geometry::{PointF, RectF};
pub use property::{Align, AlignH, AlignV, FrameType, PropertyId, PropertyValue};
pub use undo::{PropertyChange, UndoLog, UndoStack};

// Re-export text model types
pub use text::{
    ApproximateMetrics, EditSession, FontMetrics, LayoutContext, MoveMode, MoveOperation,
    SelectTextType, TextBase, TextBlock, TextCursor, TextFragment, TextRange,
};

// Re-export frame types
pub use frame::{
    BreakKind, DropOutcome, DropPayload, DropRequest, Frame, FrameElement, FrameKind, InsertAction,
    InsertTarget,
};

pub use unicode::WidthMethod;
