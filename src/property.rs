//! Property identifiers and values for the text item's property surface.
//!
//! Every mutation recorded in the undo log is keyed by a [`PropertyId`] and
//! carries the old and new [`PropertyValue`].

use crate::error::{Error, Result};
use crate::format::FontStyle;

/// Stable identifier of a text item property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PropertyId {
    /// The markup text.
    Text,
    FontStyle,
    FontFace,
    FontSize,
    Align,
    FrameType,
    FrameWidth,
    FramePadding,
    FrameRound,
    LineSpacing,
}

/// Horizontal alignment of the text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignH {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical alignment of the text block relative to its anchor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AlignV {
    #[default]
    Top,
    Center,
    Baseline,
    Bottom,
}

/// Combined alignment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Align {
    pub horizontal: AlignH,
    pub vertical: AlignV,
}

impl Align {
    #[must_use]
    pub const fn new(horizontal: AlignH, vertical: AlignV) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

/// Frame decoration drawn around the text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrameType {
    #[default]
    NoFrame,
    Square,
    Circle,
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Double(f64),
    String(String),
    FontStyle(FontStyle),
    Align(Align),
    FrameType(FrameType),
}

impl PropertyValue {
    pub(crate) fn to_text(&self, id: PropertyId) -> Result<&str> {
        match self {
            Self::String(s) => Ok(s),
            _ => Err(type_error(id, "string")),
        }
    }

    pub(crate) fn to_f64(&self, id: PropertyId) -> Result<f64> {
        match self {
            Self::Double(v) => Ok(*v),
            Self::Int(v) => Ok(f64::from(*v)),
            _ => Err(type_error(id, "number")),
        }
    }

    pub(crate) fn to_i32(&self, id: PropertyId) -> Result<i32> {
        match self {
            Self::Int(v) => Ok(*v),
            _ => Err(type_error(id, "integer")),
        }
    }

    pub(crate) fn to_font_style(&self, id: PropertyId) -> Result<FontStyle> {
        match self {
            Self::FontStyle(s) => Ok(*s),
            _ => Err(type_error(id, "font style")),
        }
    }

    pub(crate) fn to_align(&self, id: PropertyId) -> Result<Align> {
        match self {
            Self::Align(a) => Ok(*a),
            _ => Err(type_error(id, "alignment")),
        }
    }

    pub(crate) fn to_frame_type(&self, id: PropertyId) -> Result<FrameType> {
        match self {
            Self::FrameType(f) => Ok(*f),
            _ => Err(type_error(id, "frame type")),
        }
    }
}

fn type_error(property: PropertyId, expected: &'static str) -> Error {
    Error::PropertyType { property, expected }
}
