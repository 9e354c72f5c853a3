//! Text style configuration.
//!
//! A [`TextStyle`] holds the item-level properties a text starts out with:
//! the base character format markup is read and written against, plus
//! alignment, frame decoration and line spacing. [`TextBase`] keeps one
//! copy as its defaults and one as its current values.
//!
//! # Examples
//!
//! ```
//! use scoretext::{FontStyle, FrameType, TextStyle};
//!
//! let style = TextStyle::default()
//!     .with_font_family("Edwin")
//!     .with_font_size(14.0)
//!     .with_font_style(FontStyle::BOLD)
//!     .with_frame_type(FrameType::Circle);
//! assert!(style.base_format().bold());
//! ```
//!
//! [`TextBase`]: crate::TextBase

use crate::error::{Error, Result};
use crate::format::{CharFormat, FontStyle, VerticalAlignment};
use crate::property::{Align, FrameType, PropertyId, PropertyValue};

/// Item-level text properties.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Base font family. Empty means the renderer's default face.
    pub font_family: String,
    /// Base font size in points.
    pub font_size: f64,
    pub font_style: FontStyle,
    pub align: Align,
    pub frame_type: FrameType,
    /// Frame line width in spatium units.
    pub frame_width: f64,
    /// Distance between text and frame in spatium units.
    pub padding_width: f64,
    /// Corner radius of a square frame.
    pub frame_round: i32,
    /// Multiplier on each line's natural spacing.
    pub line_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: String::new(),
            font_size: CharFormat::DEFAULT_FONT_SIZE,
            font_style: FontStyle::empty(),
            align: Align::default(),
            frame_type: FrameType::NoFrame,
            frame_width: 0.1,
            padding_width: 0.2,
            frame_round: 0,
            line_spacing: 1.0,
        }
    }
}

impl TextStyle {
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    #[must_use]
    pub fn with_font_style(mut self, style: FontStyle) -> Self {
        self.font_style = style;
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn with_frame_type(mut self, frame_type: FrameType) -> Self {
        self.frame_type = frame_type;
        self
    }

    #[must_use]
    pub fn with_frame_width(mut self, width: f64) -> Self {
        self.frame_width = width;
        self
    }

    #[must_use]
    pub fn with_padding_width(mut self, width: f64) -> Self {
        self.padding_width = width;
        self
    }

    #[must_use]
    pub fn with_frame_round(mut self, round: i32) -> Self {
        self.frame_round = round;
        self
    }

    #[must_use]
    pub fn with_line_spacing(mut self, spacing: f64) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// The format unmarked text is in.
    #[must_use]
    pub fn base_format(&self) -> CharFormat {
        CharFormat::with_parts(
            self.font_style,
            VerticalAlignment::Normal,
            self.font_size,
            self.font_family.clone(),
        )
    }

    /// Value of a style property; `None` for [`PropertyId::Text`].
    #[must_use]
    pub fn value(&self, id: PropertyId) -> Option<PropertyValue> {
        Some(match id {
            PropertyId::Text => return None,
            PropertyId::FontStyle => PropertyValue::FontStyle(self.font_style),
            PropertyId::FontFace => PropertyValue::String(self.font_family.clone()),
            PropertyId::FontSize => PropertyValue::Double(self.font_size),
            PropertyId::Align => PropertyValue::Align(self.align),
            PropertyId::FrameType => PropertyValue::FrameType(self.frame_type),
            PropertyId::FrameWidth => PropertyValue::Double(self.frame_width),
            PropertyId::FramePadding => PropertyValue::Double(self.padding_width),
            PropertyId::FrameRound => PropertyValue::Int(self.frame_round),
            PropertyId::LineSpacing => PropertyValue::Double(self.line_spacing),
        })
    }

    /// Write a style property.
    ///
    /// Returns `Ok(false)` for [`PropertyId::Text`], which is not part of
    /// a style. Values are type- and range-checked before anything is
    /// written.
    pub fn set_value(&mut self, id: PropertyId, value: &PropertyValue) -> Result<bool> {
        match id {
            PropertyId::Text => return Ok(false),
            PropertyId::FontStyle => self.font_style = value.to_font_style(id)?,
            PropertyId::FontFace => self.font_family = value.to_text(id)?.to_string(),
            PropertyId::FontSize => {
                let size = value.to_f64(id)?;
                if !size.is_finite() || size <= 0.0 {
                    return Err(Error::InvalidFontSize(size));
                }
                self.font_size = size;
            }
            PropertyId::Align => self.align = value.to_align(id)?,
            PropertyId::FrameType => self.frame_type = value.to_frame_type(id)?,
            PropertyId::FrameWidth => self.frame_width = value.to_f64(id)?,
            PropertyId::FramePadding => self.padding_width = value.to_f64(id)?,
            PropertyId::FrameRound => self.frame_round = value.to_i32(id)?,
            PropertyId::LineSpacing => {
                let spacing = value.to_f64(id)?;
                if !spacing.is_finite() || spacing <= 0.0 {
                    return Err(Error::PropertyType {
                        property: id,
                        expected: "positive number",
                    });
                }
                self.line_spacing = spacing;
            }
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::{AlignH, AlignV};

    #[test]
    fn test_builder_and_base_format() {
        let style = TextStyle::default()
            .with_font_family("FreeSerif")
            .with_font_size(9.0)
            .with_font_style(FontStyle::ITALIC | FontStyle::UNDERLINE);
        let base = style.base_format();
        assert_eq!(base.font_family(), "FreeSerif");
        assert_eq!(base.font_size(), 9.0);
        assert!(base.italic());
        assert!(base.underline());
        assert!(!base.bold());
    }

    #[test]
    fn test_value_roundtrip() {
        let mut style = TextStyle::default();
        let align = Align::new(AlignH::Center, AlignV::Baseline);
        assert_eq!(
            style.set_value(PropertyId::Align, &PropertyValue::Align(align)),
            Ok(true)
        );
        assert_eq!(style.value(PropertyId::Align), Some(PropertyValue::Align(align)));
        assert_eq!(style.value(PropertyId::Text), None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut style = TextStyle::default();
        assert_eq!(
            style.set_value(PropertyId::FontSize, &PropertyValue::Double(0.0)),
            Err(Error::InvalidFontSize(0.0))
        );
        assert!(
            style
                .set_value(PropertyId::FrameRound, &PropertyValue::Double(1.5))
                .is_err()
        );
        assert!(
            style
                .set_value(PropertyId::LineSpacing, &PropertyValue::Double(-1.0))
                .is_err()
        );
        assert_eq!(style, TextStyle::default());
    }

    #[test]
    fn test_text_is_not_a_style_property() {
        let mut style = TextStyle::default();
        assert_eq!(
            style.set_value(PropertyId::Text, &PropertyValue::String("x".into())),
            Ok(false)
        );
    }
}
