//! Character formats for styled runs.
//!
//! This module provides the per-run style value types:
//!
//! - [`FontStyle`]: Bitflags for bold, italic, underline and strike
//! - [`CharFormat`]: Complete run format including vertical alignment,
//!   font size and font family
//! - [`FormatId`] / [`FormatValue`]: Generic attribute-keyed access used by
//!   editing commands and the property surface
//! - [`SelectionFormat`]: The format shared by a selection, with mixed
//!   attributes reported as unset
//!
//! # Examples
//!
//! ```
//! use scoretext::{CharFormat, FormatId, FormatValue};
//!
//! let mut format = CharFormat::default().with_bold();
//! assert!(format.bold());
//!
//! format.set_format_value(FormatId::FontSize, &FormatValue::Double(9.5));
//! assert_eq!(format.font_size(), 9.5);
//! assert_eq!(format.format_value(FormatId::Italic), FormatValue::Bool(false));
//! ```

use bitflags::bitflags;

bitflags! {
    /// Font style flags (bold, italic, underline, strike).
    ///
    /// Flags combine with bitwise OR; a run's style is a single value of
    /// this type.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontStyle: u8 {
        /// Bold weight.
        const BOLD      = 0x01;
        /// Italic slant.
        const ITALIC    = 0x02;
        /// Underlined text.
        const UNDERLINE = 0x04;
        /// Struck-through text.
        const STRIKE    = 0x08;
    }
}

/// Vertical placement of a run relative to the baseline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    #[default]
    Normal,
    Superscript,
    Subscript,
}

/// Attribute tag for generic format access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatId {
    Bold,
    Italic,
    Underline,
    Strike,
    Valign,
    FontSize,
    FontFamily,
}

impl FormatId {
    /// All attribute tags, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Bold,
        Self::Italic,
        Self::Underline,
        Self::Strike,
        Self::Valign,
        Self::FontSize,
        Self::FontFamily,
    ];

    /// The style flag this tag addresses, if it is one of the flag tags.
    #[must_use]
    pub const fn style_flag(self) -> Option<FontStyle> {
        match self {
            Self::Bold => Some(FontStyle::BOLD),
            Self::Italic => Some(FontStyle::ITALIC),
            Self::Underline => Some(FontStyle::UNDERLINE),
            Self::Strike => Some(FontStyle::STRIKE),
            Self::Valign | Self::FontSize | Self::FontFamily => None,
        }
    }
}

/// A tagged attribute value.
///
/// `Unset` means "inherit" when read and "not specified" when a selection
/// disagrees on the attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormatValue {
    #[default]
    Unset,
    Bool(bool),
    Valign(VerticalAlignment),
    Double(f64),
    String(String),
}

impl FormatValue {
    /// Boolean payload, if any.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Numeric payload, if any.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(v) => Some(*v),
            _ => None,
        }
    }

    /// String payload, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check for the unset value.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Format of a run of characters.
///
/// Equality is structural. An empty font family means "use the owning
/// text item's default family".
#[derive(Clone, Debug, PartialEq)]
pub struct CharFormat {
    style: FontStyle,
    valign: VerticalAlignment,
    font_size: f64,
    font_family: String,
}

impl Default for CharFormat {
    fn default() -> Self {
        Self {
            style: FontStyle::empty(),
            valign: VerticalAlignment::Normal,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_family: String::new(),
        }
    }
}

impl CharFormat {
    /// Font size used when nothing else is specified.
    pub const DEFAULT_FONT_SIZE: f64 = 12.0;

    /// Create a format with all defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a format from its parts.
    #[must_use]
    pub fn with_parts(
        style: FontStyle,
        valign: VerticalAlignment,
        font_size: f64,
        font_family: impl Into<String>,
    ) -> Self {
        Self {
            style,
            valign,
            font_size,
            font_family: font_family.into(),
        }
    }

    #[must_use]
    pub const fn style(&self) -> FontStyle {
        self.style
    }

    pub fn set_style(&mut self, style: FontStyle) {
        self.style = style;
    }

    #[must_use]
    pub const fn bold(&self) -> bool {
        self.style.contains(FontStyle::BOLD)
    }

    #[must_use]
    pub const fn italic(&self) -> bool {
        self.style.contains(FontStyle::ITALIC)
    }

    #[must_use]
    pub const fn underline(&self) -> bool {
        self.style.contains(FontStyle::UNDERLINE)
    }

    #[must_use]
    pub const fn strike(&self) -> bool {
        self.style.contains(FontStyle::STRIKE)
    }

    pub fn set_bold(&mut self, on: bool) {
        self.style.set(FontStyle::BOLD, on);
    }

    pub fn set_italic(&mut self, on: bool) {
        self.style.set(FontStyle::ITALIC, on);
    }

    pub fn set_underline(&mut self, on: bool) {
        self.style.set(FontStyle::UNDERLINE, on);
    }

    pub fn set_strike(&mut self, on: bool) {
        self.style.set(FontStyle::STRIKE, on);
    }

    #[must_use]
    pub const fn valign(&self) -> VerticalAlignment {
        self.valign
    }

    pub fn set_valign(&mut self, valign: VerticalAlignment) {
        self.valign = valign;
    }

    #[must_use]
    pub const fn font_size(&self) -> f64 {
        self.font_size
    }

    /// Set the font size. Non-finite or non-positive sizes are ignored.
    pub fn set_font_size(&mut self, size: f64) {
        if size.is_finite() && size > 0.0 {
            self.font_size = size;
        }
    }

    #[must_use]
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    /// Return a copy with the bold flag set.
    #[must_use]
    pub fn with_bold(mut self) -> Self {
        self.set_bold(true);
        self
    }

    /// Return a copy with the italic flag set.
    #[must_use]
    pub fn with_italic(mut self) -> Self {
        self.set_italic(true);
        self
    }

    /// Return a copy with the underline flag set.
    #[must_use]
    pub fn with_underline(mut self) -> Self {
        self.set_underline(true);
        self
    }

    /// Return a copy with the given vertical alignment.
    #[must_use]
    pub fn with_valign(mut self, valign: VerticalAlignment) -> Self {
        self.valign = valign;
        self
    }

    /// Return a copy with the given font size.
    #[must_use]
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.set_font_size(size);
        self
    }

    /// Return a copy with the given font family.
    #[must_use]
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    /// Read one attribute.
    ///
    /// An empty font family reads as [`FormatValue::Unset`].
    #[must_use]
    pub fn format_value(&self, id: FormatId) -> FormatValue {
        if let Some(flag) = id.style_flag() {
            return FormatValue::Bool(self.style.contains(flag));
        }
        match id {
            FormatId::Valign => FormatValue::Valign(self.valign),
            FormatId::FontSize => FormatValue::Double(self.font_size),
            FormatId::FontFamily if self.font_family.is_empty() => FormatValue::Unset,
            FormatId::FontFamily => FormatValue::String(self.font_family.clone()),
            _ => FormatValue::Unset,
        }
    }

    /// Write one attribute.
    ///
    /// A value of the wrong kind for `id` is a no-op. Writing
    /// [`FormatValue::Unset`] to the font family resets it to "inherit".
    pub fn set_format_value(&mut self, id: FormatId, value: &FormatValue) {
        if let (Some(flag), FormatValue::Bool(on)) = (id.style_flag(), value) {
            self.style.set(flag, *on);
            return;
        }
        match (id, value) {
            (FormatId::Valign, FormatValue::Valign(v)) => self.valign = *v,
            (FormatId::FontSize, FormatValue::Double(size)) => self.set_font_size(*size),
            (FormatId::FontFamily, FormatValue::String(family)) => {
                self.font_family.clone_from(family);
            }
            (FormatId::FontFamily, FormatValue::Unset) => self.font_family.clear(),
            _ => {}
        }
    }
}

/// The format shared by every character of a selection.
///
/// Each attribute is `Some` only if all covered characters agree on it;
/// `None` marks a mixed attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionFormat {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub strike: Option<bool>,
    pub valign: Option<VerticalAlignment>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
}

impl SelectionFormat {
    /// A selection format where every attribute agrees with `format`.
    #[must_use]
    pub fn from_format(format: &CharFormat) -> Self {
        Self {
            bold: Some(format.bold()),
            italic: Some(format.italic()),
            underline: Some(format.underline()),
            strike: Some(format.strike()),
            valign: Some(format.valign()),
            font_size: Some(format.font_size()),
            font_family: Some(format.font_family().to_string()),
        }
    }

    /// Fold another covered format in, unsetting attributes that differ.
    pub fn merge(&mut self, format: &CharFormat) {
        fn agree<T: PartialEq>(slot: &mut Option<T>, value: T) {
            if slot.as_ref().is_some_and(|v| *v != value) {
                *slot = None;
            }
        }
        agree(&mut self.bold, format.bold());
        agree(&mut self.italic, format.italic());
        agree(&mut self.underline, format.underline());
        agree(&mut self.strike, format.strike());
        agree(&mut self.valign, format.valign());
        agree(&mut self.font_size, format.font_size());
        agree(&mut self.font_family, format.font_family().to_string());
    }

    /// Read one attribute; mixed attributes read as [`FormatValue::Unset`].
    #[must_use]
    pub fn format_value(&self, id: FormatId) -> FormatValue {
        match id {
            FormatId::Bold => self.bold.map_or(FormatValue::Unset, FormatValue::Bool),
            FormatId::Italic => self.italic.map_or(FormatValue::Unset, FormatValue::Bool),
            FormatId::Underline => self.underline.map_or(FormatValue::Unset, FormatValue::Bool),
            FormatId::Strike => self.strike.map_or(FormatValue::Unset, FormatValue::Bool),
            FormatId::Valign => self.valign.map_or(FormatValue::Unset, FormatValue::Valign),
            FormatId::FontSize => self.font_size.map_or(FormatValue::Unset, FormatValue::Double),
            FormatId::FontFamily => self
                .font_family
                .as_ref()
                .map_or(FormatValue::Unset, |f| FormatValue::String(f.clone())),
        }
    }

    /// Check whether the covered characters disagree on `id`.
    #[must_use]
    pub fn is_mixed(&self, id: FormatId) -> bool {
        match id {
            FormatId::Bold => self.bold.is_none(),
            FormatId::Italic => self.italic.is_none(),
            FormatId::Underline => self.underline.is_none(),
            FormatId::Strike => self.strike.is_none(),
            FormatId::Valign => self.valign.is_none(),
            FormatId::FontSize => self.font_size.is_none(),
            FormatId::FontFamily => self.font_family.is_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_format() {
        let format = CharFormat::default();
        assert_eq!(format.style(), FontStyle::empty());
        assert_eq!(format.valign(), VerticalAlignment::Normal);
        assert_eq!(format.font_size(), 12.0);
        assert_eq!(format.font_family(), "");
    }

    #[test]
    fn test_flag_setters() {
        let mut format = CharFormat::new();
        format.set_bold(true);
        format.set_strike(true);
        assert!(format.bold());
        assert!(format.strike());
        assert!(!format.italic());

        format.set_bold(false);
        assert!(!format.bold());
        assert_eq!(format.style(), FontStyle::STRIKE);
    }

    #[test]
    fn test_format_value_roundtrip_by_id() {
        let mut format = CharFormat::new();
        format.set_format_value(FormatId::Italic, &FormatValue::Bool(true));
        format.set_format_value(
            FormatId::Valign,
            &FormatValue::Valign(VerticalAlignment::Subscript),
        );
        format.set_format_value(FormatId::FontFamily, &FormatValue::String("Edwin".into()));

        assert_eq!(format.format_value(FormatId::Italic), FormatValue::Bool(true));
        assert_eq!(
            format.format_value(FormatId::Valign),
            FormatValue::Valign(VerticalAlignment::Subscript)
        );
        assert_eq!(
            format.format_value(FormatId::FontFamily),
            FormatValue::String("Edwin".into())
        );
    }

    #[test]
    fn test_wrong_kind_is_noop() {
        let mut format = CharFormat::new();
        let before = format.clone();
        format.set_format_value(FormatId::Bold, &FormatValue::Double(1.0));
        format.set_format_value(FormatId::FontSize, &FormatValue::Bool(true));
        format.set_format_value(FormatId::Valign, &FormatValue::String("sup".into()));
        assert_eq!(format, before);
    }

    #[test]
    fn test_invalid_font_size_ignored() {
        let mut format = CharFormat::new();
        format.set_font_size(0.0);
        format.set_font_size(f64::NAN);
        format.set_font_size(-3.0);
        assert_eq!(format.font_size(), 12.0);
    }

    #[test]
    fn test_empty_family_reads_unset() {
        let mut format = CharFormat::new().with_font_family("FreeSerif");
        format.set_format_value(FormatId::FontFamily, &FormatValue::Unset);
        assert!(format.format_value(FormatId::FontFamily).is_unset());
    }

    #[test]
    fn test_selection_format_mixed() {
        let plain = CharFormat::new();
        let bold = CharFormat::new().with_bold();

        let mut sel = SelectionFormat::from_format(&bold);
        sel.merge(&plain);

        assert!(sel.is_mixed(FormatId::Bold));
        assert!(!sel.is_mixed(FormatId::Italic));
        assert_eq!(sel.format_value(FormatId::Bold), FormatValue::Unset);
        assert_eq!(sel.format_value(FormatId::FontSize), FormatValue::Double(12.0));
    }
}
