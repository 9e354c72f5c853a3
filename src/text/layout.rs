//! Font metrics and the context blocks are laid out against.
//!
//! Glyph shaping and painting belong to the host; the model only needs
//! advances and vertical extents to place runs, answer geometry queries
//! and hit-test pointer input.

use crate::format::{CharFormat, VerticalAlignment};
use crate::unicode::{WidthMethod, char_width};
use std::fmt;
use std::sync::Arc;

/// Scale applied to superscript and subscript runs.
pub const SUBSCRIPT_SIZE: f64 = 2.0 / 3.0;
/// Superscript baseline shift, as a fraction of the full-size ascent.
pub const SUPERSCRIPT_OFFSET: f64 = -0.5;
/// Subscript baseline shift, as a fraction of the full-size ascent.
pub const SUBSCRIPT_OFFSET: f64 = 0.22;

/// Measurement backend supplied by the renderer.
///
/// All values are in points for the given format. Formats passed in have
/// their font family resolved and superscript/subscript size applied.
pub trait FontMetrics: Send + Sync {
    /// Horizontal advance of `text`.
    fn advance(&self, text: &str, format: &CharFormat) -> f64;
    /// Distance from the baseline to the top of the tallest glyph.
    fn ascent(&self, format: &CharFormat) -> f64;
    /// Distance from the baseline to the bottom of the lowest glyph.
    fn descent(&self, format: &CharFormat) -> f64;
    /// Baseline-to-baseline distance.
    fn line_spacing(&self, format: &CharFormat) -> f64 {
        (self.ascent(format) + self.descent(format)) * 1.2
    }
}

/// Metrics estimated from Unicode display width.
///
/// Every cell is `advance_factor` em wide; wide characters take two cells
/// and combining marks none. Good enough for hit testing and tests when no
/// real font backend is attached.
#[derive(Clone, Copy, Debug)]
pub struct ApproximateMetrics {
    pub width_method: WidthMethod,
    pub advance_factor: f64,
    pub ascent_factor: f64,
    pub descent_factor: f64,
}

impl Default for ApproximateMetrics {
    fn default() -> Self {
        Self {
            width_method: WidthMethod::Narrow,
            advance_factor: 0.5,
            ascent_factor: 0.75,
            descent_factor: 0.25,
        }
    }
}

impl FontMetrics for ApproximateMetrics {
    fn advance(&self, text: &str, format: &CharFormat) -> f64 {
        let cells: usize = text.chars().map(|c| char_width(c, self.width_method)).sum();
        cells as f64 * format.font_size() * self.advance_factor
    }

    fn ascent(&self, format: &CharFormat) -> f64 {
        format.font_size() * self.ascent_factor
    }

    fn descent(&self, format: &CharFormat) -> f64 {
        format.font_size() * self.descent_factor
    }
}

/// Everything block layout and geometry queries need from the owning item.
#[derive(Clone)]
pub struct LayoutContext {
    pub metrics: Arc<dyn FontMetrics>,
    /// Format supplying the family for runs that inherit it.
    pub base: CharFormat,
    /// Multiplier applied to each line's natural spacing.
    pub line_spacing: f64,
}

impl fmt::Debug for LayoutContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutContext")
            .field("base", &self.base)
            .field("line_spacing", &self.line_spacing)
            .finish_non_exhaustive()
    }
}

impl Default for LayoutContext {
    fn default() -> Self {
        Self {
            metrics: Arc::new(ApproximateMetrics::default()),
            base: CharFormat::default(),
            line_spacing: 1.0,
        }
    }
}

impl LayoutContext {
    /// Format as drawn: inherited family filled in, script size applied.
    #[must_use]
    pub fn draw_format(&self, format: &CharFormat) -> CharFormat {
        let mut draw = format.clone();
        if draw.font_family().is_empty() {
            draw.set_font_family(self.base.font_family());
        }
        if format.valign() != VerticalAlignment::Normal {
            draw.set_font_size(format.font_size() * SUBSCRIPT_SIZE);
        }
        draw
    }

    /// Advance of `text` in `format`.
    #[must_use]
    pub fn advance(&self, text: &str, format: &CharFormat) -> f64 {
        self.metrics.advance(text, &self.draw_format(format))
    }

    /// Vertical shift of a run's baseline relative to the line baseline.
    #[must_use]
    pub fn baseline_shift(&self, format: &CharFormat) -> f64 {
        let mut full = format.clone();
        if full.font_family().is_empty() {
            full.set_font_family(self.base.font_family());
        }
        let ascent = self.metrics.ascent(&full);
        match format.valign() {
            VerticalAlignment::Normal => 0.0,
            VerticalAlignment::Superscript => ascent * SUPERSCRIPT_OFFSET,
            VerticalAlignment::Subscript => ascent * SUBSCRIPT_OFFSET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_advance() {
        let metrics = ApproximateMetrics::default();
        let format = CharFormat::default();
        assert_eq!(metrics.advance("abcd", &format), 24.0);
        assert_eq!(metrics.advance("漢", &format), 12.0);
        assert_eq!(metrics.ascent(&format), 9.0);
        assert_eq!(metrics.descent(&format), 3.0);
        assert!((metrics.line_spacing(&format) - 14.4).abs() < 1e-9);
    }

    #[test]
    fn test_draw_format_inherits_family_and_scales_scripts() {
        let ctx = LayoutContext {
            base: CharFormat::default().with_font_family("Edwin"),
            ..LayoutContext::default()
        };
        let sup = CharFormat::default()
            .with_font_size(9.0)
            .with_valign(VerticalAlignment::Superscript);
        let draw = ctx.draw_format(&sup);
        assert_eq!(draw.font_family(), "Edwin");
        assert!((draw.font_size() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_baseline_shift() {
        let ctx = LayoutContext::default();
        let normal = CharFormat::default();
        let sub = CharFormat::default().with_valign(VerticalAlignment::Subscript);
        let sup = CharFormat::default().with_valign(VerticalAlignment::Superscript);
        assert_eq!(ctx.baseline_shift(&normal), 0.0);
        assert!(ctx.baseline_shift(&sub) > 0.0);
        assert!(ctx.baseline_shift(&sup) < 0.0);
    }
}
