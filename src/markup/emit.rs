//! Markup generation.

use super::escape::escape_into;
use crate::format::{CharFormat, VerticalAlignment};
use crate::text::TextBlock;
use std::fmt::Write;

/// Stack of open style tags.
///
/// Closing a tag that is not on top closes the tags above it first and
/// reopens them afterwards, so output is always well nested. Closing a
/// tag that was never opened (the base format already had it) writes a
/// bare closing tag.
#[derive(Debug, Default)]
struct TagNesting {
    open: Vec<&'static str>,
}

impl TagNesting {
    fn push(&mut self, out: &mut String, tag: &'static str) {
        let _ = write!(out, "<{tag}>");
        self.open.push(tag);
    }

    fn pop(&mut self, out: &mut String, tag: &'static str) {
        let Some(idx) = self.open.iter().rposition(|t| *t == tag) else {
            let _ = write!(out, "</{tag}>");
            return;
        };
        let above: Vec<_> = self.open.drain(idx + 1..).collect();
        for t in above.iter().rev() {
            let _ = write!(out, "</{t}>");
        }
        let _ = write!(out, "</{tag}>");
        self.open.pop();
        for t in above {
            self.push(out, t);
        }
    }

    fn toggle(&mut self, out: &mut String, tag: &'static str, on: bool) {
        if on {
            self.push(out, tag);
        } else {
            self.pop(out, tag);
        }
    }

    fn close_all(&mut self, out: &mut String) {
        while let Some(t) = self.open.pop() {
            let _ = write!(out, "</{t}>");
        }
    }
}

const fn valign_tag(valign: VerticalAlignment) -> Option<&'static str> {
    match valign {
        VerticalAlignment::Normal => None,
        VerticalAlignment::Superscript => Some("sup"),
        VerticalAlignment::Subscript => Some("sub"),
    }
}

fn write_font_size(out: &mut String, size: f64) {
    let _ = write!(out, "<font size=\"{size}\"/>");
}

fn write_font_face(out: &mut String, family: &str) {
    out.push_str("<font face=\"");
    escape_into(out, family);
    out.push_str("\"/>");
}

/// Generate markup for `blocks`, relative to the `base` format.
///
/// Tags are only written where a run's format departs from the format
/// before it; lines are separated by `\n`. Empty fragments produce no
/// output.
#[must_use]
pub fn emit(blocks: &[TextBlock], base: &CharFormat) -> String {
    let mut out = String::new();
    let mut nesting = TagNesting::default();
    let mut current = base.clone();

    for (row, block) in blocks.iter().enumerate() {
        if row > 0 {
            out.push('\n');
        }
        for f in block.fragments_without_empty() {
            let format = &f.format;
            for (tag, was, now) in [
                ("b", current.bold(), format.bold()),
                ("i", current.italic(), format.italic()),
                ("u", current.underline(), format.underline()),
                ("s", current.strike(), format.strike()),
            ] {
                if was != now {
                    nesting.toggle(&mut out, tag, now);
                }
            }
            if format.font_size() != current.font_size() {
                write_font_size(&mut out, format.font_size());
            }
            if format.font_family() != current.font_family() {
                write_font_face(&mut out, format.font_family());
            }
            if format.valign() != current.valign() {
                if let Some(tag) = valign_tag(current.valign()) {
                    nesting.pop(&mut out, tag);
                }
                if let Some(tag) = valign_tag(format.valign()) {
                    nesting.push(&mut out, tag);
                }
            }
            escape_into(&mut out, &f.text);
            current.clone_from(format);
        }
    }
    nesting.close_all(&mut out);
    out
}

/// Writer of self-contained runs for copying a selection.
///
/// Every run is wrapped in its own style tags. Font size is written for
/// the first run and font face for the first run that names one; after
/// that both only when they change.
#[derive(Debug, Default)]
pub(crate) struct RunTags {
    size: Option<f64>,
    family: Option<String>,
}

impl RunTags {
    pub(crate) fn write_run(&mut self, out: &mut String, text: &str, format: &CharFormat) {
        if self.size != Some(format.font_size()) {
            write_font_size(out, format.font_size());
            self.size = Some(format.font_size());
        }
        let family = format.font_family();
        if !family.is_empty() && self.family.as_deref() != Some(family) {
            write_font_face(out, family);
            self.family = Some(family.to_string());
        }

        let mut tags: Vec<&'static str> = Vec::new();
        for (tag, on) in [
            ("b", format.bold()),
            ("i", format.italic()),
            ("u", format.underline()),
            ("s", format.strike()),
        ] {
            if on {
                tags.push(tag);
            }
        }
        tags.extend(valign_tag(format.valign()));

        for tag in &tags {
            let _ = write!(out, "<{tag}>");
        }
        escape_into(out, text);
        for tag in tags.iter().rev() {
            let _ = write!(out, "</{tag}>");
        }
    }
}
