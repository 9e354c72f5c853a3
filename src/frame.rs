//! Page-level frames and what can be dropped onto them.
//!
//! Frames are the containers text lives in between systems of a score.
//! The frame kinds form a closed set; which payloads a kind accepts is a
//! fixed table:
//!
//! | payload                  | horizontal | vertical | text | fret |
//! |--------------------------|:----------:|:--------:|:----:|:----:|
//! | layout break             | yes        | yes      | yes  | yes  |
//! | text, staff text         | yes        | yes      | yes  | yes  |
//! | image, symbol            | yes        | yes      | yes  | yes  |
//! | frame/measure insert     | yes        | yes      | yes  | yes  |
//! | bar line                 | yes        |          |      |      |
//! | fret diagram             |            |          |      | yes  |
//!
//! Payloads attached to a staff are never accepted. A fret frame accepts
//! the drops in its column but only keeps fret diagrams as children; other
//! child elements are refused when they are added.
//!
//! A frame carries at most one line or page break, and independently of
//! it a section break.

use crate::config::TextStyle;
use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};
use crate::property::{PropertyId, PropertyValue};
use crate::text::TextBase;

/// Kind of frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Horizontal,
    Vertical,
    /// A vertical frame owning one text.
    Text,
    /// A vertical frame holding fret diagrams.
    Fret,
}

/// Kind of layout break.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BreakKind {
    Line,
    Page,
    Section,
}

/// Palette actions that insert something before the target frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertAction {
    VerticalFrame,
    TextFrame,
    FretFrame,
    HorizontalFrame,
    Measure,
    /// Any other palette action; never accepted by frames.
    Other,
}

/// What a drop asks the host to insert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InsertTarget {
    Frame(FrameKind),
    Measure,
}

/// Something dragged onto a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum DropPayload {
    LayoutBreak(BreakKind),
    /// Free text, as markup.
    Text(String),
    /// Staff text, as markup.
    StaffText(String),
    Image(String),
    Symbol(String),
    Action(InsertAction),
    BarLine,
    FretDiagram,
}

/// A drop request.
#[derive(Clone, Debug, PartialEq)]
pub struct DropRequest {
    pub payload: DropPayload,
    /// The dragged element is attached to a staff.
    pub on_staff: bool,
}

impl DropRequest {
    #[must_use]
    pub fn new(payload: DropPayload) -> Self {
        Self {
            payload,
            on_staff: false,
        }
    }

    #[must_use]
    pub fn on_staff(mut self) -> Self {
        self.on_staff = true;
        self
    }
}

/// Child element held by a frame.
#[derive(Clone, Debug)]
pub enum FrameElement {
    Text(TextBase),
    Image(String),
    Symbol(String),
    BarLine,
    FretDiagram,
}

/// Result of [`Frame::drop`].
#[derive(Clone, Debug, PartialEq)]
pub enum DropOutcome {
    /// The frame does not accept the payload.
    Rejected,
    /// Accepted, but the frame already had that state.
    Unchanged,
    BreakAdded(BreakKind),
    BreakReplaced { old: BreakKind, new: BreakKind },
    /// The frame's own text took the dropped markup.
    TextReplaced,
    /// A child element was added at this index.
    ElementAdded(usize),
    /// The host should insert a frame or measure before this frame.
    InsertRequested(InsertTarget),
}

/// A frame between systems.
#[derive(Clone, Debug)]
pub struct Frame {
    kind: FrameKind,
    /// Line or page break.
    layout_break: Option<BreakKind>,
    section_break: bool,
    text: Option<TextBase>,
    text_style: TextStyle,
    elements: Vec<FrameElement>,
}

impl Frame {
    #[must_use]
    pub fn new(kind: FrameKind) -> Self {
        Self::with_text_style(kind, TextStyle::default())
    }

    /// A frame whose texts are created in `style`.
    #[must_use]
    pub fn with_text_style(kind: FrameKind, style: TextStyle) -> Self {
        let text = (kind == FrameKind::Text).then(|| TextBase::with_style(style.clone()));
        Self {
            kind,
            layout_break: None,
            section_break: false,
            text,
            text_style: style,
            elements: Vec::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> FrameKind {
        self.kind
    }

    /// The line or page break, if any.
    #[must_use]
    pub fn layout_break(&self) -> Option<BreakKind> {
        self.layout_break
    }

    #[must_use]
    pub fn section_break(&self) -> bool {
        self.section_break
    }

    /// Whether the frame ends with a break of `kind`.
    #[must_use]
    pub fn has_break(&self, kind: BreakKind) -> bool {
        match kind {
            BreakKind::Section => self.section_break,
            BreakKind::Line | BreakKind::Page => self.layout_break == Some(kind),
        }
    }

    /// The frame's own text; only text frames have one.
    #[must_use]
    pub fn text(&self) -> Option<&TextBase> {
        self.text.as_ref()
    }

    pub fn text_mut(&mut self) -> Option<&mut TextBase> {
        self.text.as_mut()
    }

    #[must_use]
    pub fn elements(&self) -> &[FrameElement] {
        &self.elements
    }

    /// Write a property of the frame's own text, recorded for undo.
    pub fn set_text_property(&mut self, id: PropertyId, value: &PropertyValue) -> Result<()> {
        match self.text.as_mut() {
            Some(text) => text.undo_change_property(id, value),
            None => Err(Error::ReadOnlyProperty(id)),
        }
    }

    /// Whether `request` may be dropped here.
    #[must_use]
    pub fn accept_drop(&self, request: &DropRequest) -> bool {
        if request.on_staff {
            return false;
        }
        match &request.payload {
            DropPayload::LayoutBreak(_)
            | DropPayload::Text(_)
            | DropPayload::StaffText(_)
            | DropPayload::Image(_)
            | DropPayload::Symbol(_) => true,
            DropPayload::Action(action) => *action != InsertAction::Other,
            DropPayload::BarLine => self.kind == FrameKind::Horizontal,
            DropPayload::FretDiagram => self.kind == FrameKind::Fret,
        }
    }

    /// Apply a drop.
    ///
    /// Dropping a break the frame already has is a no-op reported as
    /// [`DropOutcome::Unchanged`]. A line break replaces a page break and
    /// the other way round; a section break is kept alongside either.
    pub fn drop(&mut self, request: DropRequest) -> Result<DropOutcome> {
        if !self.accept_drop(&request) {
            emit_log(
                LogLevel::Debug,
                &format!("{:?} frame rejected drop of {:?}", self.kind, request.payload),
            );
            return Ok(DropOutcome::Rejected);
        }
        let outcome = match request.payload {
            DropPayload::LayoutBreak(BreakKind::Section) => {
                if self.section_break {
                    DropOutcome::Unchanged
                } else {
                    self.section_break = true;
                    DropOutcome::BreakAdded(BreakKind::Section)
                }
            }
            DropPayload::LayoutBreak(new) => match self.layout_break.replace(new) {
                None => DropOutcome::BreakAdded(new),
                Some(old) if old == new => DropOutcome::Unchanged,
                Some(old) => DropOutcome::BreakReplaced { old, new },
            },
            DropPayload::Text(xml) => match self.text.as_mut() {
                Some(text) => {
                    text.undo_change_property(PropertyId::Text, &PropertyValue::String(xml))?;
                    DropOutcome::TextReplaced
                }
                None => self.add_text(&xml),
            },
            DropPayload::StaffText(xml) => self.add_text(&xml),
            DropPayload::Image(path) => self.add(FrameElement::Image(path)),
            DropPayload::Symbol(name) => self.add(FrameElement::Symbol(name)),
            DropPayload::BarLine => self.add(FrameElement::BarLine),
            DropPayload::FretDiagram => self.add(FrameElement::FretDiagram),
            DropPayload::Action(action) => DropOutcome::InsertRequested(match action {
                InsertAction::VerticalFrame => InsertTarget::Frame(FrameKind::Vertical),
                InsertAction::TextFrame => InsertTarget::Frame(FrameKind::Text),
                InsertAction::FretFrame => InsertTarget::Frame(FrameKind::Fret),
                InsertAction::HorizontalFrame => InsertTarget::Frame(FrameKind::Horizontal),
                InsertAction::Measure | InsertAction::Other => InsertTarget::Measure,
            }),
        };
        Ok(outcome)
    }

    fn add_text(&mut self, xml: &str) -> DropOutcome {
        let mut text = TextBase::with_style(self.text_style.clone());
        text.set_xml_text(xml);
        self.add(FrameElement::Text(text))
    }

    fn add(&mut self, element: FrameElement) -> DropOutcome {
        if self.kind == FrameKind::Fret && !matches!(element, FrameElement::FretDiagram) {
            emit_log(LogLevel::Debug, "fret frame refused a non fret diagram child");
            return DropOutcome::Rejected;
        }
        self.elements.push(element);
        DropOutcome::ElementAdded(self.elements.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [FrameKind; 4] = [
        FrameKind::Horizontal,
        FrameKind::Vertical,
        FrameKind::Text,
        FrameKind::Fret,
    ];

    #[test]
    fn test_accept_table() {
        for kind in ALL_KINDS {
            let frame = Frame::new(kind);
            let accepts = |p: DropPayload| frame.accept_drop(&DropRequest::new(p));
            assert!(accepts(DropPayload::LayoutBreak(BreakKind::Page)));
            assert!(accepts(DropPayload::Text("x".into())));
            assert!(accepts(DropPayload::StaffText("x".into())));
            assert!(accepts(DropPayload::Image("logo.png".into())));
            assert!(accepts(DropPayload::Symbol("segno".into())));
            assert!(accepts(DropPayload::Action(InsertAction::Measure)));
            assert!(!accepts(DropPayload::Action(InsertAction::Other)));
            assert_eq!(accepts(DropPayload::BarLine), kind == FrameKind::Horizontal);
            assert_eq!(accepts(DropPayload::FretDiagram), kind == FrameKind::Fret);
        }
    }

    #[test]
    fn test_on_staff_payload_rejected() {
        let mut frame = Frame::new(FrameKind::Vertical);
        let request = DropRequest::new(DropPayload::Symbol("coda".into())).on_staff();
        assert!(!frame.accept_drop(&request));
        assert_eq!(frame.drop(request), Ok(DropOutcome::Rejected));
        assert!(frame.elements().is_empty());
    }

    #[test]
    fn test_layout_breaks() {
        let mut frame = Frame::new(FrameKind::Vertical);
        let drop_break = |frame: &mut Frame, kind| {
            frame
                .drop(DropRequest::new(DropPayload::LayoutBreak(kind)))
                .unwrap()
        };
        assert_eq!(
            drop_break(&mut frame, BreakKind::Line),
            DropOutcome::BreakAdded(BreakKind::Line)
        );
        assert_eq!(drop_break(&mut frame, BreakKind::Line), DropOutcome::Unchanged);
        assert_eq!(
            drop_break(&mut frame, BreakKind::Page),
            DropOutcome::BreakReplaced {
                old: BreakKind::Line,
                new: BreakKind::Page
            }
        );
        assert_eq!(frame.layout_break(), Some(BreakKind::Page));
    }

    #[test]
    fn test_section_break_coexists_with_line_break() {
        let mut frame = Frame::new(FrameKind::Vertical);
        let section = DropRequest::new(DropPayload::LayoutBreak(BreakKind::Section));
        let line = DropRequest::new(DropPayload::LayoutBreak(BreakKind::Line));

        assert_eq!(
            frame.drop(section.clone()),
            Ok(DropOutcome::BreakAdded(BreakKind::Section))
        );
        assert_eq!(
            frame.drop(line.clone()),
            Ok(DropOutcome::BreakAdded(BreakKind::Line))
        );
        assert!(frame.has_break(BreakKind::Section));
        assert!(frame.has_break(BreakKind::Line));
        assert!(!frame.has_break(BreakKind::Page));

        assert_eq!(frame.drop(section), Ok(DropOutcome::Unchanged));
        assert_eq!(frame.drop(line), Ok(DropOutcome::Unchanged));
        assert!(frame.section_break());
    }

    #[test]
    fn test_fret_frame_keeps_only_fret_diagrams() {
        let mut frame = Frame::new(FrameKind::Fret);
        for payload in [
            DropPayload::Text("Am".into()),
            DropPayload::StaffText("capo 2".into()),
            DropPayload::Image("chart.png".into()),
            DropPayload::Symbol("segno".into()),
        ] {
            let request = DropRequest::new(payload);
            assert!(frame.accept_drop(&request));
            assert_eq!(frame.drop(request), Ok(DropOutcome::Rejected));
        }
        assert!(frame.elements().is_empty());

        assert_eq!(
            frame.drop(DropRequest::new(DropPayload::FretDiagram)),
            Ok(DropOutcome::ElementAdded(0))
        );
        assert_eq!(
            frame.drop(DropRequest::new(DropPayload::LayoutBreak(BreakKind::Page))),
            Ok(DropOutcome::BreakAdded(BreakKind::Page))
        );
    }

    #[test]
    fn test_text_frame_replaces_its_text_with_undo() {
        let mut frame = Frame::new(FrameKind::Text);
        let outcome = frame
            .drop(DropRequest::new(DropPayload::Text("<b>Title</b>".into())))
            .unwrap();
        assert_eq!(outcome, DropOutcome::TextReplaced);
        assert!(frame.elements().is_empty());

        let text = frame.text_mut().unwrap();
        assert_eq!(text.xml_text(), "<b>Title</b>");
        assert!(text.undo().unwrap());
        assert!(text.is_empty());
    }

    #[test]
    fn test_text_dropped_on_other_frames_becomes_child() {
        let mut frame = Frame::new(FrameKind::Vertical);
        let outcome = frame
            .drop(DropRequest::new(DropPayload::StaffText("Solo".into())))
            .unwrap();
        assert_eq!(outcome, DropOutcome::ElementAdded(0));
        let FrameElement::Text(text) = &frame.elements()[0] else {
            panic!("expected a text element");
        };
        assert_eq!(text.plain_text(), "Solo");
    }

    #[test]
    fn test_insert_actions() {
        let mut frame = Frame::new(FrameKind::Horizontal);
        let outcome = frame
            .drop(DropRequest::new(DropPayload::Action(InsertAction::TextFrame)))
            .unwrap();
        assert_eq!(
            outcome,
            DropOutcome::InsertRequested(InsertTarget::Frame(FrameKind::Text))
        );
    }

    #[test]
    fn test_text_property_only_on_text_frames() {
        let mut frame = Frame::new(FrameKind::Fret);
        assert_eq!(
            frame.set_text_property(PropertyId::FontSize, &PropertyValue::Double(14.0)),
            Err(Error::ReadOnlyProperty(PropertyId::FontSize))
        );
        let mut frame = Frame::new(FrameKind::Text);
        assert!(
            frame
                .set_text_property(PropertyId::FontSize, &PropertyValue::Double(14.0))
                .is_ok()
        );
    }
}
