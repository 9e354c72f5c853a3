//! Snapshot tests for generated markup.
//!
//! Edits are applied through a session and the resulting markup is
//! compared against inline insta snapshots.

use insta::assert_snapshot;
use scoretext::markup::{emit, parse};
use scoretext::{
    CharFormat, FormatId, FormatValue, MoveMode, MoveOperation, TextBase, TextStyle,
    VerticalAlignment,
};

fn edited(xml: &str, apply: impl FnOnce(&mut scoretext::EditSession<'_>)) -> String {
    let mut text = TextBase::from_xml(xml);
    apply(&mut text.edit());
    text.xml_text()
}

fn select(edit: &mut scoretext::EditSession<'_>, row: usize, column: usize, n: usize) {
    edit.set_position(row, column);
    edit.move_position(MoveOperation::Right, MoveMode::KeepAnchor, n);
}

#[test]
fn snapshot_overlapping_styles() {
    let xml = edited("Allegro ma non troppo", |edit| {
        select(edit, 0, 0, 10);
        edit.change_selection_format(FormatId::Bold, &FormatValue::Bool(true));
        select(edit, 0, 8, 6);
        edit.change_selection_format(FormatId::Italic, &FormatValue::Bool(true));
    });
    assert_snapshot!(xml, @"<b>Allegro <i>ma</i></b><i> non</i> troppo");
}

#[test]
fn snapshot_superscript_and_size() {
    let xml = edited("Op. 27 No 2", |edit| {
        select(edit, 0, 8, 1);
        edit.change_selection_format(
            FormatId::Valign,
            &FormatValue::Valign(VerticalAlignment::Superscript),
        );
        select(edit, 0, 0, 6);
        edit.change_selection_format(FormatId::FontSize, &FormatValue::Double(14.5));
    });
    assert_snapshot!(xml, @r#"<font size="14.5"/>Op. 27<font size="12"/> N<sup>o</sup> 2"#);
}

#[test]
fn snapshot_font_face_is_escaped() {
    let xml = edited("ppp & morendo", |edit| {
        select(edit, 0, 0, 3);
        edit.change_selection_format(
            FormatId::FontFamily,
            &FormatValue::String("Bravura \"Text\"".into()),
        );
    });
    assert_snapshot!(xml, @r#"<font face="Bravura &quot;Text&quot;"/>ppp<font face=""/> &amp; morendo"#);
}

#[test]
fn snapshot_multiline_edit() {
    let xml = edited("<i>Requiem</i>", |edit| {
        edit.insert_text("\naeternam");
        edit.move_position(MoveOperation::StartOfLine, MoveMode::MoveAnchor, 1);
        edit.move_position(MoveOperation::EndOfLine, MoveMode::KeepAnchor, 1);
        edit.change_selection_format(FormatId::Italic, &FormatValue::Bool(false));
    });
    assert_snapshot!(xml, @r"
    <i>Requiem
    </i>aeternam
    ");
}

#[test]
fn snapshot_copy_writes_self_contained_runs() {
    let mut text = TextBase::from_xml("<b>a<i>tempo</i></b> <sub>2</sub>");
    let mut edit = text.edit();
    edit.select_all();
    assert_snapshot!(edit.copy(), @r#"<font size="12"/><b>a</b><b><i>tempo</i></b> <sub>2</sub>"#);
}

#[test]
fn snapshot_emit_relative_to_bold_base() {
    let base = CharFormat::default().with_bold();
    let blocks = parse("Fine</b> (al Coda)", &base);
    assert_snapshot!(emit(&blocks, &base), @"Fine</b> (al Coda)");
    assert_snapshot!(emit(&blocks, &CharFormat::default()), @"<b>Fine</b> (al Coda)");
}

#[test]
fn snapshot_style_font_applies_to_plain_runs() {
    let mut text = TextBase::with_style(TextStyle::default().with_font_size(9.0));
    text.set_xml_text("<font size=\"9\"/>D.C.");
    assert_snapshot!(text.xml_text(), @r#"<font size="9"/>D.C."#);
    let renamed = text.xml_text().replace("D.C.", "D.S.");
    text.set_xml_text(&renamed);
    {
        let mut edit = text.edit();
        edit.insert_text(" al Fine");
    }
    assert_snapshot!(text.xml_text(), @"D.S. al Fine");
}

#[test]
fn snapshot_recovered_markup() {
    let xml = edited("a <blink>b</blink> &nbsp; &amp; <b>c", |edit| {
        edit.insert_text("!");
    });
    assert_snapshot!(xml, @"a &lt;blink&gt;b&lt;/blink&gt; &amp;nbsp; &amp; <b>c!</b>");
}
