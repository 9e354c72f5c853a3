//! Fuzz target for edit sessions.
//!
//! Replays arbitrary editing commands against a text item. Nothing may
//! panic and the caret must always stay inside the text.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scoretext::{FormatId, FormatValue, MoveMode, MoveOperation, PointF, TextBase};

#[derive(Arbitrary, Debug)]
enum Command {
    Type(String),
    Paste(String),
    Delete,
    Backspace,
    Cut,
    SelectAll,
    SelectWord,
    Bold(bool),
    Move(u8, bool, u8),
    Click(i16, i16),
    Position(u16),
}

const MOVES: [MoveOperation; 10] = [
    MoveOperation::Start,
    MoveOperation::Up,
    MoveOperation::StartOfLine,
    MoveOperation::Left,
    MoveOperation::WordLeft,
    MoveOperation::End,
    MoveOperation::Down,
    MoveOperation::EndOfLine,
    MoveOperation::NextWord,
    MoveOperation::Right,
];

#[derive(Arbitrary, Debug)]
struct Input {
    initial: String,
    commands: Vec<Command>,
}

fuzz_target!(|input: Input| {
    let mut text = TextBase::from_xml(&input.initial);
    {
        let mut edit = text.edit();
        for command in input.commands.into_iter().take(64) {
            match command {
                Command::Type(s) => edit.insert_text(&s),
                Command::Paste(s) => edit.paste(&s),
                Command::Delete => {
                    edit.delete_char();
                }
                Command::Backspace => {
                    edit.backspace();
                }
                Command::Cut => {
                    edit.cut();
                }
                Command::SelectAll => edit.select_all(),
                Command::SelectWord => edit.select_word(),
                Command::Bold(on) => edit.set_format(FormatId::Bold, &FormatValue::Bool(on)),
                Command::Move(op, keep, count) => {
                    let mode = if keep { MoveMode::KeepAnchor } else { MoveMode::MoveAnchor };
                    edit.move_position(MOVES[usize::from(op) % MOVES.len()], mode, usize::from(count % 8));
                }
                Command::Click(x, y) => {
                    edit.set(PointF::new(f64::from(x), f64::from(y)), MoveMode::MoveAnchor);
                }
                Command::Position(p) => {
                    let _ = edit.set_cursor_position(usize::from(p));
                }
            }
            let cursor = edit.cursor();
            assert!(cursor.row() < edit.text().rows());
            assert!(cursor.column() <= edit.text().blocks()[cursor.row()].columns());
        }
    }
    let _ = text.undo();
});
