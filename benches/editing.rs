//! Edit session benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use scoretext::{FormatId, FormatValue, MoveMode, MoveOperation, TextBase};
use std::hint::black_box;

const PROGRAM_NOTE: &str = "Composed in <i>1808</i>, the symphony opens with\n\
    a <b>four-note</b> motif that returns throughout.";

fn typing(c: &mut Criterion) {
    c.bench_function("type_100_chars", |b| {
        b.iter_batched(
            || TextBase::from_xml(PROGRAM_NOTE),
            |mut text| {
                let mut edit = text.edit();
                for _ in 0..100 {
                    edit.insert_text(black_box("x"));
                }
                drop(edit);
                text
            },
            BatchSize::SmallInput,
        );
    });

    c.bench_function("type_and_backspace", |b| {
        b.iter_batched(
            || TextBase::from_xml(PROGRAM_NOTE),
            |mut text| {
                let mut edit = text.edit();
                edit.set_position(0, 12);
                for _ in 0..20 {
                    edit.insert_text("ab\n");
                    edit.backspace();
                }
                drop(edit);
                text
            },
            BatchSize::SmallInput,
        );
    });
}

fn formatting(c: &mut Criterion) {
    c.bench_function("bold_whole_text", |b| {
        b.iter_batched(
            || TextBase::from_xml(PROGRAM_NOTE),
            |mut text| {
                let mut edit = text.edit();
                edit.select_all();
                edit.change_selection_format(FormatId::Bold, &FormatValue::Bool(true));
                black_box(edit.selected_fragments_format());
                drop(edit);
                text
            },
            BatchSize::SmallInput,
        );
    });
}

fn cursor_movement(c: &mut Criterion) {
    let mut text = TextBase::from_xml(PROGRAM_NOTE);

    c.bench_function("word_motion_round_trip", |b| {
        let mut edit = text.edit();
        b.iter(|| {
            edit.move_position(MoveOperation::Start, MoveMode::MoveAnchor, 1);
            while edit.move_position(MoveOperation::NextWord, MoveMode::MoveAnchor, 1) {}
            black_box(edit.current_position())
        });
    });
}

criterion_group!(benches, typing, formatting, cursor_movement);
criterion_main!(benches);
