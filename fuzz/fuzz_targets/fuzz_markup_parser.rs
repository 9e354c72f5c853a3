//! Fuzz target for the markup parser.
//!
//! Arbitrary strings must parse without panicking, and the generated
//! markup must describe the same text when parsed again.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scoretext::CharFormat;
use scoretext::markup::{emit, parse, to_plain_text};

fuzz_target!(|data: &[u8]| {
    let Ok(xml) = std::str::from_utf8(data) else {
        return;
    };
    let base = CharFormat::default();
    let blocks = parse(xml, &base);
    assert!(!blocks.is_empty());
    assert!(blocks.last().is_some_and(|b| b.eol()));

    let plain: Vec<String> = blocks.iter().map(|b| b.plain_text()).collect();
    assert_eq!(to_plain_text(xml), plain.join("\n"));

    let again = parse(&emit(&blocks, &base), &base);
    let replain: Vec<String> = again.iter().map(|b| b.plain_text()).collect();
    assert_eq!(plain, replain);
});
