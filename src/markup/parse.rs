//! Markup scanner.
//!
//! One left-to-right pass with a running [`CharFormat`]. Recognized tags
//! update the format, text between them is emitted in the format current
//! at that point. Anything that does not parse is kept as literal text.

use super::escape::{entity_at, unescape};
use crate::event::{LogLevel, emit_log};
use crate::format::{CharFormat, VerticalAlignment};
use crate::text::TextBlock;

/// Receiver of scanner output.
pub(crate) trait MarkupSink {
    /// A run of text in `format`. Never contains a line break.
    fn text(&mut self, text: &str, format: &CharFormat);
    fn line_break(&mut self, format: &CharFormat);
    fn format_changed(&mut self, _format: &CharFormat) {}
}

/// Scan `xml`, starting from and updating the running `format`.
pub(crate) fn scan(xml: &str, format: &mut CharFormat, sink: &mut impl MarkupSink) {
    let mut run = String::new();
    let mut i = 0;
    while let Some(c) = xml[i..].chars().next() {
        let rest = &xml[i..];
        match c {
            '<' => {
                let Some((token, len)) = tag_at(rest) else {
                    emit_log(LogLevel::Debug, "unterminated tag kept as text");
                    run.push('<');
                    i += 1;
                    continue;
                };
                i += len;
                if is_line_break(token) {
                    flush(&mut run, format, sink);
                    sink.line_break(format);
                    continue;
                }
                let mut next = format.clone();
                if !prepare_format(token, &mut next) {
                    emit_log(LogLevel::Debug, &format!("unknown tag <{token}> kept as text"));
                    run.push_str(&rest[..len]);
                } else if next != *format {
                    flush(&mut run, format, sink);
                    *format = next;
                    sink.format_changed(format);
                }
            }
            '&' => match entity_at(rest) {
                Some(('\n', len)) => {
                    flush(&mut run, format, sink);
                    sink.line_break(format);
                    i += len;
                }
                Some((decoded, len)) => {
                    run.push(decoded);
                    i += len;
                }
                None => {
                    emit_log(LogLevel::Debug, "unknown entity kept as text");
                    run.push('&');
                    i += 1;
                }
            },
            '\n' => {
                flush(&mut run, format, sink);
                sink.line_break(format);
                i += 1;
            }
            _ => {
                run.push(c);
                i += c.len_utf8();
            }
        }
    }
    flush(&mut run, format, sink);
}

fn flush(run: &mut String, format: &CharFormat, sink: &mut impl MarkupSink) {
    if !run.is_empty() {
        sink.text(run, format);
        run.clear();
    }
}

/// Tag body and byte length of a tag starting at `s[0] == '<'`.
///
/// A second `<` before the closing `>` means the first one was literal.
fn tag_at(s: &str) -> Option<(&str, usize)> {
    let body = s.strip_prefix('<')?;
    let end = body.find(['<', '>'])?;
    body[end..]
        .starts_with('>')
        .then(|| (&body[..end], end + 2))
}

fn is_line_break(token: &str) -> bool {
    matches!(token, "br" | "br/" | "br /")
}

/// Apply a tag body to `format`.
///
/// Returns false, leaving `format` untouched, if the token is not a
/// recognized formatting tag.
pub fn prepare_format(token: &str, format: &mut CharFormat) -> bool {
    match token {
        "b" => format.set_bold(true),
        "/b" => format.set_bold(false),
        "i" => format.set_italic(true),
        "/i" => format.set_italic(false),
        "u" => format.set_underline(true),
        "/u" => format.set_underline(false),
        "s" => format.set_strike(true),
        "/s" => format.set_strike(false),
        "sup" => format.set_valign(VerticalAlignment::Superscript),
        "sub" => format.set_valign(VerticalAlignment::Subscript),
        "/sup" | "/sub" => format.set_valign(VerticalAlignment::Normal),
        _ => {
            let Some(attrs) = token.strip_prefix("font ") else {
                return false;
            };
            let Some(next) = font_attributes(attrs, format) else {
                return false;
            };
            *format = next;
        }
    }
    true
}

/// Parse `size="N"` / `face="F"` attributes of a self-closing font tag.
fn font_attributes(attrs: &str, format: &CharFormat) -> Option<CharFormat> {
    let mut next = format.clone();
    let mut rest = attrs.trim().trim_end_matches('/').trim_end();
    if rest.is_empty() {
        return None;
    }
    while !rest.is_empty() {
        let (name, tail) = rest.split_once('=')?;
        let (value, tail) = tail.trim_start().strip_prefix('"')?.split_once('"')?;
        match name.trim() {
            "size" => {
                let size: f64 = value.trim().parse().ok()?;
                if !size.is_finite() || size <= 0.0 {
                    return None;
                }
                next.set_font_size(size);
            }
            "face" => next.set_font_family(unescape(value)),
            _ => return None,
        }
        rest = tail.trim_start();
    }
    Some(next)
}

struct BlockBuilder {
    blocks: Vec<TextBlock>,
}

impl BlockBuilder {
    fn current(&mut self) -> &mut TextBlock {
        if self.blocks.is_empty() {
            self.blocks.push(TextBlock::new());
        }
        let last = self.blocks.len() - 1;
        &mut self.blocks[last]
    }
}

impl MarkupSink for BlockBuilder {
    fn text(&mut self, text: &str, format: &CharFormat) {
        self.current().push_text(text, format);
    }

    fn line_break(&mut self, format: &CharFormat) {
        self.blocks.push(TextBlock::with_format(format.clone()));
    }

    fn format_changed(&mut self, format: &CharFormat) {
        self.current().set_empty_format(format);
    }
}

/// Parse markup into lines, relative to the `base` format.
///
/// Always returns at least one block; the last one has its end-of-text
/// flag set.
#[must_use]
pub fn parse(xml: &str, base: &CharFormat) -> Vec<TextBlock> {
    let mut builder = BlockBuilder {
        blocks: vec![TextBlock::with_format(base.clone())],
    };
    let mut format = base.clone();
    scan(xml, &mut format, &mut builder);
    if let Some(last) = builder.blocks.last_mut() {
        last.set_eol(true);
    }
    builder.blocks
}

struct PlainText(String);

impl MarkupSink for PlainText {
    fn text(&mut self, text: &str, _format: &CharFormat) {
        self.0.push_str(text);
    }

    fn line_break(&mut self, _format: &CharFormat) {
        self.0.push('\n');
    }
}

/// Strip all formatting from markup, decoding entities.
#[must_use]
pub fn to_plain_text(xml: &str) -> String {
    let mut plain = PlainText(String::new());
    scan(xml, &mut CharFormat::default(), &mut plain);
    plain.0
}
