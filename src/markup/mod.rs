//! Conversion between lines of styled runs and the markup text form.
//!
//! The dialect is a small XML-like subset:
//!
//! - `<b>`, `<i>`, `<u>`, `<s>`, `<sup>`, `<sub>` and their closing forms
//! - `<font size="N"/>` and `<font face="F"/>`, which change the running
//!   format until the next font tag
//! - line breaks as `\n`; `<br/>` and `&#10;` are accepted on input
//! - `&lt; &gt; &amp; &quot;` on output, plus `&apos;` and numeric
//!   character references on input
//!
//! Markup is always read and written relative to a base format: tags
//! only express departures from it.
//!
//! # Examples
//!
//! ```
//! use scoretext::CharFormat;
//! use scoretext::markup;
//!
//! let base = CharFormat::default();
//! let blocks = markup::parse("<b>Allegro</b> &amp; vivace", &base);
//! assert_eq!(blocks[0].plain_text(), "Allegro & vivace");
//! assert_eq!(markup::emit(&blocks, &base), "<b>Allegro</b> &amp; vivace");
//! ```

mod emit;
mod escape;
mod parse;

pub use emit::emit;
pub(crate) use emit::RunTags;
pub use escape::{decode_entity, escape, escape_into, unescape};
pub use parse::{parse, prepare_format, to_plain_text};
pub(crate) use parse::{MarkupSink, scan};

/// Markup for plain text: special characters escaped, line breaks kept.
#[must_use]
pub fn plain_to_xml_text(plain: &str) -> String {
    escape(plain).into_owned()
}
