//! Entity escaping for run text and attribute values.

use std::borrow::Cow;

/// Longest entity name accepted between `&` and `;`.
const MAX_ENTITY_LEN: usize = 10;

/// Escape `&`, `<`, `>` and `"`.
#[must_use]
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.contains(['&', '<', '>', '"']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    escape_into(&mut out, s);
    Cow::Owned(out)
}

/// Append the escaped form of `s` to `out`.
pub fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Decode an entity body (the part between `&` and `;`).
///
/// Named entities `lt gt amp quot apos` plus decimal `#NN` and
/// hexadecimal `#xHH` character references.
#[must_use]
pub fn decode_entity(name: &str) -> Option<char> {
    match name {
        "lt" => Some('<'),
        "gt" => Some('>'),
        "amp" => Some('&'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let num = name.strip_prefix('#')?;
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => num.parse::<u32>().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Entity starting at `s[0] == '&'`: the decoded character and the byte
/// length consumed including `&` and `;`.
pub(crate) fn entity_at(s: &str) -> Option<(char, usize)> {
    let body = s.strip_prefix('&')?;
    let end = body.find(';')?;
    if end > MAX_ENTITY_LEN {
        return None;
    }
    decode_entity(&body[..end]).map(|c| (c, end + 2))
}

/// Decode every entity in `s`. Unknown entities are kept verbatim.
#[must_use]
pub fn unescape(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while let Some(offset) = s[i..].find('&') {
        out.push_str(&s[i..i + offset]);
        i += offset;
        match entity_at(&s[i..]) {
            Some((c, len)) => {
                out.push(c);
                i += len;
            }
            None => {
                out.push('&');
                i += 1;
            }
        }
    }
    out.push_str(&s[i..]);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a < b && \"c\" > d"), "a &lt; b &amp;&amp; &quot;c&quot; &gt; d");
        assert!(matches!(escape("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_apostrophe_not_escaped() {
        assert_eq!(escape("l'istesso"), "l'istesso");
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("apos"), Some('\''));
        assert_eq!(decode_entity("#233"), Some('é'));
        assert_eq!(decode_entity("#x266D"), Some('♭'));
        assert_eq!(decode_entity("#10"), Some('\n'));
        assert_eq!(decode_entity("nbsp"), None);
        assert_eq!(decode_entity("#xD800"), None);
        assert_eq!(decode_entity("#"), None);
    }

    #[test]
    fn test_unescape_keeps_unknown() {
        assert_eq!(unescape("&lt;b&gt; &amp; &nbsp; &"), "<b> & &nbsp; &");
        assert_eq!(unescape("&#x1D11E;"), "𝄞");
    }

    #[test]
    fn test_entity_at_length() {
        assert_eq!(entity_at("&amp;rest"), Some(('&', 5)));
        assert_eq!(entity_at("&averyveryverylongname;"), None);
        assert_eq!(entity_at("&amp"), None);
    }
}
