/// Named references decoded by [`decode_entities`]. Anything else passes through untouched.
const NAMED: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
    ("nbsp", '\u{00A0}'),
    ("copy", '\u{00A9}'),
    ("reg", '\u{00AE}'),
    ("trade", '\u{2122}'),
    ("hellip", '\u{2026}'),
    ("mdash", '\u{2014}'),
    ("ndash", '\u{2013}'),
    ("lsquo", '\u{2018}'),
    ("rsquo", '\u{2019}'),
    ("ldquo", '\u{201C}'),
    ("rdquo", '\u{201D}'),
];

// Longest reference we try to recognise between '&' and ';'. Bounds the scan on
// adversarial input like "&&&&&...".
const MAX_REFERENCE_LEN: usize = 8;

/// Decode character references in text or attribute values.
///
/// Only semicolon-terminated references are decoded: the names in [`NAMED`], decimal
/// `&#215;` and hex `&#xD7;`. Numeric references must name a Unicode scalar value.
/// Unknown names, missing semicolons and malformed numerics are kept verbatim.
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_reference(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// `tail` starts with `&`. Returns the decoded char and the number of bytes consumed.
fn decode_reference(tail: &str) -> Option<(char, usize)> {
    let body = &tail[1..];
    let semi = body
        .bytes()
        .take(MAX_REFERENCE_LEN + 1)
        .position(|b| b == b';')?;
    let reference = &body[..semi];
    let consumed = semi + 2;

    if let Some(numeric) = reference.strip_prefix('#') {
        let value = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                u32::from_str_radix(hex, 16).ok()?
            }
            Some(_) => return None,
            None if !numeric.is_empty() && numeric.bytes().all(|b| b.is_ascii_digit()) => {
                numeric.parse::<u32>().ok()?
            }
            None => return None,
        };
        return char::from_u32(value).map(|ch| (ch, consumed));
    }

    NAMED
        .iter()
        .find(|(name, _)| *name == reference)
        .map(|&(_, ch)| (ch, consumed))
}
