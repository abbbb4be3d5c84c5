//! Pull-based HTML tokenizer with a constrained, practical tag-name character set.
//!
//! Supported tag-name characters (ASCII only): `[A-Za-z0-9:_-]`; names are lowercased.
//! Attribute names use the same ASCII character class.
//!
//! This is not an HTML5 tokenizer state machine. It splits markup into the token kinds the
//! extractors care about and leaves tree construction, and any repair of broken nesting, to
//! the consumer.
//!
//! Known limitations (intentional):
//! - Raw-text close-tag scanning accepts only ASCII whitespace before `>` (see
//!   `find_rawtext_close_tag`).
//! - A `<` that cannot open markup (`a < b`) stays part of the surrounding text.
use crate::entities::decode_entities;
use crate::types::{Attributes, Token};
use memchr::memchr;
use std::collections::VecDeque;

const HTML_COMMENT_START: &str = "<!--";
const HTML_COMMENT_END: &str = "-->";
const DOCTYPE_START: &[u8] = b"<!doctype";

/// Elements whose content is raw text up to the matching close tag.
const RAWTEXT_ELEMENTS: &[&str] = &[
    "iframe", "noembed", "noframes", "noscript", "script", "style", "xmp",
];
/// Elements whose content is text with character references, up to the matching close tag.
const RCDATA_ELEMENTS: &[&str] = &["textarea", "title"];

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'_' || c == b':'
}

fn scan_name(bytes: &[u8], start: usize) -> usize {
    let mut j = start;
    while j < bytes.len() && is_name_char(bytes[j]) {
        j += 1;
    }
    j
}

/// Whether the `<` at `i` begins a tag, comment, doctype or processing instruction.
fn opens_markup(bytes: &[u8], i: usize) -> bool {
    bytes
        .get(i + 1)
        .is_some_and(|b| b.is_ascii_alphabetic() || matches!(b, b'/' | b'!' | b'?'))
}

/// Find `</name` followed by optional ASCII whitespace and `>`, case-insensitively.
/// Returns the byte range of the whole close tag within `haystack`.
fn find_rawtext_close_tag(haystack: &str, name: &str) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let name = name.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        // '<' cannot appear inside a UTF-8 continuation byte, so byte scanning is safe.
        i += memchr(b'<', &bytes[i..])?;
        if bytes.get(i + 1) == Some(&b'/') && starts_with_ignore_ascii_case_at(bytes, i + 2, name)
        {
            let mut k = i + 2 + name.len();
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Resumable scanning state, shared by [`Tokenizer`] and [`crate::ReaderSource`].
///
/// The input is passed on every call so the owner decides whether it is borrowed or owned.
#[derive(Debug, Default)]
pub(crate) struct Cursor {
    pos: usize,
    // Raw-text elements emit start tag, text and end tag in one scan step.
    pending: VecDeque<Token>,
}

impl Cursor {
    pub(crate) fn next_token(&mut self, input: &str) -> Option<Token> {
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        while self.pos < input.len() {
            if let Some(token) = self.step(input) {
                log::trace!(target: "html.tokenizer", "emit token: {token:?}");
                return Some(token);
            }
        }
        None
    }

    /// Scan one construct starting at `self.pos`. Always advances.
    fn step(&mut self, input: &str) -> Option<Token> {
        let bytes = input.as_bytes();
        let i = self.pos;
        debug_assert!(input.is_char_boundary(i));

        if bytes[i] != b'<' || !opens_markup(bytes, i) {
            return self.text(input);
        }

        if input[i..].starts_with(HTML_COMMENT_START) {
            let body_start = i + HTML_COMMENT_START.len();
            let comment = match input[body_start..].find(HTML_COMMENT_END) {
                Some(end) => {
                    self.pos = body_start + end + HTML_COMMENT_END.len();
                    &input[body_start..body_start + end]
                }
                None => {
                    self.pos = input.len();
                    &input[body_start..]
                }
            };
            return Some(Token::Comment(comment.to_string()));
        }

        if starts_with_ignore_ascii_case_at(bytes, i, DOCTYPE_START) {
            let body_start = i + DOCTYPE_START.len();
            let rest = &input[body_start..];
            let Some(end) = rest.find('>') else {
                log::debug!(target: "html.tokenizer", "unterminated doctype at byte {i}");
                self.pos = input.len();
                return None;
            };
            self.pos = body_start + end + 1;
            return Some(Token::Doctype(rest[..end].trim().to_string()));
        }

        // Bogus comments: `<?xml ...?>` and `<!foo>`.
        if matches!(bytes[i + 1], b'?' | b'!') {
            let body_start = if bytes[i + 1] == b'?' { i + 1 } else { i + 2 };
            let end = memchr(b'>', &bytes[body_start..]).map_or(input.len(), |rel| body_start + rel);
            self.pos = (end + 1).min(input.len());
            return Some(Token::Comment(input[body_start..end].to_string()));
        }

        if bytes[i + 1] == b'/' {
            let start = i + 2;
            let j = scan_name(bytes, start);
            self.pos = memchr(b'>', &bytes[j..]).map_or(input.len(), |rel| j + rel + 1);
            if j == start {
                // `</>` and `</ foo>` name nothing.
                return None;
            }
            return Some(Token::EndTag(input[start..j].to_ascii_lowercase()));
        }

        self.start_tag(input)
    }

    fn text(&mut self, input: &str) -> Option<Token> {
        let bytes = input.as_bytes();
        let start = self.pos;
        let mut end = start + 1;
        loop {
            match memchr(b'<', &bytes[end..]) {
                Some(rel) if opens_markup(bytes, end + rel) => {
                    end += rel;
                    break;
                }
                Some(rel) => end += rel + 1,
                None => {
                    end = bytes.len();
                    break;
                }
            }
        }
        self.pos = end;
        let decoded = decode_entities(&input[start..end]);
        (!decoded.is_empty()).then_some(Token::Text(decoded))
    }

    fn start_tag(&mut self, input: &str) -> Option<Token> {
        let bytes = input.as_bytes();
        let len = bytes.len();
        let start = self.pos + 1;
        let j = scan_name(bytes, start);
        let name = input[start..j].to_ascii_lowercase();

        let mut k = j;
        let mut attributes: Attributes = Vec::new();
        let mut self_closing = false;

        let skip_whitespace = |k: &mut usize| {
            while *k < len && bytes[*k].is_ascii_whitespace() {
                *k += 1;
            }
        };

        loop {
            skip_whitespace(&mut k);
            if k >= len {
                break;
            }
            if bytes[k] == b'>' {
                k += 1;
                break;
            }
            if bytes[k] == b'/' {
                if k + 1 < len && bytes[k + 1] == b'>' {
                    self_closing = true;
                    k += 2;
                    break;
                }
                k += 1;
                continue;
            }
            let name_start = k;
            k = scan_name(bytes, k);
            if name_start == k {
                // Skip a byte that cannot start an attribute name, keeping `k` on a char boundary.
                k += input[k..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            let attribute_name = input[name_start..k].to_ascii_lowercase();

            skip_whitespace(&mut k);
            let value = if k < len && bytes[k] == b'=' {
                k += 1;
                skip_whitespace(&mut k);
                let raw = if k < len && (bytes[k] == b'"' || bytes[k] == b'\'') {
                    let quote = bytes[k];
                    k += 1;
                    let vstart = k;
                    k = memchr(quote, &bytes[k..]).map_or(len, |rel| k + rel);
                    let raw = &input[vstart..k];
                    if k < len {
                        k += 1;
                    }
                    raw
                } else {
                    let vstart = k;
                    while k < len && !bytes[k].is_ascii_whitespace() && bytes[k] != b'>' {
                        if bytes[k] == b'/' && k + 1 < len && bytes[k + 1] == b'>' {
                            break;
                        }
                        k += 1;
                    }
                    &input[vstart..k]
                };
                Some(decode_entities(raw))
            } else {
                None
            };
            attributes.push((attribute_name, value));
        }
        self.pos = k;

        if self_closing {
            return Some(Token::SelfClosingTag { name, attributes });
        }

        let rawtext = RAWTEXT_ELEMENTS.contains(&name.as_str());
        if rawtext || RCDATA_ELEMENTS.contains(&name.as_str()) {
            self.queue_element_text(input, &name, rawtext);
        }
        Some(Token::StartTag { name, attributes })
    }

    /// Queue the text content and end tag of a raw-text or RCDATA element.
    fn queue_element_text(&mut self, input: &str, name: &str, rawtext: bool) {
        let content_start = self.pos;
        let (content_end, next) = match find_rawtext_close_tag(&input[content_start..], name) {
            Some((rel_start, rel_end)) => (content_start + rel_start, content_start + rel_end),
            None => {
                // Missing close tag: the remainder is content, followed by an implicit end tag.
                log::debug!(
                    target: "html.tokenizer",
                    "<{name}> without close tag; treating the rest of the input as its content"
                );
                (input.len(), input.len())
            }
        };
        let raw = &input[content_start..content_end];
        if !raw.is_empty() {
            let text = if rawtext {
                raw.to_string()
            } else {
                decode_entities(raw)
            };
            self.pending.push_back(Token::Text(text));
        }
        self.pending.push_back(Token::EndTag(name.to_string()));
        self.pos = next;
    }
}

/// Tokenizes a borrowed document lazily, one token per `next()`.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: Cursor,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::default(),
        }
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.cursor.next_token(self.input)
    }
}

/// Tokenize a whole document eagerly.
pub fn tokenize(input: &str) -> Vec<Token> {
    Tokenizer::new(input).collect()
}
