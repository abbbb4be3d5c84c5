//! Plain-text rendering of a page's visible content.
//!
//! The extractor sees a flat token stream, so it keeps its own stack of open elements instead
//! of walking a tree. Broken nesting is tolerated: an end tag only pops the stack when it
//! names the element on top, otherwise it is ignored.
//!
//! Whitespace follows a simple layout model. Runs of source whitespace collapse to one space,
//! block elements are separated from their neighbours by one space, and inline elements run
//! together exactly as written:
//!
//! ```
//! use extract::{TextExtractor, extract_str};
//!
//! let mut text = TextExtractor::new();
//! extract_str("<h1>Heyo.</h1>Implicit<p>whitespace!</p>", &mut text);
//! assert_eq!(text.text(), "Heyo. Implicit whitespace!");
//!
//! let mut text = TextExtractor::new();
//! extract_str("<b>Heyo.</b>No Implicit<span>whitespace!</span>", &mut text);
//! assert_eq!(text.text(), "Heyo.No Implicitwhitespace!");
//! ```

use crate::attr::attr;
use crate::elements;
use crate::handler::TokenHandler;
use html::Token;
use std::fmt;

const LOG_TARGET: &str = "extract.text";

#[derive(Clone, Debug, Default)]
pub struct TextExtractor {
    buffer: String,
    stack: Vec<String>,
    /// Root element of the active ignore region.
    ignoring: Option<String>,
    /// Open elements named like the region root, the root included. Zero outside a region.
    ignore_depth: usize,
    /// Whether the element most recently pushed or popped is inline.
    inline: bool,
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The text gathered so far, without leading or trailing whitespace.
    pub fn text(&self) -> &str {
        self.buffer.trim()
    }

    /// Like [`TextExtractor::text`], trimming the buffer in place instead of copying it.
    pub fn into_text(mut self) -> String {
        let end = self.buffer.trim_end().len();
        self.buffer.truncate(end);
        let start = self.buffer.len() - self.buffer.trim_start().len();
        self.buffer.drain(..start);
        self.buffer
    }

    /// Whether text is currently being suppressed.
    pub fn is_ignoring(&self) -> bool {
        self.ignoring.is_some()
    }

    /// Forget everything, ready for the next document.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn void_element(&mut self, name: &str, token: &Token) {
        // A void element still takes up room on the line.
        self.ensure_space();
        if matches!(name, "img" | "area")
            && let Some(alt) = attr(token, "alt")
        {
            self.write_collapsed(alt);
            self.ensure_space();
        }
    }

    fn open(&mut self, name: &str, token: &Token) {
        self.push(name);
        if !self.inline {
            self.ensure_space();
        }

        if name == "body" {
            // Anything before <body> is stray head content.
            log::trace!(target: LOG_TARGET, "<body> opened; discarding {} bytes", self.buffer.len());
            self.buffer.clear();
            return;
        }

        if let Some(root) = &self.ignoring {
            if root == name {
                self.ignore_depth += 1;
            }
        } else if elements::is_ignored(name)
            || attr(token, "id").is_some_and(elements::is_ignored_id)
        {
            log::trace!(target: LOG_TARGET, "ignoring content of <{name}>");
            self.ignoring = Some(name.to_string());
            self.ignore_depth = 1;
        }
    }

    fn close(&mut self, name: &str) {
        self.maybe_pop(name);
        if !self.inline {
            self.ensure_space();
        }

        if name == "head" {
            // Documents without <body> still get their head text dropped.
            log::trace!(target: LOG_TARGET, "</head> closed; discarding {} bytes", self.buffer.len());
            self.buffer.clear();
            return;
        }

        // Only same-named tags count, so unclosed children cannot hold the region open.
        if self.ignoring.as_deref() == Some(name) {
            self.ignore_depth -= 1;
            if self.ignore_depth == 0 {
                log::trace!(target: LOG_TARGET, "ignore region <{name}> closed");
                self.ignoring = None;
            }
        }
    }

    fn push(&mut self, name: &str) {
        self.stack.push(name.to_string());
        self.inline = elements::is_inline(name);
    }

    /// Pop the top element, but only if `closing` names it. Spurious end tags change nothing.
    fn maybe_pop(&mut self, closing: &str) {
        if self.stack.last().map(String::as_str) != Some(closing) {
            return;
        }
        self.stack.pop();
        self.inline = elements::is_inline(closing);
    }

    fn write_collapsed(&mut self, s: &str) {
        if self.ignoring.is_some() {
            return;
        }

        if s.starts_with(char::is_whitespace) {
            self.ensure_space();
        }
        let mut words = s.split_whitespace();
        if let Some(first) = words.next() {
            self.buffer.push_str(first);
            for word in words {
                self.buffer.push(' ');
                self.buffer.push_str(word);
            }
        }
        if s.ends_with(char::is_whitespace) {
            self.ensure_space();
        }
    }

    fn ensure_space(&mut self) {
        if !self.buffer.is_empty() && !self.buffer.ends_with(' ') {
            self.buffer.push(' ');
        }
    }
}

impl TokenHandler for TextExtractor {
    fn handle_token(&mut self, token: &Token) {
        match token {
            Token::SelfClosingTag { name, .. } => self.void_element(name, token),
            Token::StartTag { name, .. } if elements::is_void(name) => {
                self.void_element(name, token)
            }
            Token::StartTag { name, .. } => self.open(name, token),
            Token::EndTag(name) => self.close(name),
            Token::Text(text) => self.write_collapsed(text),
            Token::Comment(_) | Token::Doctype(_) => {}
        }
    }
}

impl fmt::Display for TextExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
