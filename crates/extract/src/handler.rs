use html::Token;
use std::fmt::Write;

/// Receives tokens one at a time, in document order.
///
/// Implementations only mutate their own state; results are read back through whatever
/// accessors the implementation offers, at any point in the stream.
pub trait TokenHandler {
    fn handle_token(&mut self, token: &Token);
}

impl<H: TokenHandler + ?Sized> TokenHandler for &mut H {
    fn handle_token(&mut self, token: &Token) {
        (**self).handle_token(token);
    }
}

impl<H: TokenHandler + ?Sized> TokenHandler for Box<H> {
    fn handle_token(&mut self, token: &Token) {
        (**self).handle_token(token);
    }
}

/// Handler backed by a closure. See [`from_fn`].
#[derive(Clone, Debug)]
pub struct FromFn<F>(F);

/// Wrap a closure as a [`TokenHandler`].
pub fn from_fn<F: FnMut(&Token)>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<F: FnMut(&Token)> TokenHandler for FromFn<F> {
    fn handle_token(&mut self, token: &Token) {
        (self.0)(token);
    }
}

/// Replays every token to each wrapped handler, in the order they were added.
#[derive(Default)]
pub struct Fanout<'a> {
    handlers: Vec<&'a mut dyn TokenHandler>,
}

impl<'a> Fanout<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, handler: &'a mut dyn TokenHandler) -> Self {
        self.push(handler);
        self
    }

    pub fn push(&mut self, handler: &'a mut dyn TokenHandler) {
        self.handlers.push(handler);
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl TokenHandler for Fanout<'_> {
    fn handle_token(&mut self, token: &Token) {
        for handler in &mut self.handlers {
            handler.handle_token(token);
        }
    }
}

/// Logs each token on the `extract.debug` target before handing it to the inner handler.
#[derive(Debug, Default)]
pub struct DebugHandler<H> {
    inner: H,
}

impl<H: TokenHandler> DebugHandler<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

impl<H: TokenHandler> TokenHandler for DebugHandler<H> {
    fn handle_token(&mut self, token: &Token) {
        if log::log_enabled!(target: "extract.debug", log::Level::Debug) {
            log::debug!(target: "extract.debug", "{}", describe_token(token));
        }
        self.inner.handle_token(token);
    }
}

/// One-line, human-readable rendering of a token: kind, name, text and attributes.
pub fn describe_token(token: &Token) -> String {
    let mut line = String::new();
    line.push_str(token.kind());
    line.push('(');
    if let Some(name) = token.name() {
        line.push_str(name);
    }
    for (key, value) in token.attributes() {
        line.push(' ');
        line.push_str(key);
        if let Some(value) = value {
            let _ = write!(&mut line, "=\"{}\"", escape_text(value));
        }
    }
    if let Some(data) = token.data() {
        let _ = write!(&mut line, "\"{}\"", escape_text(data));
    }
    line.push(')');
    line
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch.is_control() => {
                let _ = write!(&mut out, "\\u{{{:02X}}}", ch as u32);
            }
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::tokenize;

    #[derive(Default)]
    struct Recorder {
        seen: Vec<String>,
    }

    impl TokenHandler for Recorder {
        fn handle_token(&mut self, token: &Token) {
            self.seen.push(describe_token(token));
        }
    }

    #[test]
    fn describe_token_covers_kind_name_text_and_attributes() {
        let tokens = tokenize("<a href=\"/x\" download>hi\n\"you\"</a><!--c--><br/>");
        let described: Vec<String> = tokens.iter().map(describe_token).collect();
        assert_eq!(
            described,
            vec![
                r#"StartTag(a href="/x" download)"#,
                r#"Text("hi\n\"you\"")"#,
                "EndTag(a)",
                r#"Comment("c")"#,
                "SelfClosingTag(br)",
            ]
        );
    }

    #[test]
    fn fanout_delivers_every_token_to_every_handler_in_order() {
        let order = std::cell::RefCell::new(Vec::new());
        {
            let mut first = from_fn(|t: &Token| order.borrow_mut().push(format!("1:{}", t.kind())));
            let mut second =
                from_fn(|t: &Token| order.borrow_mut().push(format!("2:{}", t.kind())));
            let mut fanout = Fanout::new().with(&mut first).with(&mut second);
            assert_eq!(fanout.len(), 2);

            for token in tokenize("<p>x</p>") {
                fanout.handle_token(&token);
            }
        }

        assert_eq!(
            order.into_inner(),
            vec![
                "1:StartTag",
                "2:StartTag",
                "1:Text",
                "2:Text",
                "1:EndTag",
                "2:EndTag"
            ]
        );
    }

    #[test]
    fn debug_handler_is_transparent() {
        let tokens = tokenize("<div id=a>one <b>two</b></div>");

        let mut plain = Recorder::default();
        let mut wrapped = DebugHandler::new(Recorder::default());
        for token in &tokens {
            plain.handle_token(token);
            wrapped.handle_token(token);
        }

        assert_eq!(wrapped.inner().seen, plain.seen);
        assert_eq!(wrapped.into_inner().seen.len(), tokens.len());
    }

    #[test]
    fn boxed_and_borrowed_handlers_forward() {
        let mut recorder = Recorder::default();
        {
            let mut boxed: Box<dyn TokenHandler + '_> = Box::new(&mut recorder);
            boxed.handle_token(&Token::Text("x".to_string()));
        }
        assert_eq!(recorder.seen, vec![r#"Text("x")"#]);
    }
}
