use crate::error::SourceError;
use crate::tokenizer::Cursor;
use crate::types::Token;
use crate::utf8::Utf8Decoder;
use std::io::{ErrorKind, Read};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Bytes requested from the reader per `read` call.
    pub chunk_size: usize,
    /// Upper bound on the document size; reading past it fails with [`SourceError::TooLarge`].
    pub max_bytes: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            chunk_size: 64 * 1024,
            max_bytes: 32 * 1024 * 1024,
        }
    }
}

/// Token source over any [`Read`] implementation.
///
/// The document is pulled in `chunk_size` pieces and decoded as UTF-8 incrementally (invalid
/// bytes become U+FFFD). Tokens are produced once the reader is drained, so a tag split across
/// two reads is never torn. A read failure is reported as a single `Err` item, after which the
/// source is exhausted.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: Option<R>,
    config: ReaderConfig,
    text: String,
    cursor: Cursor,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, ReaderConfig::default())
    }

    pub fn with_config(reader: R, config: ReaderConfig) -> Self {
        Self {
            reader: Some(reader),
            config,
            text: String::new(),
            cursor: Cursor::default(),
        }
    }

    fn fill(&mut self, mut reader: R) -> Result<(), SourceError> {
        let mut decoder = Utf8Decoder::default();
        let mut chunk = vec![0u8; self.config.chunk_size.max(1)];
        let mut total = 0usize;
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            total += n;
            if total > self.config.max_bytes {
                return Err(SourceError::TooLarge {
                    limit: self.config.max_bytes,
                });
            }
            decoder.push(&mut self.text, &chunk[..n]);
        }
        decoder.finish(&mut self.text);
        log::debug!(target: "html.tokenizer", "read {total} bytes");
        Ok(())
    }
}

impl<R: Read> Iterator for ReaderSource<R> {
    type Item = Result<Token, SourceError>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(reader) = self.reader.take()
            && let Err(err) = self.fill(reader)
        {
            // Nothing read so far is trustworthy as a prefix of the document.
            self.text.clear();
            return Some(Err(err));
        }
        self.cursor.next_token(&self.text).map(Ok)
    }
}
