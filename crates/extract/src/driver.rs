use crate::handler::TokenHandler;
use html::{ReaderConfig, ReaderSource, SourceError, Token, Tokenizer};
use std::io::Read;

/// Feed every token of `source` to `handler`, in order.
///
/// Stops at the first `Err` item and returns it; tokens before it have already been delivered,
/// so the handler holds a best-effort result for the prefix. Returns `Ok(())` once the source
/// is exhausted.
pub fn extract<I, E, H>(source: I, handler: &mut H) -> Result<(), E>
where
    I: IntoIterator<Item = Result<Token, E>>,
    H: TokenHandler + ?Sized,
{
    let mut delivered = 0usize;
    for item in source {
        match item {
            Ok(token) => {
                handler.handle_token(&token);
                delivered += 1;
            }
            Err(err) => {
                log::debug!(target: "extract", "token source failed after {delivered} tokens");
                return Err(err);
            }
        }
    }
    log::trace!(target: "extract", "token source exhausted after {delivered} tokens");
    Ok(())
}

/// Tokenize `input` and feed it to `handler`. Tokenizing a string cannot fail.
pub fn extract_str<H>(input: &str, handler: &mut H)
where
    H: TokenHandler + ?Sized,
{
    for token in Tokenizer::new(input) {
        handler.handle_token(&token);
    }
}

/// Read a document from `reader` with the default [`ReaderConfig`] and feed it to `handler`.
pub fn extract_reader<R, H>(reader: R, handler: &mut H) -> Result<(), SourceError>
where
    R: Read,
    H: TokenHandler + ?Sized,
{
    extract_reader_with_config(reader, ReaderConfig::default(), handler)
}

pub fn extract_reader_with_config<R, H>(
    reader: R,
    config: ReaderConfig,
    handler: &mut H,
) -> Result<(), SourceError>
where
    R: Read,
    H: TokenHandler + ?Sized,
{
    extract(ReaderSource::with_config(reader, config), handler)
}
