//! Markup token source for the extractors: a token model, a lenient tokenizer over `&str`,
//! and a chunked reader front end.

mod entities;
mod error;
mod reader;
mod tokenizer;
mod types;
mod utf8;

pub use crate::error::SourceError;
pub use crate::reader::{ReaderConfig, ReaderSource};
pub use crate::tokenizer::{Tokenizer, tokenize};
pub use crate::types::{Attributes, Token};
