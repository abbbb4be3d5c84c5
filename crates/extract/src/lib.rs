//! Streaming extraction over HTML token streams.
//!
//! Extractors implement [`TokenHandler`] and consume one [`html::Token`] at a time, in document
//! order, without ever building a tree:
//!
//! - [`TextExtractor`] renders the visible text with collapsed whitespace.
//! - [`MetadataExtractor`] gathers title, OpenGraph, meta and link fields into a weighted
//!   [`Metadata`] table.
//! - [`CategoryExtractor`] gathers article sections and tags.
//! - [`ElementAttributeExtractor`] collects one attribute of one element.
//!
//! Several extractors share a single pass through [`Fanout`]; [`extract`] drives any token
//! source into a handler and stops at the first source error.

mod attr;
mod categories;
mod driver;
pub mod elements;
mod handler;
mod metadata;
mod text;
mod url;

pub use crate::attr::{ElementAttributeExtractor, attr};
pub use crate::categories::{CategoryExtractor, Classification};
pub use crate::driver::{extract, extract_reader, extract_reader_with_config, extract_str};
pub use crate::handler::{DebugHandler, Fanout, FromFn, TokenHandler, describe_token, from_fn};
pub use crate::metadata::{
    Metadata, MetadataExtractor, MetadataField, NAMESPACE_PREFIX, NAMESPACED_URL_KEYS, SourceKind,
};
pub use crate::text::TextExtractor;

pub use html::{ReaderConfig, SourceError, Token};
