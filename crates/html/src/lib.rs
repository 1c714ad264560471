//! Markup tokenizer and tree builder.
//!
//! `tokenize` turns text into a stream of tag and text tokens; `TreeBuilder`
//! folds that stream into an arena-backed `Document`. Styling and layout hook
//! in through `TreeHooks` so this crate stays free of both.

pub mod dom_snapshot;
pub mod perf_fixtures;
pub mod traverse;

mod document;
mod dom_builder;
mod error;
mod tokenizer;
mod types;

pub use crate::document::Document;
pub use crate::dom_builder::{
    NoopHooks, TreeBuilder, TreeBuilderConfig, TreeHooks, build_dom, parse_with_hooks,
};
pub use crate::error::{FatalError, ParseError, ParseErrorCode};
pub use crate::tokenizer::{Tokenizer, TokenizerConfig, TokenizerStats, tokenize};
pub use crate::types::{Attribute, Id, Node, NodeId, TagKind, TagToken, Token};
