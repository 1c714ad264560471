//! Tree construction from the token stream.
//!
//! The builder keeps a stack of open elements rooted at the document node.
//! Start tags append an element under the current node and, unless
//! self-closing, push it. End tags must name the current node exactly; there
//! is no implied closing and no misnesting recovery. Elements still open at end
//! of input simply stay open.
//!
//! Styling and layout are not this crate's business. The builder reports the
//! three points where they plug in (element inserted, stylesheet closed,
//! element closed) through `TreeHooks`.

use crate::document::Document;
use crate::error::{FatalError, ParseError};
use crate::tokenizer::{Tokenizer, TokenizerConfig};
use crate::types::{Id, Node, TagKind, TagToken, Token};

#[derive(Clone, Debug)]
pub struct TreeBuilderConfig {
    /// Append text to the current node's trailing text child instead of
    /// creating a sibling text node.
    pub coalesce_text: bool,
}

impl Default for TreeBuilderConfig {
    fn default() -> Self {
        Self {
            coalesce_text: true,
        }
    }
}

/// Callbacks fired during tree construction.
///
/// Each hook gets the document as it stands at that point: `element_inserted`
/// sees the new element with its ancestors but none of its descendants, and
/// `element_closed` sees the element with its complete subtree.
pub trait TreeHooks {
    fn element_inserted(&mut self, _doc: &mut Document, _id: Id) {}

    /// Called with the text content of a `style` element as it closes.
    fn stylesheet_closed(&mut self, _doc: &Document, _id: Id, _text: &str) {}

    fn element_closed(&mut self, _doc: &mut Document, _id: Id) {}
}

/// Hooks that do nothing; plain structural parsing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopHooks;

impl TreeHooks for NoopHooks {}

pub struct TreeBuilder<H = NoopHooks> {
    config: TreeBuilderConfig,
    doc: Document,
    open_elements: Vec<Id>,
    hooks: H,
}

impl TreeBuilder<NoopHooks> {
    pub fn new(config: TreeBuilderConfig) -> Self {
        Self::with_hooks(config, NoopHooks)
    }
}

impl<H: TreeHooks> TreeBuilder<H> {
    pub fn with_hooks(config: TreeBuilderConfig, hooks: H) -> Self {
        let doc = Document::new();
        let root = doc.root();
        Self {
            config,
            doc,
            open_elements: vec![root],
            hooks,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn current_node(&self) -> Id {
        self.open_elements
            .last()
            .copied()
            .unwrap_or_else(|| self.doc.root())
    }

    pub fn push_token(&mut self, token: Token) -> Result<(), FatalError> {
        match token {
            Token::Text(text) => {
                self.insert_text(&text);
                Ok(())
            }
            Token::Tag(tag) => match tag.kind {
                TagKind::StartTag => {
                    self.insert_element(tag);
                    Ok(())
                }
                TagKind::EndTag => self.close_element(&tag),
            },
        }
    }

    /// Hand back the document, attaching the tokenizer's diagnostics.
    pub fn finish(mut self, errors: Vec<ParseError>) -> (Document, H) {
        if self.open_elements.len() > 1 {
            log::debug!(
                target: "html.tree_builder",
                "{} element(s) left open at end of input",
                self.open_elements.len() - 1
            );
        }
        self.doc.set_errors(errors);
        (self.doc, self.hooks)
    }

    fn insert_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let parent = self.current_node();
        if self.config.coalesce_text {
            if let Some(last) = self.doc.last_child(parent) {
                if self.doc.push_text(last, text) {
                    return;
                }
            }
        }
        self.doc.append_text(parent, text);
    }

    fn insert_element(&mut self, tag: TagToken) {
        let parent = self.current_node();
        let id = self.doc.append_element(parent, &tag.name, tag.attributes);
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(
            target: "html.tree_builder",
            "insert <{}> as {:?} under {:?} (self_closing={})",
            tag.name,
            id,
            parent,
            tag.self_closing
        );
        self.hooks.element_inserted(&mut self.doc, id);
        if !tag.self_closing {
            self.open_elements.push(id);
        }
    }

    fn close_element(&mut self, tag: &TagToken) -> Result<(), FatalError> {
        let current = self.current_node();
        let open_name = match self.doc.get(current) {
            Some(Node::Element { name, .. }) => Some(name.as_str()),
            _ => None,
        };
        if open_name != Some(tag.name.as_str()) {
            return Err(FatalError::TreeMismatch {
                expected: open_name.map(str::to_string),
                found: tag.name.clone(),
                position: tag.start,
            });
        }

        if tag.name == "style" {
            let css = self.doc.child_text(current);
            self.hooks.stylesheet_closed(&self.doc, current, &css);
        }
        self.hooks.element_closed(&mut self.doc, current);
        self.open_elements.pop();
        #[cfg(any(test, feature = "debug-stats"))]
        log::trace!(target: "html.tree_builder", "close <{}> {:?}", tag.name, current);
        Ok(())
    }
}

/// Drive the tokenizer into a tree builder with the given hooks.
pub fn parse_with_hooks<H: TreeHooks>(
    input: &str,
    tokenizer_config: TokenizerConfig,
    builder_config: TreeBuilderConfig,
    hooks: H,
) -> Result<(Document, H), FatalError> {
    let mut tokenizer = Tokenizer::with_config(input, tokenizer_config);
    let mut builder = TreeBuilder::with_hooks(builder_config, hooks);
    for token in tokenizer.by_ref() {
        builder.push_token(token?)?;
    }
    Ok(builder.finish(tokenizer.take_errors()))
}

/// Parse markup into a bare document: no styles, no layout.
pub fn build_dom(input: &str) -> Result<Document, FatalError> {
    parse_with_hooks(
        input,
        TokenizerConfig::default(),
        TreeBuilderConfig::default(),
        NoopHooks,
    )
    .map(|(doc, _)| doc)
}
