//! One parse of one document: the tree builder drives, and this session
//! styles each element as it is inserted, ingests `<style>` blocks as they
//! close and lays out flex containers as their end tags arrive.

use css::{RuleSet, SimpleStylesheetParser, StylesheetParser, cascade_element};
use html::{Document, Id, TokenizerConfig, TreeBuilderConfig, TreeHooks, parse_with_hooks};

use crate::error::PageError;

#[derive(Clone, Debug)]
pub struct ParseConfig {
    pub tokenizer: TokenizerConfig,
    pub builder: TreeBuilderConfig,
    /// Run flex layout on closing elements. The cascade runs regardless.
    pub layout: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            builder: TreeBuilderConfig::default(),
            layout: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub stylesheets: usize,
    pub rules: usize,
    pub styled_elements: usize,
    pub flex_containers: usize,
}

/// Owns the rule list for exactly one document. Rules only ever grow, and
/// only affect elements inserted after the `<style>` that carried them.
pub struct ParseSession<P = SimpleStylesheetParser> {
    config: ParseConfig,
    parser: P,
    rules: RuleSet,
    stats: SessionStats,
}

impl ParseSession<SimpleStylesheetParser> {
    pub fn new(config: ParseConfig) -> Self {
        Self::with_parser(config, SimpleStylesheetParser)
    }
}

impl<P: StylesheetParser> ParseSession<P> {
    pub fn with_parser(config: ParseConfig, parser: P) -> Self {
        Self {
            config,
            parser,
            rules: RuleSet::new(),
            stats: SessionStats::default(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    /// Parse `markup` to a styled, laid-out document. The session is handed
    /// back with its rules and counters.
    pub fn run(self, markup: &str) -> Result<(Document, Self), PageError> {
        let tokenizer = self.config.tokenizer.clone();
        let builder = self.config.builder.clone();
        match parse_with_hooks(markup, tokenizer, builder, self) {
            Ok((doc, session)) => {
                log::debug!(
                    target: "page.session",
                    "parsed {} node(s): {} rule(s) from {} stylesheet(s), {} flex container(s), {} diagnostic(s)",
                    doc.len(),
                    session.stats.rules,
                    session.stats.stylesheets,
                    session.stats.flex_containers,
                    doc.errors().len()
                );
                Ok((doc, session))
            }
            Err(err) => {
                log::warn!(target: "page.session", "{err}");
                Err(err.into())
            }
        }
    }
}

impl<P: StylesheetParser> TreeHooks for ParseSession<P> {
    fn element_inserted(&mut self, doc: &mut Document, id: Id) {
        cascade_element(doc, id, &self.rules);
        if doc.computed_style(id).is_some() {
            self.stats.styled_elements += 1;
        }
    }

    fn stylesheet_closed(&mut self, _doc: &Document, id: Id, text: &str) {
        let added = self.rules.extend(self.parser.parse(text));
        self.stats.stylesheets += 1;
        self.stats.rules += added;
        log::debug!(
            target: "page.session",
            "<style> {:?} added {} rule(s), {} in effect",
            id,
            added,
            self.rules.len()
        );
    }

    fn element_closed(&mut self, doc: &mut Document, id: Id) {
        if self.config.layout && layout::layout_flex(doc, id) {
            self.stats.flex_containers += 1;
        }
    }
}

/// Parse, style and lay out `markup` with the default configuration.
pub fn parse_document(markup: &str) -> Result<Document, PageError> {
    parse_document_with(markup, ParseConfig::default())
}

pub fn parse_document_with(markup: &str, config: ParseConfig) -> Result<Document, PageError> {
    ParseSession::new(config).run(markup).map(|(doc, _)| doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::{Declaration, StyleRule};
    use html::traverse;

    #[test]
    fn style_block_only_affects_later_elements() {
        let markup = "<body><p id=early></p><style>p { color: red }</style><p id=late></p></body>";
        let (doc, session) = ParseSession::new(ParseConfig::default())
            .run(markup)
            .expect("parse");
        let early = traverse::find_element_by_id(&doc, "early").expect("early");
        let late = traverse::find_element_by_id(&doc, "late").expect("late");
        assert!(doc.computed_style(early).is_none());
        assert_eq!(
            doc.computed_style(late).and_then(|s| s.keyword("color")).as_deref(),
            Some("red")
        );
        assert_eq!(session.stats().stylesheets, 1);
        assert_eq!(session.rules().len(), 1);
    }

    #[test]
    fn custom_parser_is_consulted() {
        let parser = |_: &str| {
            vec![StyleRule {
                selectors: vec!["*".to_string()],
                declarations: vec![Declaration::new("color", "green")],
            }]
        };
        let (doc, session) = ParseSession::with_parser(ParseConfig::default(), parser)
            .run("<style>ignored</style><a></a>")
            .expect("parse");
        let a = traverse::elements_by_tag_name(&doc, "a")[0];
        assert_eq!(
            doc.computed_style(a).and_then(|s| s.keyword("color")).as_deref(),
            Some("green")
        );
        assert_eq!(session.stats().rules, 1);
        assert_eq!(session.stats().styled_elements, 1);
    }

    #[test]
    fn layout_can_be_disabled() {
        let markup = "<style>div { display: flex; width: 100 }</style><div><p></p></div>";
        let config = ParseConfig {
            layout: false,
            ..ParseConfig::default()
        };
        let doc = parse_document_with(markup, config).expect("parse");
        let div = traverse::elements_by_tag_name(&doc, "div")[0];
        assert!(doc.computed_style(div).is_some());
        assert!(doc.layout_box(div).is_none());

        let doc = parse_document(markup).expect("parse");
        let div = traverse::elements_by_tag_name(&doc, "div")[0];
        assert!(doc.layout_box(div).is_some());
    }

    #[test]
    fn fatal_error_yields_no_document() {
        let err = parse_document("<div></span>").expect_err("mismatch");
        assert_eq!(err.position(), 5);
        assert!(err.to_string().starts_with("parse aborted: end tag </span>"));
    }
}
