//! Markup tokenizer.
//!
//! A character-at-a-time state machine (see `states`) driven over a borrowed
//! `&str`. Tokens come out of an `Iterator` in document order; consecutive
//! character tokens are merged into one `Token::Text` run, which is flushed
//! before the next tag and at end of input.
//!
//! Recoverable problems are recorded as `ParseError`s and tokenization
//! continues. A malformed end-tag open (`</` followed by neither a letter nor
//! `>`) is fatal: the iterator yields one `Err` and then ends.

use crate::error::{FatalError, ParseError, ParseErrorCode};
use crate::types::{Attribute, TagToken, Token};
use memchr::memchr;
use states::{Action, InputChar, TokenizerState, transition};
use std::collections::VecDeque;

mod states;

#[derive(Clone, Debug)]
pub struct TokenizerConfig {
    /// Keep recoverable diagnostics in `Tokenizer::errors`. They are logged
    /// either way.
    pub collect_errors: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            collect_errors: true,
        }
    }
}

/// Minimal tokenizer instrumentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenizerStats {
    pub steps: u64,
    pub state_transitions: u64,
    pub tokens_emitted: u64,
}

pub struct Tokenizer<'a> {
    input: &'a str,
    cursor: usize,
    state: TokenizerState,
    config: TokenizerConfig,
    current_tag: Option<TagToken>,
    /// Byte offset of the most recent `<` seen in the data state.
    tag_start: usize,
    text: String,
    ready: VecDeque<Token>,
    actions: Vec<Action>,
    errors: Vec<ParseError>,
    finished: bool,
    stats: TokenizerStats,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self::with_config(input, TokenizerConfig::default())
    }

    pub fn with_config(input: &'a str, config: TokenizerConfig) -> Self {
        Self {
            input,
            cursor: 0,
            state: TokenizerState::Data,
            config,
            current_tag: None,
            tag_start: 0,
            text: String::new(),
            ready: VecDeque::new(),
            actions: Vec::with_capacity(4),
            errors: Vec::new(),
            finished: false,
            stats: TokenizerStats::default(),
        }
    }

    /// Diagnostics collected so far, in input order.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    pub fn stats(&self) -> TokenizerStats {
        self.stats
    }

    fn step(&mut self) -> Result<(), FatalError> {
        self.stats.steps = self.stats.steps.saturating_add(1);

        if self.state == TokenizerState::Data && self.cursor < self.input.len() {
            let rest = &self.input.as_bytes()[self.cursor..];
            // `<` is ASCII, so a hit is always a char boundary.
            match memchr(b'<', rest) {
                Some(0) => {}
                Some(rel) => {
                    self.text.push_str(&self.input[self.cursor..self.cursor + rel]);
                    self.cursor += rel;
                    return Ok(());
                }
                None => {
                    self.text.push_str(&self.input[self.cursor..]);
                    self.cursor = self.input.len();
                    return Ok(());
                }
            }
        }

        let position = self.cursor;
        let input = match self.input[self.cursor..].chars().next() {
            Some(c) => {
                if self.state == TokenizerState::Data && c == '<' {
                    self.tag_start = position;
                }
                self.cursor += c.len_utf8();
                InputChar::Char(c)
            }
            None => InputChar::Eof,
        };

        let mut actions = std::mem::take(&mut self.actions);
        actions.clear();
        let next = transition(self.state, input, &mut actions);
        let outcome = self.apply(&actions, position);
        self.actions = actions;
        outcome?;
        self.transition_to(next);

        if input == InputChar::Eof {
            self.flush_text();
            self.finished = true;
        }
        Ok(())
    }

    fn apply(&mut self, actions: &[Action], position: usize) -> Result<(), FatalError> {
        for action in actions {
            match *action {
                Action::EmitChar(c) => self.text.push(c),
                Action::CreateTag(kind) => {
                    self.current_tag = Some(TagToken::new(kind, self.tag_start));
                }
                Action::AppendTagName(c) => {
                    if let Some(tag) = self.current_tag.as_mut() {
                        tag.name.push(c);
                    }
                }
                Action::StartAttribute => {
                    if let Some(tag) = self.current_tag.as_mut() {
                        tag.attributes.push(Attribute::default());
                    }
                }
                Action::AppendAttributeName(c) => {
                    if let Some(attr) = self.current_attribute() {
                        attr.name.push(c);
                    }
                }
                Action::AppendAttributeValue(c) => {
                    if let Some(attr) = self.current_attribute() {
                        attr.value.push(c);
                    }
                }
                Action::SetSelfClosing => {
                    if let Some(tag) = self.current_tag.as_mut() {
                        tag.self_closing = true;
                    }
                }
                Action::EmitTag => {
                    if let Some(tag) = self.current_tag.take() {
                        self.flush_text();
                        self.emit(Token::Tag(tag));
                    }
                }
                Action::DropTag => {
                    self.current_tag = None;
                }
                Action::Error(code) => self.record_error(code, position),
                Action::MalformedEndTagOpen(found) => {
                    return Err(FatalError::MalformedEndTagOpen { position, found });
                }
            }
        }
        Ok(())
    }

    fn current_attribute(&mut self) -> Option<&mut Attribute> {
        self.current_tag
            .as_mut()
            .and_then(|tag| tag.attributes.last_mut())
    }

    fn record_error(&mut self, code: ParseErrorCode, position: usize) {
        log::debug!(
            target: "html.tokenizer",
            "parse error {} at byte {}",
            code.as_str(),
            position
        );
        if self.config.collect_errors {
            self.errors.push(ParseError { code, position });
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = std::mem::take(&mut self.text);
            self.emit(Token::Text(text));
        }
    }

    fn emit(&mut self, token: Token) {
        self.stats.tokens_emitted = self.stats.tokens_emitted.saturating_add(1);
        self.ready.push_back(token);
    }

    fn transition_to(&mut self, next: TokenizerState) {
        if self.state == next {
            return;
        }
        #[cfg(any(test, feature = "debug-stats"))]
        {
            log::trace!(
                target: "html.tokenizer",
                "state {:?} -> {:?} @{}",
                self.state,
                next,
                self.cursor
            );
        }
        self.state = next;
        self.stats.state_transitions = self.stats.state_transitions.saturating_add(1);
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, FatalError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.ready.pop_front() {
                return Some(Ok(token));
            }
            if self.finished {
                return None;
            }
            if let Err(err) = self.step() {
                self.finished = true;
                self.ready.clear();
                self.text.clear();
                return Some(Err(err));
            }
        }
    }
}

/// Tokenize a whole input, stopping at the first fatal error.
pub fn tokenize(input: &str) -> Result<Vec<Token>, FatalError> {
    Tokenizer::new(input).collect()
}
