//! Tokenizer state machine definitions.
//!
//! `transition` is the whole state machine: a pure function from the current
//! state and one input character (or end-of-input) to the next state, with the
//! side effects described as `Action`s for the driver to apply. "Reconsume in
//! state X" is a direct recursive call with the same input, so no character
//! is dropped on a reconsuming transition. Every reconsume chain ends in a
//! state that consumes, which bounds the recursion depth.

use crate::error::ParseErrorCode;
use crate::types::TagKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenizerState {
    Data,
    TagOpen,
    EndTagOpen,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingStartTag,
}

/// One unit of tokenizer input. `Eof` never collides with a real character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputChar {
    Char(char),
    Eof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    EmitChar(char),
    CreateTag(TagKind),
    AppendTagName(char),
    StartAttribute,
    AppendAttributeName(char),
    AppendAttributeValue(char),
    SetSelfClosing,
    EmitTag,
    /// Discard the tag under construction (end-of-input inside a tag).
    DropTag,
    Error(ParseErrorCode),
    /// `</` followed by the given character; aborts tokenization.
    MalformedEndTagOpen(char),
}

fn is_tag_whitespace(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\u{000C}' | ' ')
}

pub fn transition(state: TokenizerState, input: InputChar, actions: &mut Vec<Action>) -> TokenizerState {
    use Action::*;
    use InputChar::{Char, Eof};
    use TokenizerState::*;

    match state {
        Data => match input {
            Eof => Data,
            Char('<') => TagOpen,
            Char(c) => {
                actions.push(EmitChar(c));
                Data
            }
        },

        TagOpen => match input {
            Char('/') => EndTagOpen,
            Char(c) if c.is_ascii_alphabetic() => {
                actions.push(CreateTag(TagKind::StartTag));
                transition(TagName, input, actions)
            }
            Eof => {
                actions.push(Error(ParseErrorCode::EofBeforeTagName));
                actions.push(EmitChar('<'));
                transition(Data, input, actions)
            }
            Char(_) => {
                actions.push(Error(ParseErrorCode::InvalidFirstCharacterOfTagName));
                actions.push(EmitChar('<'));
                transition(Data, input, actions)
            }
        },

        EndTagOpen => match input {
            Char(c) if c.is_ascii_alphabetic() => {
                actions.push(CreateTag(TagKind::EndTag));
                transition(TagName, input, actions)
            }
            Char('>') => {
                actions.push(Error(ParseErrorCode::MissingEndTagName));
                Data
            }
            Eof => {
                actions.push(Error(ParseErrorCode::EofBeforeTagName));
                actions.push(EmitChar('<'));
                actions.push(EmitChar('/'));
                transition(Data, input, actions)
            }
            Char(c) => {
                actions.push(MalformedEndTagOpen(c));
                Data
            }
        },

        TagName => match input {
            Char(c) if is_tag_whitespace(c) => BeforeAttributeName,
            Char('/') => SelfClosingStartTag,
            Char('>') => {
                actions.push(EmitTag);
                Data
            }
            Char('\0') => {
                actions.push(Error(ParseErrorCode::UnexpectedNullCharacter));
                actions.push(AppendTagName('\u{FFFD}'));
                TagName
            }
            Char(c) => {
                actions.push(AppendTagName(c.to_ascii_lowercase()));
                TagName
            }
            Eof => eof_in_tag(actions),
        },

        BeforeAttributeName => match input {
            Char(c) if is_tag_whitespace(c) => BeforeAttributeName,
            Char('/') | Char('>') | Eof => transition(AfterAttributeName, input, actions),
            Char('=') => {
                actions.push(Error(ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName));
                actions.push(StartAttribute);
                actions.push(AppendAttributeName('='));
                AttributeName
            }
            Char(_) => {
                actions.push(StartAttribute);
                transition(AttributeName, input, actions)
            }
        },

        AttributeName => match input {
            Char(c) if is_tag_whitespace(c) => transition(AfterAttributeName, input, actions),
            Char('/') | Char('>') | Eof => transition(AfterAttributeName, input, actions),
            Char('=') => BeforeAttributeValue,
            Char('\0') => {
                actions.push(Error(ParseErrorCode::UnexpectedNullCharacter));
                actions.push(AppendAttributeName('\u{FFFD}'));
                AttributeName
            }
            Char(c @ ('"' | '\'' | '<')) => {
                actions.push(Error(ParseErrorCode::UnexpectedCharacterInAttributeName));
                actions.push(AppendAttributeName(c));
                AttributeName
            }
            Char(c) => {
                actions.push(AppendAttributeName(c.to_ascii_lowercase()));
                AttributeName
            }
        },

        AfterAttributeName => match input {
            Char(c) if is_tag_whitespace(c) => AfterAttributeName,
            Char('/') => SelfClosingStartTag,
            Char('=') => BeforeAttributeValue,
            Char('>') => {
                actions.push(EmitTag);
                Data
            }
            Eof => eof_in_tag(actions),
            Char(_) => {
                actions.push(StartAttribute);
                transition(AttributeName, input, actions)
            }
        },

        BeforeAttributeValue => match input {
            Char(c) if is_tag_whitespace(c) => BeforeAttributeValue,
            Char('"') => AttributeValueDoubleQuoted,
            Char('\'') => AttributeValueSingleQuoted,
            Char('>') => {
                actions.push(Error(ParseErrorCode::MissingAttributeValue));
                actions.push(EmitTag);
                Data
            }
            _ => transition(AttributeValueUnquoted, input, actions),
        },

        AttributeValueDoubleQuoted => quoted_value(input, '"', AttributeValueDoubleQuoted, actions),

        AttributeValueSingleQuoted => quoted_value(input, '\'', AttributeValueSingleQuoted, actions),

        AttributeValueUnquoted => match input {
            Char(c) if is_tag_whitespace(c) => BeforeAttributeName,
            Char('>') => {
                actions.push(EmitTag);
                Data
            }
            Char('\0') => {
                actions.push(Error(ParseErrorCode::UnexpectedNullCharacter));
                actions.push(AppendAttributeValue('\u{FFFD}'));
                AttributeValueUnquoted
            }
            Char(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                actions.push(Error(ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue));
                actions.push(AppendAttributeValue(c));
                AttributeValueUnquoted
            }
            Char(c) => {
                actions.push(AppendAttributeValue(c));
                AttributeValueUnquoted
            }
            Eof => eof_in_tag(actions),
        },

        AfterAttributeValueQuoted => match input {
            Char(c) if is_tag_whitespace(c) => BeforeAttributeName,
            Char('/') => SelfClosingStartTag,
            Char('>') => {
                actions.push(EmitTag);
                Data
            }
            Eof => eof_in_tag(actions),
            Char(_) => {
                actions.push(Error(ParseErrorCode::MissingWhitespaceBetweenAttributes));
                transition(BeforeAttributeName, input, actions)
            }
        },

        SelfClosingStartTag => match input {
            Char('>') => {
                actions.push(SetSelfClosing);
                actions.push(EmitTag);
                Data
            }
            Eof => eof_in_tag(actions),
            Char(_) => {
                actions.push(Error(ParseErrorCode::UnexpectedSolidusInTag));
                transition(BeforeAttributeName, input, actions)
            }
        },
    }
}

fn quoted_value(
    input: InputChar,
    quote: char,
    current: TokenizerState,
    actions: &mut Vec<Action>,
) -> TokenizerState {
    match input {
        InputChar::Char(c) if c == quote => TokenizerState::AfterAttributeValueQuoted,
        InputChar::Char('\0') => {
            actions.push(Action::Error(ParseErrorCode::UnexpectedNullCharacter));
            actions.push(Action::AppendAttributeValue('\u{FFFD}'));
            current
        }
        InputChar::Char(c) => {
            actions.push(Action::AppendAttributeValue(c));
            current
        }
        InputChar::Eof => eof_in_tag(actions),
    }
}

fn eof_in_tag(actions: &mut Vec<Action>) -> TokenizerState {
    actions.push(Action::Error(ParseErrorCode::EofInTag));
    actions.push(Action::DropTag);
    TokenizerState::Data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(state: TokenizerState, input: InputChar) -> (TokenizerState, Vec<Action>) {
        let mut actions = Vec::new();
        let next = transition(state, input, &mut actions);
        (next, actions)
    }

    #[test]
    fn tag_open_reconsumes_letter_in_tag_name() {
        let (next, actions) = run(TokenizerState::TagOpen, InputChar::Char('D'));
        assert_eq!(next, TokenizerState::TagName);
        assert_eq!(
            actions,
            vec![Action::CreateTag(TagKind::StartTag), Action::AppendTagName('d')]
        );
    }

    #[test]
    fn tag_open_digit_emits_lt_and_reconsumes_in_data() {
        let (next, actions) = run(TokenizerState::TagOpen, InputChar::Char('1'));
        assert_eq!(next, TokenizerState::Data);
        assert_eq!(
            actions,
            vec![
                Action::Error(ParseErrorCode::InvalidFirstCharacterOfTagName),
                Action::EmitChar('<'),
                Action::EmitChar('1'),
            ]
        );
    }

    #[test]
    fn end_tag_open_non_letter_is_fatal() {
        let (_, actions) = run(TokenizerState::EndTagOpen, InputChar::Char('1'));
        assert_eq!(actions, vec![Action::MalformedEndTagOpen('1')]);
    }

    #[test]
    fn equals_before_attribute_name_starts_literal_attribute() {
        let (next, actions) = run(TokenizerState::BeforeAttributeName, InputChar::Char('='));
        assert_eq!(next, TokenizerState::AttributeName);
        assert_eq!(
            actions,
            vec![
                Action::Error(ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName),
                Action::StartAttribute,
                Action::AppendAttributeName('='),
            ]
        );
    }

    #[test]
    fn eof_inside_any_tag_state_drops_the_tag() {
        let tag_states = [
            TokenizerState::TagName,
            TokenizerState::BeforeAttributeName,
            TokenizerState::AttributeName,
            TokenizerState::AfterAttributeName,
            TokenizerState::BeforeAttributeValue,
            TokenizerState::AttributeValueDoubleQuoted,
            TokenizerState::AttributeValueSingleQuoted,
            TokenizerState::AttributeValueUnquoted,
            TokenizerState::AfterAttributeValueQuoted,
            TokenizerState::SelfClosingStartTag,
        ];
        for state in tag_states {
            let (next, actions) = run(state, InputChar::Eof);
            assert_eq!(next, TokenizerState::Data, "state {state:?}");
            assert!(actions.contains(&Action::DropTag), "state {state:?}: {actions:?}");
            assert!(!actions.contains(&Action::EmitTag), "state {state:?}: {actions:?}");
        }
    }

    #[test]
    fn unquoted_value_swallows_stray_quotes_and_equals() {
        for c in ['"', '\'', '<', '='] {
            let (next, actions) = run(TokenizerState::AttributeValueUnquoted, InputChar::Char(c));
            assert_eq!(next, TokenizerState::AttributeValueUnquoted);
            assert_eq!(actions.last(), Some(&Action::AppendAttributeValue(c)));
        }
    }

    #[test]
    fn closing_states_emit_on_gt() {
        for state in [
            TokenizerState::TagName,
            TokenizerState::AfterAttributeName,
            TokenizerState::BeforeAttributeValue,
            TokenizerState::AfterAttributeValueQuoted,
            TokenizerState::AttributeValueUnquoted,
            TokenizerState::BeforeAttributeName,
            TokenizerState::AttributeName,
        ] {
            let (next, actions) = run(state, InputChar::Char('>'));
            assert_eq!(next, TokenizerState::Data, "state {state:?}");
            assert_eq!(actions.last(), Some(&Action::EmitTag), "state {state:?}");
        }
    }
}
