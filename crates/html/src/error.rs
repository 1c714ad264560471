//! Parse errors for tokenization/tree-building.
//!
//! `ParseError` is a recoverable tokenizer diagnostic: the state machine applies
//! the recovery transition and keeps going. `FatalError` aborts the whole parse.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorCode {
    EofBeforeTagName,
    InvalidFirstCharacterOfTagName,
    MissingEndTagName,
    EofInTag,
    UnexpectedSolidusInTag,
    UnexpectedEqualsSignBeforeAttributeName,
    UnexpectedCharacterInAttributeName,
    MissingAttributeValue,
    UnexpectedCharacterInUnquotedAttributeValue,
    MissingWhitespaceBetweenAttributes,
    UnexpectedNullCharacter,
}

impl ParseErrorCode {
    /// WHATWG name of the error.
    pub fn as_str(self) -> &'static str {
        match self {
            ParseErrorCode::EofBeforeTagName => "eof-before-tag-name",
            ParseErrorCode::InvalidFirstCharacterOfTagName => "invalid-first-character-of-tag-name",
            ParseErrorCode::MissingEndTagName => "missing-end-tag-name",
            ParseErrorCode::EofInTag => "eof-in-tag",
            ParseErrorCode::UnexpectedSolidusInTag => "unexpected-solidus-in-tag",
            ParseErrorCode::UnexpectedEqualsSignBeforeAttributeName => {
                "unexpected-equals-sign-before-attribute-name"
            }
            ParseErrorCode::UnexpectedCharacterInAttributeName => {
                "unexpected-character-in-attribute-name"
            }
            ParseErrorCode::MissingAttributeValue => "missing-attribute-value",
            ParseErrorCode::UnexpectedCharacterInUnquotedAttributeValue => {
                "unexpected-character-in-unquoted-attribute-value"
            }
            ParseErrorCode::MissingWhitespaceBetweenAttributes => {
                "missing-whitespace-between-attributes"
            }
            ParseErrorCode::UnexpectedNullCharacter => "unexpected-null-character",
        }
    }
}

/// Non-fatal tokenizer diagnostic. `position` is a byte offset into the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub code: ParseErrorCode,
    pub position: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.code.as_str(), self.position)
    }
}

/// Terminal parse failure. No partial document survives it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FatalError {
    /// `</` followed by something that is neither an ASCII letter nor `>`.
    MalformedEndTagOpen { position: usize, found: char },
    /// End tag that does not close the current element.
    TreeMismatch {
        expected: Option<String>,
        found: String,
        position: usize,
    },
}

impl fmt::Display for FatalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FatalError::MalformedEndTagOpen { position, found } => {
                write!(f, "malformed end tag open: {found:?} at byte {position}")
            }
            FatalError::TreeMismatch {
                expected: Some(expected),
                found,
                position,
            } => write!(
                f,
                "end tag </{found}> does not match open element <{expected}> at byte {position}"
            ),
            FatalError::TreeMismatch {
                expected: None,
                found,
                position,
            } => write!(
                f,
                "end tag </{found}> with no open element at byte {position}"
            ),
        }
    }
}

impl std::error::Error for FatalError {}
