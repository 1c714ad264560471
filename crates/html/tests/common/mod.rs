#![allow(dead_code)]

use html::{Document, Node, ParseError, TagKind, Token, dom_snapshot::DomSnapshot};
use html::dom_snapshot::DomSnapshotOptions;
use html_test_support::escape_text;

/// One line per token: `<name a="v">`, `<name/>`, `</name>` or `"text"`.
pub fn format_token(token: &Token) -> String {
    match token {
        Token::Text(text) => format!("\"{}\"", escape_text(text)),
        Token::Tag(tag) => {
            let mut line = String::from("<");
            if tag.kind == TagKind::EndTag {
                line.push('/');
            }
            line.push_str(&tag.name);
            for attr in &tag.attributes {
                line.push(' ');
                line.push_str(&attr.name);
                line.push_str("=\"");
                line.push_str(&escape_text(&attr.value));
                line.push('"');
            }
            if tag.self_closing {
                line.push('/');
            }
            line.push('>');
            line
        }
    }
}

pub fn format_errors(errors: &[ParseError]) -> Vec<String> {
    errors
        .iter()
        .map(|err| format!("{}@{}", err.code.as_str(), err.position))
        .collect()
}

pub fn snapshot_lines(doc: &Document) -> Vec<String> {
    DomSnapshot::new(doc, DomSnapshotOptions::default())
        .as_lines()
        .to_vec()
}

pub fn count_elements(doc: &Document) -> usize {
    doc.nodes().iter().filter(|n| matches!(n, Node::Element { .. })).count()
}
