#![no_main]

use html::{TagKind, Token, tokenize, traverse};
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 16 * 1024;

fuzz_target!(|data: &[u8]| {
    let slice = &data[..data.len().min(MAX_LEN)];
    let input = String::from_utf8_lossy(slice);

    let Ok(tokens) = tokenize(&input) else {
        return;
    };
    let Ok(doc) = page::parse_document(&input) else {
        return;
    };
    let start_tags = tokens
        .iter()
        .filter(|t| matches!(t, Token::Tag(tag) if tag.kind == TagKind::StartTag))
        .count();
    assert_eq!(traverse::element_count(&doc), start_tags);

    for id in traverse::descendants(&doc, doc.root()) {
        if let Some(rect) = doc.layout_box(id) {
            assert!(rect.width.is_finite() && rect.height.is_finite());
            assert!(rect.x.is_finite() && rect.y.is_finite());
        }
    }
});
