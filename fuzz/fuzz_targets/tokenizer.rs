#![no_main]

use html::{Token, Tokenizer};
use libfuzzer_sys::fuzz_target;

const MAX_LEN: usize = 64 * 1024;

fuzz_target!(|data: &[u8]| {
    let slice = &data[..data.len().min(MAX_LEN)];
    let input = String::from_utf8_lossy(slice);

    let mut tokenizer = Tokenizer::new(&input);
    for token in tokenizer.by_ref() {
        match token {
            Ok(Token::Text(text)) => assert!(!text.is_empty(), "empty text run"),
            Ok(Token::Tag(tag)) => assert!(tag.start < input.len()),
            Err(_) => break,
        }
    }
    for error in tokenizer.errors() {
        assert!(error.position <= input.len());
    }
});
