use html::{FatalError, build_dom, traverse};
use html_test_support::fixtures::load_fixture_dir;
use html_test_support::{FixtureFilter, diff_lines};
use std::path::Path;

mod common;

#[test]
fn golden_tree_fixtures() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/tree");
    let filter = FixtureFilter::from_env("HTML_FIXTURE_FILTER");
    let mut ran = 0usize;
    for loaded in load_fixture_dir(&dir) {
        let name = loaded.name();
        if !filter.matches(&name) {
            continue;
        }
        ran += 1;
        let case = &loaded.case;
        match (&case.fatal, build_dom(&case.input)) {
            (Some(expected), Err(err)) => {
                assert_eq!(&err.to_string(), expected, "fatal message for {name}");
            }
            (Some(expected), Ok(_)) => panic!("{name}: expected fatal '{expected}'"),
            (None, Err(err)) => panic!("{name}: unexpected fatal error: {err}"),
            (None, Ok(doc)) => {
                let actual = common::snapshot_lines(&doc);
                assert!(
                    actual == case.expected,
                    "snapshot mismatch for {name}\n{}",
                    diff_lines(&case.expected, &actual)
                );
                let errors = common::format_errors(doc.errors());
                assert!(
                    errors == case.errors,
                    "diagnostic mismatch for {name}\n{}",
                    diff_lines(&case.errors, &errors)
                );
            }
        }
    }
    assert!(ran > 0, "no fixtures matched filter");
}

#[test]
fn element_count_matches_start_tags() {
    let input = "<section><h1 id=t>Title</h1><ul><li>a</li><li>b<br/></li></ul><img/></section>";
    let doc = build_dom(input).expect("parse");
    let start_tags = html::tokenize(input)
        .expect("tokenize")
        .iter()
        .filter(|t| matches!(t, html::Token::Tag(tag) if tag.kind == html::TagKind::StartTag))
        .count();
    assert_eq!(traverse::element_count(&doc), start_tags);
    assert_eq!(common::count_elements(&doc), 7);
}

#[test]
fn fatal_error_discards_partial_document() {
    let err = build_dom("<div>ok</div></div>").expect_err("second close has no open element");
    assert!(matches!(
        err,
        FatalError::TreeMismatch {
            expected: None,
            ..
        }
    ));
}

#[test]
fn parent_links_agree_with_children() {
    let doc = build_dom("<a><b>x</b><c><d></d></c></a>").expect("parse");
    for id in traverse::descendants(&doc, doc.root()) {
        for &child in doc.children(id) {
            assert_eq!(doc.parent(child), Some(id));
        }
    }
}
