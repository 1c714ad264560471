//! Selector terms and descendant matching.
//!
//! A selector is a whitespace-separated list of simple terms read as
//! descendant combinators: `#a .b p` matches a `p` with some `.b` ancestor
//! that in turn has some `#a` ancestor. A term is exactly one of `*`, `#id`,
//! `.class` or a tag name; compound forms like `p.x` are kept as a tag name
//! that no element carries.

use html::{Document, Id, traverse};
use std::fmt;
use std::ops::Add;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct Specificity(pub u32, pub u32, pub u32); // (id, class, type)

impl Specificity {
    /// Collapse to the single weight used for comparisons: `id*100 + class*10 + type`.
    pub fn value(self) -> u32 {
        self.0
            .saturating_mul(100)
            .saturating_add(self.1.saturating_mul(10))
            .saturating_add(self.2)
    }
}

impl Add for Specificity {
    type Output = Specificity;

    fn add(self, rhs: Specificity) -> Specificity {
        Specificity(self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorTerm {
    Universal,
    Id(String),
    /// Compared against the whole first `class` attribute, not its tokens.
    Class(String),
    /// Lowercase tag name.
    Type(String),
}

impl SelectorTerm {
    pub fn parse(raw: &str) -> SelectorTerm {
        if raw == "*" {
            return SelectorTerm::Universal;
        }
        if let Some(id) = raw.strip_prefix('#') {
            return SelectorTerm::Id(id.to_string());
        }
        if let Some(class) = raw.strip_prefix('.') {
            return SelectorTerm::Class(class.to_string());
        }
        SelectorTerm::Type(raw.to_ascii_lowercase())
    }

    pub fn specificity(&self) -> Specificity {
        match self {
            SelectorTerm::Universal => Specificity(0, 0, 0),
            SelectorTerm::Id(_) => Specificity(1, 0, 0),
            SelectorTerm::Class(_) => Specificity(0, 1, 0),
            SelectorTerm::Type(_) => Specificity(0, 0, 1),
        }
    }

    pub fn matches(&self, doc: &Document, element: Id) -> bool {
        let Some(name) = doc.tag_name(element) else {
            return false;
        };
        match self {
            SelectorTerm::Universal => true,
            SelectorTerm::Type(want) => name.eq_ignore_ascii_case(want),
            SelectorTerm::Id(want) => doc.attribute(element, "id") == Some(want.as_str()),
            SelectorTerm::Class(want) => doc.attribute(element, "class") == Some(want.as_str()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    /// Terms in source order; the last one is the subject.
    terms: Vec<SelectorTerm>,
    source: String,
}

impl Selector {
    pub fn parse(source: &str) -> Option<Selector> {
        let terms: Vec<SelectorTerm> = source.split_whitespace().map(SelectorTerm::parse).collect();
        if terms.is_empty() {
            return None;
        }
        Some(Selector {
            terms,
            source: source.split_whitespace().collect::<Vec<_>>().join(" "),
        })
    }

    pub fn terms(&self) -> &[SelectorTerm] {
        &self.terms
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn specificity(&self) -> Specificity {
        self.terms
            .iter()
            .fold(Specificity::default(), |acc, term| acc + term.specificity())
    }

    /// Right-to-left descendant match. The subject term must match `element`;
    /// each remaining term must match some strict ancestor further out than the
    /// one matched by the term to its right.
    pub fn matches(&self, doc: &Document, element: Id) -> bool {
        let mut terms = self.terms.iter().rev();
        let Some(subject) = terms.next() else {
            return false;
        };
        if !subject.matches(doc, element) {
            return false;
        }
        let mut ancestors = traverse::ancestors(doc, element);
        'terms: for term in terms {
            for ancestor in ancestors.by_ref() {
                if term.matches(doc, ancestor) {
                    continue 'terms;
                }
            }
            return false;
        }
        true
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::build_dom;

    fn find(doc: &Document, tag: &str) -> Id {
        traverse::elements_by_tag_name(doc, tag)[0]
    }

    #[test]
    fn specificity_collapses_to_weighted_sum() {
        assert_eq!(Selector::parse("#a .b").map(|s| s.specificity().value()), Some(110));
        assert_eq!(Selector::parse("div p").map(|s| s.specificity().value()), Some(2));
        assert_eq!(Selector::parse("*").map(|s| s.specificity().value()), Some(0));
        assert_eq!(Selector::parse("   "), None);
    }

    #[test]
    fn descendant_not_child() {
        let doc = build_dom("<div id=a><section><p class=b></p></section></div>").expect("parse");
        let p = find(&doc, "p");
        assert!(Selector::parse("#a .b").is_some_and(|s| s.matches(&doc, p)));
        assert!(Selector::parse("div section p").is_some_and(|s| s.matches(&doc, p)));
        assert!(Selector::parse("#a p").is_some_and(|s| s.matches(&doc, p)));
    }

    #[test]
    fn fails_when_ancestors_run_out() {
        let doc = build_dom("<div><p></p></div>").expect("parse");
        let p = find(&doc, "p");
        assert!(!Selector::parse("span div p").is_some_and(|s| s.matches(&doc, p)));
        assert!(!Selector::parse("p div").is_some_and(|s| s.matches(&doc, p)));
        // more terms than ancestors
        assert!(!Selector::parse("div div div p").is_some_and(|s| s.matches(&doc, p)));
    }

    #[test]
    fn ancestor_order_matters() {
        let doc = build_dom("<a><b><p></p></b></a>").expect("parse");
        let p = find(&doc, "p");
        assert!(Selector::parse("a b p").is_some_and(|s| s.matches(&doc, p)));
        assert!(!Selector::parse("b a p").is_some_and(|s| s.matches(&doc, p)));
    }

    #[test]
    fn class_is_whole_attribute_equality() {
        let doc = build_dom("<p class='x y'></p><span class=x class=y></span>").expect("parse");
        let p = find(&doc, "p");
        let span = find(&doc, "span");
        assert!(!SelectorTerm::parse(".x").matches(&doc, p));
        assert!(SelectorTerm::parse(".x y").matches(&doc, p));
        assert!(SelectorTerm::parse(".x").matches(&doc, span));
        assert!(!SelectorTerm::parse(".y").matches(&doc, span));
    }

    #[test]
    fn type_terms_ignore_case_and_universal_matches_all() {
        let doc = build_dom("<div></div>").expect("parse");
        let div = find(&doc, "div");
        assert!(SelectorTerm::parse("DIV").matches(&doc, div));
        assert!(SelectorTerm::parse("*").matches(&doc, div));
        assert!(!SelectorTerm::parse("div.x").matches(&doc, div));
        assert!(!SelectorTerm::parse("*").matches(&doc, doc.root()));
    }
}
