//! Stylesheet ingestion and the cascade.

pub mod cascade;
pub mod rules;
pub mod selector;
pub mod syntax;
pub mod values;

// Re-exports so other crates can just use `css::...` nicely.
pub use cascade::{apply_rules, cascade_element, compute_style};
pub use rules::{Rule, RuleSet};
pub use selector::{Selector, SelectorTerm, Specificity};
pub use syntax::{
    Declaration, SimpleStylesheetParser, StyleRule, StylesheetParser, parse_declarations,
    parse_stylesheet,
};
pub use values::{
    AlignContent, AlignItems, AlignSelf, Display, FlexDirection, FlexWrap, JustifyContent,
};
