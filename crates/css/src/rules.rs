use crate::selector::Selector;
use crate::syntax::{Declaration, StyleRule};

/// A rule with its selectors parsed once, at ingestion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    pub selectors: Vec<Selector>,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn compile(rule: StyleRule) -> Option<Rule> {
        let selectors: Vec<Selector> = rule
            .selectors
            .iter()
            .filter_map(|raw| Selector::parse(raw))
            .collect();
        if selectors.is_empty() || rule.declarations.is_empty() {
            return None;
        }
        Some(Rule {
            selectors,
            declarations: rule.declarations,
        })
    }
}

/// Append-only rule list owned by one parse session.
///
/// Source order is insertion order; nothing is ever removed, so a rule that
/// is present stays in effect for every element cascaded after it arrived.
#[derive(Clone, Debug, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rules in order, returning how many were usable.
    pub fn extend(&mut self, rules: impl IntoIterator<Item = StyleRule>) -> usize {
        let before = self.rules.len();
        self.rules.extend(rules.into_iter().filter_map(Rule::compile));
        self.rules.len() - before
    }

    pub fn push(&mut self, rule: StyleRule) -> bool {
        self.extend(std::iter::once(rule)) == 1
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
