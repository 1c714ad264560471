//! Shared helpers for golden-fixture tests across the workspace.

pub mod fixtures;

use std::fmt::Write;

/// Lines of context shown on each side of the first differing line.
const DIFF_CONTEXT: usize = 2;
const MISSING: &str = "<missing>";

/// Quote-safe rendering of text for one-line fixture output. Control
/// characters become `\u{XX}`.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '"' => {
                out.push('\\');
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\u{{{:02X}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Human-readable report of where two line lists first diverge.
pub fn diff_lines(expected: &[String], actual: &[String]) -> String {
    fn line(lines: &[String], at: usize) -> &str {
        lines.get(at).map_or(MISSING, String::as_str)
    }
    let total = expected.len().max(actual.len());
    let first = (0..total).find(|&at| line(expected, at) != line(actual, at));

    let mut out = String::new();
    match first {
        Some(at) => {
            let from = at.saturating_sub(DIFF_CONTEXT);
            let to = (at + DIFF_CONTEXT + 1).min(total);
            let _ = writeln!(out, "first mismatch at line {} (showing {}..={}):", at + 1, from + 1, to);
            for n in from..to {
                let marker = if n == at { '>' } else { ' ' };
                let _ = writeln!(out, "{marker} {:>4}  expected: {}", n + 1, line(expected, n));
                let _ = writeln!(out, "{marker} {:>4}    actual: {}", n + 1, line(actual, n));
            }
        }
        None => out.push_str("no differing line\n"),
    }
    let _ = writeln!(out, "expected {} lines, actual {} lines", expected.len(), actual.len());
    out
}

/// Name filter read from an environment variable; an unset or empty variable
/// matches everything.
pub struct FixtureFilter {
    needle: Option<String>,
}

impl FixtureFilter {
    pub fn from_env(key: &str) -> Self {
        let needle = std::env::var(key).ok().filter(|value| !value.trim().is_empty());
        Self { needle }
    }

    pub fn matches(&self, name: &str) -> bool {
        self.needle
            .as_deref()
            .is_none_or(|needle| name.contains(needle.trim()))
    }
}
