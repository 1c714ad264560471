//! TOML golden fixtures.
//!
//! A fixture file holds a `format` tag and a list of `[[cases]]`. Each case
//! names its input and the expected output lines; the line syntax belongs to
//! the test that consumes the file.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const GOLDEN_FORMAT_V1: &str = "golden-v1";

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FixtureFile {
    pub format: String,
    pub cases: Vec<FixtureCase>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct FixtureCase {
    pub id: String,
    pub input: String,
    /// Expected output lines (tokens, snapshot lines, ...).
    #[serde(default)]
    pub expected: Vec<String>,
    /// Expected non-fatal diagnostics, as `code@byte`.
    #[serde(default)]
    pub errors: Vec<String>,
    /// Expected fatal error message, if the input must be rejected.
    #[serde(default)]
    pub fatal: Option<String>,
}

#[derive(Clone, Debug)]
pub struct LoadedCase {
    pub file: PathBuf,
    pub case: FixtureCase,
}

impl LoadedCase {
    /// `file-stem::case-id`, unique across a fixture directory.
    pub fn name(&self) -> String {
        let stem = self
            .file
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("?");
        format!("{stem}::{}", self.case.id)
    }
}

pub fn load_fixture_file(path: &Path) -> FixtureFile {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read fixture {path:?}: {err}"));
    let file: FixtureFile = toml::from_str(&content)
        .unwrap_or_else(|err| panic!("failed to parse fixture {path:?}: {err}"));
    assert_eq!(
        file.format, GOLDEN_FORMAT_V1,
        "unsupported fixture format in {path:?}"
    );
    let mut seen = BTreeSet::new();
    for case in &file.cases {
        assert!(
            seen.insert(case.id.as_str()),
            "duplicate case id '{}' in {path:?}",
            case.id
        );
        assert!(
            case.fatal.is_none() || case.expected.is_empty(),
            "case '{}' in {path:?} expects both output and a fatal error",
            case.id
        );
    }
    file
}

/// Every case of every `*.toml` file in `dir`, files in name order.
pub fn load_fixture_dir(dir: &Path) -> Vec<LoadedCase> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|err| panic!("failed to read fixture dir {dir:?}: {err}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    assert!(!files.is_empty(), "no fixture files in {dir:?}");

    let mut out = Vec::new();
    for file in files {
        let parsed = load_fixture_file(&file);
        out.extend(parsed.cases.into_iter().map(|case| LoadedCase {
            file: file.clone(),
            case,
        }));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cases_with_defaults() {
        let file: FixtureFile = toml::from_str(
            r#"
format = "golden-v1"

[[cases]]
id = "plain"
input = "<p>"
expected = ["<p>"]

[[cases]]
id = "bad"
input = "</1"
fatal = "boom"
"#,
        )
        .expect("toml");
        assert_eq!(file.cases.len(), 2);
        assert!(file.cases[0].errors.is_empty());
        assert_eq!(file.cases[1].fatal.as_deref(), Some("boom"));
        assert!(file.cases[1].expected.is_empty());
    }
}
