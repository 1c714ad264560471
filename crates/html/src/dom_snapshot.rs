use crate::document::Document;
use crate::types::{Id, Node};
use core_types::Value;
use std::fmt::{self, Write};
use std::sync::OnceLock;

/// Deterministic document serialization and equality rules for tests.
/// Not a public stable format.
///
/// Equivalence rules:
/// - Node kinds must match.
/// - Element names must match.
/// - Attribute list order is significant; names and values must match.
/// - Text nodes must match exactly.
/// - Computed styles and layout boxes only take part when the options say so.
#[derive(Clone, Copy, Debug)]
pub struct DomSnapshotOptions {
    pub ignore_ids: bool,
    pub include_style: bool,
    pub include_layout: bool,
}

impl Default for DomSnapshotOptions {
    fn default() -> Self {
        Self {
            ignore_ids: true,
            include_style: false,
            include_layout: false,
        }
    }
}

impl DomSnapshotOptions {
    /// Structure plus computed styles and layout boxes.
    pub fn full() -> Self {
        Self {
            include_style: true,
            include_layout: true,
            ..Self::default()
        }
    }
}

#[derive(Debug)]
pub struct DomSnapshot {
    lines: Vec<String>,
}

impl DomSnapshot {
    pub fn new(doc: &Document, options: DomSnapshotOptions) -> Self {
        Self::of_subtree(doc, doc.root(), options)
    }

    pub fn of_subtree(doc: &Document, id: Id, options: DomSnapshotOptions) -> Self {
        let mut lines = Vec::new();
        walk_snapshot(doc, id, &options, 0, &mut lines);
        Self { lines }
    }

    pub fn as_lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for DomSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i != 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct DomMismatch<'a> {
    path: String,
    detail: String,
    expected: String,
    actual: String,
    expected_doc: &'a Document,
    expected_id: Id,
    actual_doc: &'a Document,
    actual_id: Id,
    options: DomSnapshotOptions,
    expected_subtree: OnceLock<String>,
    actual_subtree: OnceLock<String>,
}

impl fmt::Display for DomMismatch<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected_subtree = self.expected_subtree.get_or_init(|| {
            DomSnapshot::of_subtree(self.expected_doc, self.expected_id, self.options).render()
        });
        let actual_subtree = self.actual_subtree.get_or_init(|| {
            DomSnapshot::of_subtree(self.actual_doc, self.actual_id, self.options).render()
        });
        writeln!(f, "DOM mismatch at {}: {}", self.path, self.detail)?;
        writeln!(f, "expected: {}", self.expected)?;
        writeln!(f, "actual:   {}", self.actual)?;
        writeln!(f, "expected subtree:\n{}", expected_subtree)?;
        writeln!(f, "actual subtree:\n{}", actual_subtree)?;
        Ok(())
    }
}

impl std::error::Error for DomMismatch<'_> {}

pub fn assert_dom_eq(expected: &Document, actual: &Document, options: DomSnapshotOptions) {
    if let Err(mismatch) = compare_dom(expected, actual, options) {
        panic!("{mismatch}");
    }
}

pub fn compare_dom<'a>(
    expected: &'a Document,
    actual: &'a Document,
    options: DomSnapshotOptions,
) -> Result<(), Box<DomMismatch<'a>>> {
    let side = Sides { expected, actual };
    let mut path = vec!["#document".to_string()];
    compare_nodes(&side, expected.root(), actual.root(), &options, &mut path)
}

struct Sides<'a> {
    expected: &'a Document,
    actual: &'a Document,
}

impl<'a> Sides<'a> {
    fn mismatch(
        &self,
        path: &[String],
        detail: &str,
        expected_id: Id,
        actual_id: Id,
        options: &DomSnapshotOptions,
    ) -> Box<DomMismatch<'a>> {
        Box::new(DomMismatch {
            path: format!("/{}", path.join("/")),
            detail: detail.to_string(),
            expected: truncate_line(format_node_line(self.expected, expected_id, options), 160),
            actual: truncate_line(format_node_line(self.actual, actual_id, options), 160),
            expected_doc: self.expected,
            expected_id,
            actual_doc: self.actual,
            actual_id,
            options: *options,
            expected_subtree: OnceLock::new(),
            actual_subtree: OnceLock::new(),
        })
    }
}

fn compare_nodes<'a>(
    sides: &Sides<'a>,
    expected_id: Id,
    actual_id: Id,
    options: &DomSnapshotOptions,
    path: &mut Vec<String>,
) -> Result<(), Box<DomMismatch<'a>>> {
    let fail = |path: &[String], detail: &str| {
        Err(sides.mismatch(path, detail, expected_id, actual_id, options))
    };
    let (Some(expected), Some(actual)) = (sides.expected.get(expected_id), sides.actual.get(actual_id))
    else {
        return fail(path, "missing node");
    };
    if !options.ignore_ids && expected_id != actual_id {
        return fail(path, "node id");
    }
    match (expected, actual) {
        (Node::Document { .. }, Node::Document { .. }) => {}
        (
            Node::Element {
                name: expected_name,
                attributes: expected_attrs,
                ..
            },
            Node::Element {
                name: actual_name,
                attributes: actual_attrs,
                ..
            },
        ) => {
            if expected_name != actual_name {
                return fail(path, "element name");
            }
            if expected_attrs.len() != actual_attrs.len() {
                return fail(path, "attribute count");
            }
            for (i, (exp, act)) in expected_attrs.iter().zip(actual_attrs.iter()).enumerate() {
                if exp.name != act.name {
                    return fail(path, &format!("attribute name at index {i}"));
                }
                if exp.value != act.value {
                    return fail(path, &format!("attribute value at index {i}"));
                }
            }
            if options.include_style
                && sides.expected.computed_style(expected_id) != sides.actual.computed_style(actual_id)
            {
                return fail(path, "computed style");
            }
            if options.include_layout
                && sides.expected.layout_box(expected_id) != sides.actual.layout_box(actual_id)
            {
                return fail(path, "layout box");
            }
        }
        (
            Node::Text {
                text: expected_text,
                ..
            },
            Node::Text {
                text: actual_text, ..
            },
        ) => {
            if expected_text != actual_text {
                return fail(path, "text");
            }
            return Ok(());
        }
        _ => return fail(path, "node kind"),
    }

    let expected_children = expected.children();
    let actual_children = actual.children();
    if expected_children.len() != actual_children.len() {
        return fail(
            path,
            &format!(
                "child count (expected {}, actual {})",
                expected_children.len(),
                actual_children.len()
            ),
        );
    }
    for (idx, (&exp, &act)) in expected_children.iter().zip(actual_children).enumerate() {
        path.push(format!("{}[{}]", node_label(sides.expected, exp), idx));
        let result = compare_nodes(sides, exp, act, options, path);
        path.pop();
        result?;
    }
    Ok(())
}

fn node_label(doc: &Document, id: Id) -> String {
    match doc.get(id) {
        Some(Node::Document { .. }) => "#document".to_string(),
        Some(Node::Element { name, .. }) => {
            let mut label = name.clone();
            let id_attr = doc.attribute(id, "id").filter(|v| !v.is_empty());
            let class_attr = doc.attribute(id, "class").filter(|v| !v.is_empty());
            if let Some(id_value) = id_attr {
                label.push('#');
                write_escaped(&mut label, id_value);
            } else if let Some(class_value) = class_attr {
                label.push('.');
                write_escaped(&mut label, class_value);
            }
            label
        }
        Some(Node::Text { .. }) => "#text".to_string(),
        None => "#missing".to_string(),
    }
}

fn truncate_line(mut line: String, max_len: usize) -> String {
    if line.len() > max_len {
        let mut cut = max_len.saturating_sub(3);
        while !line.is_char_boundary(cut) {
            cut -= 1;
        }
        line.truncate(cut);
        line.push_str("...");
    }
    line
}

fn walk_snapshot(
    doc: &Document,
    id: Id,
    options: &DomSnapshotOptions,
    depth: usize,
    out: &mut Vec<String>,
) {
    const INDENT_STEP: usize = 2;
    let mut line = " ".repeat(depth.saturating_mul(INDENT_STEP));
    write_node_line(&mut line, doc, id, options);
    out.push(line);
    for &child in doc.children(id) {
        walk_snapshot(doc, child, options, depth + 1, out);
    }
}

fn format_node_line(doc: &Document, id: Id, options: &DomSnapshotOptions) -> String {
    let mut line = String::new();
    write_node_line(&mut line, doc, id, options);
    line
}

fn write_node_line(out: &mut String, doc: &Document, id: Id, options: &DomSnapshotOptions) {
    match doc.get(id) {
        Some(Node::Document { .. }) => out.push_str("#document"),
        Some(Node::Element {
            name, attributes, ..
        }) => {
            out.push('<');
            out.push_str(name);
            for attr in attributes {
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                write_escaped(out, &attr.value);
                out.push('"');
            }
            out.push('>');
            if options.include_style {
                if let Some(style) = doc.computed_style(id) {
                    out.push_str(" style=[");
                    for (i, (property, entry)) in style.iter().enumerate() {
                        if i != 0 {
                            out.push_str("; ");
                        }
                        out.push_str(property);
                        out.push_str(": ");
                        match &entry.value {
                            Value::Number(n) => {
                                let _ = write!(out, "{n}");
                            }
                            Value::Text(text) => write_escaped(out, text),
                        }
                    }
                    out.push(']');
                }
            }
            if options.include_layout {
                if let Some(rect) = doc.layout_box(id) {
                    let _ = write!(
                        out,
                        " box=[{} {} {} {}]",
                        rect.x, rect.y, rect.width, rect.height
                    );
                }
            }
        }
        Some(Node::Text { text, .. }) => {
            out.push('"');
            write_escaped(out, text);
            out.push('"');
        }
        None => out.push_str("#missing"),
    }
    if !options.ignore_ids {
        let _ = write!(out, " id={}", id.0);
    }
}

fn write_escaped(out: &mut String, value: &str) {
    for ch in value.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ if ch.is_ascii() => out.push(ch),
            _ => {
                let _ = write!(out, "\\u{{{:X}}}", ch as u32);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DomSnapshot, DomSnapshotOptions, assert_dom_eq, compare_dom};
    use crate::document::Document;
    use crate::types::Attribute;
    use core_types::{ComputedStyle, Rect};

    fn sample(text: &str) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let div = doc.append_element(root, "div", vec![Attribute::new("id", "main")]);
        doc.append_text(div, text);
        doc
    }

    #[test]
    fn snapshot_renders_indented_tree() {
        let doc = sample("hi\n");
        assert_eq!(
            DomSnapshot::new(&doc, DomSnapshotOptions::default()).render(),
            "#document\n  <div id=\"main\">\n    \"hi\\n\""
        );
    }

    #[test]
    fn equal_documents_compare_equal() {
        assert_dom_eq(&sample("a"), &sample("a"), DomSnapshotOptions::default());
    }

    #[test]
    fn mismatch_path_includes_id_label() {
        let expected = sample("a");
        let actual = sample("b");
        let err = compare_dom(&expected, &actual, DomSnapshotOptions::default())
            .expect_err("expected mismatch");
        let message = err.to_string();
        assert!(message.contains("/#document/div#main[0]/#text[0]"), "{message}");
        assert!(message.contains(": text"), "{message}");
    }

    #[test]
    fn style_and_layout_only_compared_when_requested() {
        let expected = sample("a");
        let mut actual = sample("a");
        let div = actual.children(actual.root())[0];
        let mut style = ComputedStyle::new();
        style.set("width", 10.0);
        actual.set_computed_style(div, style);
        actual.set_layout_box(div, Rect::new(0.0, 0.0, 10.0, 5.0));

        assert!(compare_dom(&expected, &actual, DomSnapshotOptions::default()).is_ok());
        let err = compare_dom(&expected, &actual, DomSnapshotOptions::full())
            .expect_err("style differs");
        assert!(err.to_string().contains("computed style"));

        let rendered = DomSnapshot::new(&actual, DomSnapshotOptions::full()).render();
        assert!(rendered.contains("style=[width: 10]"), "{rendered}");
        assert!(rendered.contains("box=[0 0 10 5]"), "{rendered}");
    }
}
