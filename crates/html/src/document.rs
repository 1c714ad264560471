//! Arena-owned node tree.
//!
//! Every node lives in `Document::nodes` and is addressed by its `Id`. Parent
//! links are plain ids used for upward lookups (ancestor chains for selector
//! matching); ownership stays with the arena, so dropping the `Document` frees
//! the whole tree at once.

use crate::error::ParseError;
use crate::types::{Attribute, Id, Node, find_attribute};
use core_types::{ComputedStyle, Rect};

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    errors: Vec<ParseError>,
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::Document {
                id: Id(0),
                children: Vec::new(),
            }],
            errors: Vec::new(),
        }
    }

    pub fn root(&self) -> Id {
        Id(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub fn get(&self, id: Id) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: Id) -> Option<&mut Node> {
        self.nodes.get_mut(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Non-fatal diagnostics recorded while this document was parsed.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub(crate) fn set_errors(&mut self, errors: Vec<ParseError>) {
        self.errors = errors;
    }

    /// Append a new element as the last child of `parent`.
    ///
    /// Panics if `parent` is a text node.
    pub fn append_element(&mut self, parent: Id, name: &str, attributes: Vec<Attribute>) -> Id {
        self.append(
            parent,
            |id| Node::Element {
                id,
                parent,
                name: name.to_string(),
                attributes,
                children: Vec::new(),
                computed_style: None,
                layout_box: None,
            },
        )
    }

    pub fn append_text(&mut self, parent: Id, text: &str) -> Id {
        self.append(parent, |id| Node::Text {
            id,
            parent,
            text: text.to_string(),
        })
    }

    fn append(&mut self, parent: Id, make: impl FnOnce(Id) -> Node) -> Id {
        let id = Id(self.nodes.len() as u32);
        let node = make(id);
        match self.nodes.get_mut(parent.index()).and_then(Node::children_mut) {
            Some(children) => children.push(id),
            None => unreachable!("node {parent:?} cannot have children"),
        }
        self.nodes.push(node);
        id
    }

    /// Append to an existing text node. Returns `false` if `id` is not text.
    pub fn push_text(&mut self, id: Id, more: &str) -> bool {
        match self.nodes.get_mut(id.index()) {
            Some(Node::Text { text, .. }) => {
                text.push_str(more);
                true
            }
            _ => false,
        }
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    pub fn last_child(&self, id: Id) -> Option<Id> {
        self.children(id).last().copied()
    }

    /// Direct element children in document order; text nodes are skipped.
    pub fn element_children(&self, id: Id) -> impl Iterator<Item = Id> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(move |&child| self.get(child).is_some_and(Node::is_element))
    }

    pub fn tag_name(&self, id: Id) -> Option<&str> {
        self.get(id).and_then(Node::tag_name)
    }

    pub fn attributes(&self, id: Id) -> &[Attribute] {
        match self.get(id) {
            Some(Node::Element { attributes, .. }) => attributes,
            _ => &[],
        }
    }

    /// First attribute named `name` on element `id`.
    pub fn attribute(&self, id: Id, name: &str) -> Option<&str> {
        find_attribute(self.attributes(id), name)
    }

    pub fn computed_style(&self, id: Id) -> Option<&ComputedStyle> {
        match self.get(id) {
            Some(Node::Element { computed_style, .. }) => computed_style.as_ref(),
            _ => None,
        }
    }

    pub fn computed_style_mut(&mut self, id: Id) -> Option<&mut ComputedStyle> {
        match self.get_mut(id) {
            Some(Node::Element { computed_style, .. }) => computed_style.as_mut(),
            _ => None,
        }
    }

    pub fn set_computed_style(&mut self, id: Id, style: ComputedStyle) {
        if let Some(Node::Element { computed_style, .. }) = self.get_mut(id) {
            *computed_style = Some(style);
        }
    }

    pub fn layout_box(&self, id: Id) -> Option<Rect> {
        match self.get(id) {
            Some(Node::Element { layout_box, .. }) => *layout_box,
            _ => None,
        }
    }

    pub fn set_layout_box(&mut self, id: Id, rect: Rect) {
        if let Some(Node::Element { layout_box, .. }) = self.get_mut(id) {
            *layout_box = Some(rect);
        }
    }

    /// Concatenated data of the direct text children of `id`.
    pub fn child_text(&self, id: Id) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            if let Some(Node::Text { text, .. }) = self.get(child) {
                out.push_str(text);
            }
        }
        out
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
