use core_types::{ComputedStyle, Rect};

pub type NodeId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(pub NodeId);

impl Id {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TagKind {
    StartTag,
    EndTag,
}

/// Attribute as produced by the tokenizer.
///
/// Attributes on a tag are stored in encounter order and duplicates are kept;
/// lookups (`TagToken::attribute`, `Document::attribute`) are first-wins.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagToken {
    pub kind: TagKind,
    pub name: String,
    pub self_closing: bool,
    pub attributes: Vec<Attribute>,
    /// Byte offset of the opening `<`.
    pub start: usize,
}

impl TagToken {
    pub fn new(kind: TagKind, start: usize) -> Self {
        Self {
            kind,
            name: String::new(),
            self_closing: false,
            attributes: Vec::new(),
            start,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        find_attribute(&self.attributes, name)
    }
}

pub(crate) fn find_attribute<'a>(attributes: &'a [Attribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.name == name)
        .map(|attr| attr.value.as_str())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Token {
    Tag(TagToken),
    /// A run of consecutive character tokens.
    Text(String),
}

#[derive(Clone, Debug)]
pub enum Node {
    Document {
        id: Id,
        children: Vec<Id>,
    },
    Element {
        id: Id,
        parent: Id,
        name: String,
        attributes: Vec<Attribute>,
        children: Vec<Id>,
        computed_style: Option<ComputedStyle>,
        layout_box: Option<Rect>,
    },
    Text {
        id: Id,
        parent: Id,
        text: String,
    },
}

impl Node {
    pub fn id(&self) -> Id {
        match self {
            Node::Document { id, .. } => *id,
            Node::Element { id, .. } => *id,
            Node::Text { id, .. } => *id,
        }
    }

    pub fn parent(&self) -> Option<Id> {
        match self {
            Node::Document { .. } => None,
            Node::Element { parent, .. } | Node::Text { parent, .. } => Some(*parent),
        }
    }

    pub fn children(&self) -> &[Id] {
        match self {
            Node::Document { children, .. } | Node::Element { children, .. } => children,
            Node::Text { .. } => &[],
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<Id>> {
        match self {
            Node::Document { children, .. } => Some(children),
            Node::Element { children, .. } => Some(children),
            Node::Text { .. } => None,
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, Node::Element { .. })
    }

    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Node::Element { name, .. } => Some(name),
            _ => None,
        }
    }
}
