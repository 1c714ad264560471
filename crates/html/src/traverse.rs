use crate::document::Document;
use crate::types::{Id, Node};

/// Pre-order walk of the subtree rooted at `start`, including `start`.
pub fn descendants(doc: &Document, start: Id) -> Vec<Id> {
    let mut out = Vec::new();
    let mut stack = vec![start];
    while let Some(id) = stack.pop() {
        out.push(id);
        for &child in doc.children(id).iter().rev() {
            stack.push(child);
        }
    }
    out
}

/// Element ancestors of `id`, nearest first. The document node is excluded.
pub fn ancestors(doc: &Document, id: Id) -> impl Iterator<Item = Id> + '_ {
    std::iter::successors(doc.parent(id), move |&current| doc.parent(current))
        .filter(move |&ancestor| doc.get(ancestor).is_some_and(Node::is_element))
}

/// First element in document order whose `id` attribute equals `value`.
pub fn find_element_by_id(doc: &Document, value: &str) -> Option<Id> {
    descendants(doc, doc.root())
        .into_iter()
        .find(|&id| doc.attribute(id, "id") == Some(value))
}

pub fn elements_by_tag_name(doc: &Document, name: &str) -> Vec<Id> {
    descendants(doc, doc.root())
        .into_iter()
        .filter(|&id| {
            doc.tag_name(id)
                .is_some_and(|tag| tag.eq_ignore_ascii_case(name))
        })
        .collect()
}

pub fn element_count(doc: &Document) -> usize {
    doc.nodes().iter().filter(|node| node.is_element()).count()
}
