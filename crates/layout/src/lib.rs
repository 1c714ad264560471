//! Flex layout for elements whose computed `display` is `flex`.
//!
//! Layout runs once per container, when its end tag closes it, and writes a
//! `layout_box` on the container and on each element child. Boxes are
//! relative to the container. A container nested inside another flex
//! container is laid out first, so its box size feeds the outer pass, and
//! the outer pass then overwrites that box with the item's final position.

pub mod axis;
pub mod flex;

pub use axis::{AxisRoles, Dimension, Edge};
pub use flex::{FlexContainer, FlexItem, FlexLayout, FlexLine, compute};

use core_types::{ComputedStyle, Rect};
use css::{Display, values};
use html::{Document, Id};

/// Non-negative length, or `None` for missing and `auto`.
fn length(style: &ComputedStyle, property: &str) -> Option<f32> {
    style.number(property).map(|v| v.max(0.0))
}

impl FlexContainer {
    pub fn from_style(style: &ComputedStyle) -> Self {
        Self {
            direction: values::flex_direction(style),
            wrap: values::flex_wrap(style),
            justify_content: values::justify_content(style),
            align_items: values::align_items(style),
            align_content: values::align_content(style),
            width: length(style, "width"),
            height: length(style, "height"),
        }
    }
}

impl FlexItem {
    pub fn from_style(style: Option<&ComputedStyle>, measured: Option<Rect>) -> Self {
        let Some(style) = style else {
            return Self {
                measured,
                ..Self::default()
            };
        };
        Self {
            width: length(style, "width"),
            height: length(style, "height"),
            measured,
            flex: values::flex_factor(style),
            align_self: values::align_self(style),
        }
    }
}

/// Lay out `container` if it is a flex container. Returns whether it was.
///
/// Numeric-looking style values of the container and its items are
/// normalized to numbers in place as a side effect.
pub fn layout_flex(doc: &mut Document, container: Id) -> bool {
    let params = match doc.computed_style_mut(container) {
        Some(style) => {
            style.normalize_numbers();
            if values::display(style) != Some(Display::Flex) {
                return false;
            }
            FlexContainer::from_style(style)
        }
        None => return false,
    };

    let children: Vec<Id> = doc.element_children(container).collect();
    let mut items = Vec::with_capacity(children.len());
    for &child in &children {
        if let Some(style) = doc.computed_style_mut(child) {
            style.normalize_numbers();
        }
        items.push(FlexItem::from_style(
            doc.computed_style(child),
            doc.layout_box(child),
        ));
    }

    let layout = compute(&params, &items);
    for (&child, rect) in children.iter().zip(&layout.items) {
        doc.set_layout_box(child, *rect);
    }
    doc.set_layout_box(container, Rect::new(0.0, 0.0, layout.width, layout.height));

    log::debug!(
        target: "layout.flex",
        "{:?} <{}> laid out {} item(s) in {} line(s) at {}x{}",
        container,
        doc.tag_name(container).unwrap_or_default(),
        children.len(),
        layout.lines.len(),
        layout.width,
        layout.height
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use html::traverse;

    fn style(pairs: &[(&str, &str)]) -> ComputedStyle {
        let mut style = ComputedStyle::new();
        for (property, value) in pairs {
            style.set(property, *value);
        }
        style
    }

    #[test]
    fn writes_boxes_for_container_and_children() {
        let mut doc = html::build_dom("<div><a></a>text<b></b></div>").expect("parse");
        let div = traverse::elements_by_tag_name(&doc, "div")[0];
        let a = traverse::elements_by_tag_name(&doc, "a")[0];
        let b = traverse::elements_by_tag_name(&doc, "b")[0];
        doc.set_computed_style(
            div,
            style(&[("display", "flex"), ("width", "500px"), ("justify-content", "space-between")]),
        );
        doc.set_computed_style(a, style(&[("width", "100"), ("height", "20")]));
        doc.set_computed_style(b, style(&[("width", "100"), ("height", "20")]));

        assert!(layout_flex(&mut doc, div));
        assert_eq!(doc.layout_box(div), Some(Rect::new(0.0, 0.0, 500.0, 20.0)));
        assert_eq!(doc.layout_box(a).map(|r| r.x), Some(0.0));
        assert_eq!(doc.layout_box(b).map(|r| r.x), Some(400.0));
        // normalized in place
        assert_eq!(
            doc.computed_style(div).and_then(|s| s.value("width")),
            Some(&core_types::Value::Number(500.0))
        );
    }

    #[test]
    fn ignores_non_flex_and_unstyled_elements() {
        let mut doc = html::build_dom("<div><p></p></div>").expect("parse");
        let div = traverse::elements_by_tag_name(&doc, "div")[0];
        assert!(!layout_flex(&mut doc, div));
        doc.set_computed_style(div, style(&[("display", "block"), ("width", "10")]));
        assert!(!layout_flex(&mut doc, div));
        assert!(doc.layout_box(div).is_none());
        let root = doc.root();
        assert!(!layout_flex(&mut doc, root));
    }

    #[test]
    fn unstyled_children_get_zero_sized_boxes() {
        let mut doc = html::build_dom("<div><p></p></div>").expect("parse");
        let div = traverse::elements_by_tag_name(&doc, "div")[0];
        let p = traverse::elements_by_tag_name(&doc, "p")[0];
        doc.set_computed_style(div, style(&[("display", "flex"), ("width", "auto")]));
        assert!(layout_flex(&mut doc, div));
        assert_eq!(doc.layout_box(p), Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
        assert_eq!(doc.layout_box(div), Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    }
}
