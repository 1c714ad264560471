use crate::rules::RuleSet;
use core_types::{ComputedStyle, Value};
use html::{Document, Id};

/// Resolve the style of `element` against every rule, in source order.
///
/// Each matching selector offers its rule's declarations at that selector's
/// specificity; a property is taken when it is unset or the offer is strictly
/// more specific than what is stored. Only the element and its ancestors are
/// consulted, so the result does not depend on siblings or descendants.
pub fn compute_style(doc: &Document, element: Id, rules: &RuleSet) -> ComputedStyle {
    let mut style = ComputedStyle::new();
    apply_rules(&mut style, doc, element, rules);
    style
}

pub fn apply_rules(style: &mut ComputedStyle, doc: &Document, element: Id, rules: &RuleSet) {
    for rule in rules {
        for selector in &rule.selectors {
            if !selector.matches(doc, element) {
                continue;
            }
            let specificity = selector.specificity().value();
            #[cfg(any(test, feature = "debug-stats"))]
            log::trace!(
                target: "css.cascade",
                "{:?} matched '{}' ({})",
                element,
                selector,
                specificity
            );
            for declaration in &rule.declarations {
                style.apply(
                    &declaration.property,
                    Value::Text(declaration.value.clone()),
                    specificity,
                    selector.source(),
                );
            }
        }
    }
}

/// Attach a computed style to a freshly inserted element.
///
/// Does nothing while the rule set is empty, so elements parsed before the
/// first stylesheet carry no computed style at all.
pub fn cascade_element(doc: &mut Document, element: Id, rules: &RuleSet) {
    if rules.is_empty() || doc.tag_name(element).is_none() {
        return;
    }
    let style = compute_style(doc, element, rules);
    log::debug!(
        target: "css.cascade",
        "{:?} <{}> resolved {} propert(ies)",
        element,
        doc.tag_name(element).unwrap_or_default(),
        style.len()
    );
    doc.set_computed_style(element, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_stylesheet;
    use html::{build_dom, traverse};

    fn rules(css: &str) -> RuleSet {
        let mut set = RuleSet::new();
        set.extend(parse_stylesheet(css));
        set
    }

    fn text(style: &ComputedStyle, property: &str) -> Option<String> {
        style
            .value(property)
            .and_then(Value::as_text)
            .map(str::to_string)
    }

    #[test]
    fn id_class_descendant_beats_class_regardless_of_order() {
        let doc = build_dom("<div id=\"a\"><div class=\"b\"></div></div>").expect("parse");
        let inner = doc.children(doc.children(doc.root())[0])[0];

        for css in [
            "#a .b { color: red } .b { color: blue }",
            ".b { color: blue } #a .b { color: red }",
        ] {
            let style = compute_style(&doc, inner, &rules(css));
            let entry = style.get("color").expect("color");
            assert_eq!(entry.value, Value::Text("red".to_string()), "{css}");
            assert_eq!(entry.specificity, 110, "{css}");
            assert_eq!(entry.source_selector, "#a .b", "{css}");
        }
    }

    #[test]
    fn equal_specificity_keeps_first_writer() {
        let doc = build_dom("<p class=x id=y></p>").expect("parse");
        let p = traverse::elements_by_tag_name(&doc, "p")[0];
        let style = compute_style(&doc, p, &rules(".x { color: red } .x { color: blue }"));
        assert_eq!(text(&style, "color").as_deref(), Some("red"));
        let style = compute_style(&doc, p, &rules("p { width: 1 } * { width: 2 } #y { width: 3 }"));
        assert_eq!(text(&style, "width").as_deref(), Some("3"));
    }

    #[test]
    fn comma_list_applies_each_selector() {
        let doc = build_dom("<p id=y></p>").expect("parse");
        let p = traverse::elements_by_tag_name(&doc, "p")[0];
        let style = compute_style(&doc, p, &rules("span, #y { color: red } p { color: blue }"));
        let entry = style.get("color").expect("color");
        assert_eq!(entry.specificity, 100);
        assert_eq!(entry.source_selector, "#y");
    }

    #[test]
    fn values_stay_raw_text() {
        let doc = build_dom("<p></p>").expect("parse");
        let p = traverse::elements_by_tag_name(&doc, "p")[0];
        let style = compute_style(&doc, p, &rules("p { width: 100px; display: flex }"));
        assert_eq!(style.value("width"), Some(&Value::Text("100px".to_string())));
        assert_eq!(style.number("width"), Some(100.0));
    }

    #[test]
    fn cascade_element_skips_when_no_rules() {
        let mut doc = build_dom("<p></p>").expect("parse");
        let p = traverse::elements_by_tag_name(&doc, "p")[0];
        cascade_element(&mut doc, p, &RuleSet::new());
        assert!(doc.computed_style(p).is_none());

        cascade_element(&mut doc, p, &rules("span { color: red }"));
        assert!(doc.computed_style(p).is_some_and(ComputedStyle::is_empty));
    }
}
