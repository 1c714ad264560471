//! Minimal CSS syntax: rules of `selectors { declarations }`.
//!
//! This is the stylesheet collaborator the page session calls for every
//! closed `<style>` element. It only splits text into rules; selector
//! meaning is decided later by `selector` and `cascade`.

/// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

impl Declaration {
    pub fn new(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            value: value.to_string(),
        }
    }
}

/// One rule as written: every selector of a comma list, and the declarations
/// in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    pub selectors: Vec<String>,
    pub declarations: Vec<Declaration>,
}

/// Anything that can turn stylesheet text into rules.
pub trait StylesheetParser {
    fn parse(&self, text: &str) -> Vec<StyleRule>;
}

/// The built-in parser; see `parse_stylesheet`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimpleStylesheetParser;

impl StylesheetParser for SimpleStylesheetParser {
    fn parse(&self, text: &str) -> Vec<StyleRule> {
        parse_stylesheet(text)
    }
}

impl<F> StylesheetParser for F
where
    F: Fn(&str) -> Vec<StyleRule>,
{
    fn parse(&self, text: &str) -> Vec<StyleRule> {
        self(text)
    }
}

// input: "div, #id { color: red; } .class { font-size: 12px; }"
// output: two rules, the first with selectors ["div", "#id"]
pub fn parse_stylesheet(input: &str) -> Vec<StyleRule> {
    let text = strip_comments(input);
    let mut rules = Vec::new();
    let mut rest = text.as_str();

    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        if rest.starts_with('@') {
            rest = skip_at_rule(rest);
            continue;
        }
        let Some(open) = rest.find('{') else {
            log::debug!(target: "css.syntax", "trailing text without a block ignored");
            break;
        };
        let prelude = &rest[..open];
        let body_and_rest = &rest[open + 1..];
        let (body, after) = match body_and_rest.find('}') {
            Some(close) => (&body_and_rest[..close], &body_and_rest[close + 1..]),
            None => (body_and_rest, ""),
        };
        rest = after;

        let selectors = parse_selector_list(prelude);
        if selectors.is_empty() {
            continue;
        }
        let declarations = parse_declarations(body);
        if declarations.is_empty() {
            continue;
        }
        rules.push(StyleRule {
            selectors,
            declarations,
        });
    }

    log::debug!(target: "css.syntax", "parsed {} rule(s)", rules.len());
    rules
}

// input: "color: red; font-size: 12px;"
// output: [("color", "red"), ("font-size", "12px")]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    input
        .split(';')
        .filter_map(|pair| {
            let (name, value) = pair.split_once(':')?;
            let property = name.trim().to_ascii_lowercase();
            let value = value.trim();
            if property.is_empty() || value.is_empty() {
                return None;
            }
            Some(Declaration {
                property,
                value: value.to_string(),
            })
        })
        .collect()
}

/// Split a comma list and collapse inner whitespace runs to one space.
pub fn parse_selector_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|sel| sel.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|sel| !sel.is_empty())
        .collect()
}

fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        out.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return out,
        }
    }
    out.push_str(rest);
    out
}

/// Skip `@name ...;` or `@name ... { ... }` including nested blocks.
fn skip_at_rule(input: &str) -> &str {
    let mut depth = 0usize;
    for (i, b) in input.bytes().enumerate() {
        match b {
            b';' if depth == 0 => {
                log::debug!(target: "css.syntax", "skipped at-rule statement");
                return &input[i + 1..];
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    log::debug!(target: "css.syntax", "skipped at-rule block");
                    return &input[i + 1..];
                }
            }
            _ => {}
        }
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rules_and_selector_lists() {
        let rules = parse_stylesheet("div, #id { color: red; } .class { font-size: 12px }");
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].selectors, vec!["div", "#id"]);
        assert_eq!(rules[0].declarations, vec![Declaration::new("color", "red")]);
        assert_eq!(rules[1].selectors, vec![".class"]);
        assert_eq!(
            rules[1].declarations,
            vec![Declaration::new("font-size", "12px")]
        );
    }

    #[test]
    fn normalises_descendant_whitespace_and_property_case() {
        let rules = parse_stylesheet("#a\n   .b\t p { Justify-Content :  space-between ; }");
        assert_eq!(rules[0].selectors, vec!["#a .b p"]);
        assert_eq!(
            rules[0].declarations,
            vec![Declaration::new("justify-content", "space-between")]
        );
    }

    #[test]
    fn comments_and_at_rules_are_skipped() {
        let css = "/* head */ @import url(x.css); @media screen { p { color: red } } \
                   p { /* inline */ width: 10px }";
        let rules = parse_stylesheet(css);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].selectors, vec!["p"]);
        assert_eq!(rules[0].declarations, vec![Declaration::new("width", "10px")]);
    }

    #[test]
    fn empty_and_broken_input_yield_no_rules() {
        assert!(parse_stylesheet("").is_empty());
        assert!(parse_stylesheet("   ").is_empty());
        assert!(parse_stylesheet("p { }").is_empty());
        assert!(parse_stylesheet("{ color: red }").is_empty());
        assert!(parse_stylesheet("p color red").is_empty());
        assert!(parse_stylesheet("/* never closed p { color: red }").is_empty());
    }

    #[test]
    fn unterminated_block_keeps_its_declarations() {
        let rules = parse_stylesheet("p { color: red");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].declarations, vec![Declaration::new("color", "red")]);
    }

    #[test]
    fn closures_are_stylesheet_parsers() {
        let fixed = |_: &str| {
            vec![StyleRule {
                selectors: vec!["*".to_string()],
                declarations: vec![Declaration::new("display", "flex")],
            }]
        };
        assert_eq!(fixed.parse("ignored").len(), 1);
        assert_eq!(SimpleStylesheetParser.parse("a{b:c}").len(), 1);
    }
}
