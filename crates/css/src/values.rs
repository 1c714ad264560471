//! Keyword values read by layout.
//!
//! Each `parse_*` is strict: it accepts the keywords it knows (case and
//! surrounding whitespace ignored) and returns `None` for everything else,
//! including `auto`, so the caller applies its own default.

use core_types::{ComputedStyle, Value, parse_numeric};

/// CSS `display` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Display {
    Block,
    Inline,
    InlineBlock,
    Flex,
    None,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexDirection {
    #[default]
    Row,
    RowReverse,
    Column,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_reverse(self) -> bool {
        matches!(self, FlexDirection::RowReverse | FlexDirection::ColumnReverse)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignItems {
    FlexStart,
    FlexEnd,
    Center,
    Baseline,
    #[default]
    Stretch,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignSelf {
    /// Defer to the container's `align-items`.
    #[default]
    Auto,
    Value(AlignItems),
}

impl AlignSelf {
    pub fn resolve(self, container: AlignItems) -> AlignItems {
        match self {
            AlignSelf::Auto => container,
            AlignSelf::Value(value) => value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlignContent {
    FlexStart,
    FlexEnd,
    Center,
    SpaceBetween,
    SpaceAround,
    #[default]
    Stretch,
}

fn keyword(value: &str) -> String {
    value.trim().to_ascii_lowercase()
}

pub fn parse_display(value: &str) -> Option<Display> {
    match keyword(value).as_str() {
        "block" => Some(Display::Block),
        "inline" => Some(Display::Inline),
        "inline-block" => Some(Display::InlineBlock),
        "flex" => Some(Display::Flex),
        "none" => Some(Display::None),
        _ => None,
    }
}

pub fn parse_flex_direction(value: &str) -> Option<FlexDirection> {
    match keyword(value).as_str() {
        "row" => Some(FlexDirection::Row),
        "row-reverse" => Some(FlexDirection::RowReverse),
        "column" => Some(FlexDirection::Column),
        "column-reverse" => Some(FlexDirection::ColumnReverse),
        _ => None,
    }
}

pub fn parse_flex_wrap(value: &str) -> Option<FlexWrap> {
    match keyword(value).as_str() {
        "nowrap" => Some(FlexWrap::NoWrap),
        "wrap" => Some(FlexWrap::Wrap),
        "wrap-reverse" => Some(FlexWrap::WrapReverse),
        _ => None,
    }
}

pub fn parse_justify_content(value: &str) -> Option<JustifyContent> {
    match keyword(value).as_str() {
        "flex-start" | "start" => Some(JustifyContent::FlexStart),
        "flex-end" | "end" => Some(JustifyContent::FlexEnd),
        "center" => Some(JustifyContent::Center),
        "space-between" => Some(JustifyContent::SpaceBetween),
        "space-around" => Some(JustifyContent::SpaceAround),
        _ => None,
    }
}

pub fn parse_align_items(value: &str) -> Option<AlignItems> {
    match keyword(value).as_str() {
        "flex-start" | "start" => Some(AlignItems::FlexStart),
        "flex-end" | "end" => Some(AlignItems::FlexEnd),
        "center" => Some(AlignItems::Center),
        "baseline" => Some(AlignItems::Baseline),
        "stretch" => Some(AlignItems::Stretch),
        _ => None,
    }
}

pub fn parse_align_self(value: &str) -> Option<AlignSelf> {
    if keyword(value) == "auto" {
        return Some(AlignSelf::Auto);
    }
    parse_align_items(value).map(AlignSelf::Value)
}

pub fn parse_align_content(value: &str) -> Option<AlignContent> {
    match keyword(value).as_str() {
        "flex-start" | "start" => Some(AlignContent::FlexStart),
        "flex-end" | "end" => Some(AlignContent::FlexEnd),
        "center" => Some(AlignContent::Center),
        "space-between" => Some(AlignContent::SpaceBetween),
        "space-around" => Some(AlignContent::SpaceAround),
        "stretch" => Some(AlignContent::Stretch),
        _ => None,
    }
}

/// Leading number of a `flex` shorthand: `1` -> 1, `2 1 auto` -> 2.
/// `none` and `auto` give no factor.
pub fn parse_flex_factor(value: &Value) -> Option<f32> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Text(raw) => raw.split_whitespace().next().and_then(parse_numeric),
    }
}

/// Flex factor of an item. A present `flex` decides on its own, keywords
/// included; `flex-grow` is read only when `flex` is absent. Zero and
/// negative factors count as none.
pub fn flex_factor(style: &ComputedStyle) -> Option<f32> {
    let factor = match style.value("flex") {
        Some(flex) => parse_flex_factor(flex),
        None => style.value("flex-grow").and_then(parse_flex_factor),
    };
    factor.filter(|f| *f > 0.0)
}

fn style_keyword<T>(style: &ComputedStyle, property: &str, parse: fn(&str) -> Option<T>) -> Option<T> {
    style.value(property).and_then(Value::as_text).and_then(parse)
}

pub fn display(style: &ComputedStyle) -> Option<Display> {
    style_keyword(style, "display", parse_display)
}

pub fn flex_direction(style: &ComputedStyle) -> FlexDirection {
    style_keyword(style, "flex-direction", parse_flex_direction).unwrap_or_default()
}

pub fn flex_wrap(style: &ComputedStyle) -> FlexWrap {
    style_keyword(style, "flex-wrap", parse_flex_wrap).unwrap_or_default()
}

pub fn justify_content(style: &ComputedStyle) -> JustifyContent {
    style_keyword(style, "justify-content", parse_justify_content).unwrap_or_default()
}

pub fn align_items(style: &ComputedStyle) -> AlignItems {
    style_keyword(style, "align-items", parse_align_items).unwrap_or_default()
}

pub fn align_self(style: &ComputedStyle) -> AlignSelf {
    style_keyword(style, "align-self", parse_align_self).unwrap_or_default()
}

pub fn align_content(style: &ComputedStyle) -> AlignContent {
    style_keyword(style, "align-content", parse_align_content).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case_and_whitespace() {
        assert_eq!(parse_display(" FLEX "), Some(Display::Flex));
        assert_eq!(parse_flex_direction("Row-Reverse"), Some(FlexDirection::RowReverse));
        assert_eq!(parse_justify_content("space-between"), Some(JustifyContent::SpaceBetween));
        assert_eq!(parse_align_self("auto"), Some(AlignSelf::Auto));
        assert_eq!(parse_align_self("center"), Some(AlignSelf::Value(AlignItems::Center)));
    }

    #[test]
    fn missing_or_auto_fall_back_to_defaults() {
        let mut style = ComputedStyle::new();
        style.set("flex-direction", "auto");
        assert_eq!(flex_direction(&style), FlexDirection::Row);
        assert_eq!(flex_wrap(&style), FlexWrap::NoWrap);
        assert_eq!(justify_content(&style), JustifyContent::FlexStart);
        assert_eq!(align_items(&style), AlignItems::Stretch);
        assert_eq!(align_content(&style), AlignContent::Stretch);
        assert_eq!(align_self(&style), AlignSelf::Auto);
        assert_eq!(display(&style), None);
    }

    #[test]
    fn flex_factor_prefers_flex_then_flex_grow() {
        let mut style = ComputedStyle::new();
        assert_eq!(flex_factor(&style), None);
        style.set("flex-grow", "3");
        assert_eq!(flex_factor(&style), Some(3.0));
        style.set("flex", "2 1 auto");
        assert_eq!(flex_factor(&style), Some(2.0));
        style.set("flex", 0.0);
        assert_eq!(flex_factor(&style), None);
    }

    #[test]
    fn flex_keyword_overrides_flex_grow() {
        let mut style = ComputedStyle::new();
        style.set("flex-grow", "3");
        style.set("flex", "none");
        assert_eq!(flex_factor(&style), None);
        style.set("flex", "auto");
        assert_eq!(flex_factor(&style), None);
    }
}
