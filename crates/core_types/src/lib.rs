use std::collections::BTreeMap;

/// A property value as stored in a computed style.
///
/// The cascade stores declarations verbatim as `Text`; layout rewrites the
/// numeric-looking ones (`12`, `12px`) into `Number` when it reads them.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(f32),
    Text(String),
}

impl Value {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(raw) => parse_numeric(raw),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(raw) => Some(raw.as_str()),
            Value::Number(_) => None,
        }
    }

    /// Returns the value with unit-stripped numbers turned into `Number`.
    pub fn normalized(&self) -> Value {
        match self {
            Value::Text(raw) => match parse_numeric(raw) {
                Some(n) => Value::Number(n),
                None => self.clone(),
            },
            Value::Number(_) => self.clone(),
        }
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(raw: &str) -> Self {
        Value::Text(raw.to_string())
    }
}

impl From<String> for Value {
    fn from(raw: String) -> Self {
        Value::Text(raw)
    }
}

/// Parse a bare number or a number with a `px` suffix.
///
/// Anything else (`auto`, `50%`, `red`, empty) yields `None`.
pub fn parse_numeric(raw: &str) -> Option<f32> {
    let v = raw.trim();
    let digits = match v.len().checked_sub(2) {
        Some(at) if v.is_char_boundary(at) && v[at..].eq_ignore_ascii_case("px") => v[..at].trim_end(),
        _ => v,
    };
    let unsigned = digits
        .strip_prefix('-')
        .or_else(|| digits.strip_prefix('+'))
        .unwrap_or(digits);
    if unsigned.is_empty()
        || !unsigned.bytes().any(|b| b.is_ascii_digit())
        || !unsigned.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        || unsigned.bytes().filter(|&b| b == b'.').count() > 1
    {
        return None;
    }
    digits.parse::<f32>().ok().filter(|n| n.is_finite())
}

/// One resolved declaration together with the rule that won it.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleValue {
    pub value: Value,
    pub specificity: u32,
    pub source_selector: String,
}

/// Per-element property map produced by the cascade.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComputedStyle {
    properties: BTreeMap<String, StyleValue>,
}

impl ComputedStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a declaration unless an equal-or-higher specificity already owns
    /// the property. Returns whether the value was written.
    pub fn apply(
        &mut self,
        property: &str,
        value: Value,
        specificity: u32,
        source_selector: &str,
    ) -> bool {
        if let Some(existing) = self.properties.get(property) {
            if existing.specificity >= specificity {
                return false;
            }
        }
        self.properties.insert(
            property.to_string(),
            StyleValue {
                value,
                specificity,
                source_selector: source_selector.to_string(),
            },
        );
        true
    }

    /// Unconditionally set a property (used by tests and programmatic styling).
    pub fn set(&mut self, property: &str, value: impl Into<Value>) {
        self.properties.insert(
            property.to_string(),
            StyleValue {
                value: value.into(),
                specificity: 0,
                source_selector: String::new(),
            },
        );
    }

    pub fn get(&self, property: &str) -> Option<&StyleValue> {
        self.properties.get(property)
    }

    pub fn value(&self, property: &str) -> Option<&Value> {
        self.properties.get(property).map(|entry| &entry.value)
    }

    pub fn number(&self, property: &str) -> Option<f32> {
        self.value(property).and_then(Value::as_number)
    }

    /// Trimmed, lowercased keyword text for `property`.
    pub fn keyword(&self, property: &str) -> Option<String> {
        self.value(property)
            .and_then(Value::as_text)
            .map(|raw| raw.trim().to_ascii_lowercase())
    }

    /// Rewrite every numeric-looking `Text` value as `Number`.
    pub fn normalize_numbers(&mut self) {
        for entry in self.properties.values_mut() {
            if let Value::Text(_) = entry.value {
                entry.value = entry.value.normalized();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleValue)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A rectangle in CSS px, relative to the containing flex container.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}
