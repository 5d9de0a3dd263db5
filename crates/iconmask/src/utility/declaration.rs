//! Declaration blocks and the rules that carry them.

use std::fmt;

/// Escape `value` as a CSS identifier.
pub fn escape_identifier(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    cssparser::serialize_identifier(value, &mut out).expect("writing to a String cannot fail");
    out
}

/// Ordered list of CSS property/value pairs produced for one utility.
///
/// Order is significant: `mask-size` must follow the `mask` shorthand that
/// would otherwise reset it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UtilityDeclaration {
    properties: Vec<(String, String)>,
}

impl UtilityDeclaration {
    /// Create an empty declaration block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a property.
    pub fn push(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.properties.push((property.into(), value.into()));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(property, value);
        self
    }

    /// Value of the last occurrence of `property`.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.properties
            .iter()
            .rev()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over properties in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Whether the block is empty.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// A generated utility: class name plus declaration block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UtilityRule {
    /// Unescaped class name as written in markup (`icon-home`).
    pub class: String,
    /// The declarations.
    pub declaration: UtilityDeclaration,
}

impl UtilityRule {
    /// Create a rule.
    pub fn new(class: impl Into<String>, declaration: UtilityDeclaration) -> Self {
        Self {
            class: class.into(),
            declaration,
        }
    }

    /// Serialize as a CSS rule.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for UtilityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(".")?;
        cssparser::serialize_identifier(&self.class, f)?;
        f.write_str(" {\n")?;
        for (property, value) in self.declaration.iter() {
            writeln!(f, "  {property}: {value};")?;
        }
        f.write_str("}\n")
    }
}
