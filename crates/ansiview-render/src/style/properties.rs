//! Nested style property trees.
//!
//! A [`StyleProperties`] is an ordered mapping from names to [`StyleNode`]s.
//! A node is either a terminal declaration value, a nested mapping (which
//! becomes a nested selector block when emitted), or `Null` ("no override").
//!
//! Trees are usually read from YAML configuration:
//!
//! ```rust
//! use ansiview_render::{StyleNode, StyleProperties};
//!
//! let value: serde_yaml::Value = serde_yaml::from_str(r##"
//! color: "#cd3131"
//! font-family: [Menlo, monospace]
//! dark:
//!   color: white
//! "##).unwrap();
//!
//! let props = StyleProperties::from_yaml(&value).unwrap();
//! assert_eq!(props.get("font-family"), Some(&StyleNode::from("Menlo, monospace")));
//! assert!(matches!(props.get("dark"), Some(StyleNode::Nested(_))));
//! ```

use serde_yaml::Value;

/// One entry in a [`StyleProperties`] tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleNode {
    /// A declaration value, emitted as `name: value;`.
    Value(String),
    /// A nested block, emitted as `name { ... }`.
    Nested(StyleProperties),
    /// No override. Skipped on emission.
    Null,
}

impl StyleNode {
    /// Converts a YAML value into a node.
    ///
    /// Scalars become [`StyleNode::Value`], mappings become
    /// [`StyleNode::Nested`], and sequences of scalars are joined with `, `
    /// so font stacks can be written as lists.
    pub fn from_yaml(value: &Value) -> Self {
        match value {
            Value::Null => StyleNode::Null,
            Value::Mapping(_) => StyleProperties::from_yaml(value)
                .map(StyleNode::Nested)
                .unwrap_or(StyleNode::Null),
            Value::Sequence(items) => {
                let parts: Vec<String> = items.iter().filter_map(scalar_to_string).collect();
                StyleNode::Value(parts.join(", "))
            }
            Value::Tagged(tagged) => StyleNode::from_yaml(&tagged.value),
            scalar => scalar_to_string(scalar)
                .map(StyleNode::Value)
                .unwrap_or(StyleNode::Null),
        }
    }

    /// Returns the nested properties, if this is a block.
    pub fn as_nested(&self) -> Option<&StyleProperties> {
        match self {
            StyleNode::Nested(props) => Some(props),
            _ => None,
        }
    }
}

impl From<&str> for StyleNode {
    fn from(value: &str) -> Self {
        StyleNode::Value(value.to_string())
    }
}

impl From<String> for StyleNode {
    fn from(value: String) -> Self {
        StyleNode::Value(value)
    }
}

impl From<StyleProperties> for StyleNode {
    fn from(props: StyleProperties) -> Self {
        StyleNode::Nested(props)
    }
}

/// An insertion-ordered mapping from property or selector names to nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    entries: Vec<(String, StyleNode)>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning `self` for chaining.
    ///
    /// ```rust
    /// use ansiview_render::StyleProperties;
    ///
    /// let props = StyleProperties::new()
    ///     .with("color", "red")
    ///     .with(":hover", StyleProperties::new().with("color", "blue"));
    /// assert_eq!(props.len(), 2);
    /// ```
    pub fn with(mut self, name: impl Into<String>, node: impl Into<StyleNode>) -> Self {
        self.insert(name, node);
        self
    }

    /// Inserts an entry. An existing name keeps its position and takes the
    /// new node.
    pub fn insert(&mut self, name: impl Into<String>, node: impl Into<StyleNode>) {
        let name = name.into();
        let node = node.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = node,
            None => self.entries.push((name, node)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StyleNode> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, node)| node)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &StyleNode)> {
        self.entries.iter().map(|(name, node)| (name.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a tree from a YAML mapping. Returns `None` for any other value.
    ///
    /// Non-string keys (numbers, booleans) are stringified; keys that are
    /// themselves collections are dropped.
    pub fn from_yaml(value: &Value) -> Option<Self> {
        let Value::Mapping(mapping) = value else {
            return None;
        };

        let mut props = StyleProperties::new();
        for (key, value) in mapping {
            if let Some(name) = scalar_to_string(key) {
                props.insert(name, StyleNode::from_yaml(value));
            }
        }
        Some(props)
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        _ => None,
    }
}
