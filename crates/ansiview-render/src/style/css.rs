//! Serialization of property trees to CSS text.
//!
//! Scalars become declarations, nested mappings become blocks, `Null`
//! entries are skipped. Values are written as-is: they come from operator
//! configuration, never from document content.

use std::fmt::Write;

use super::properties::{StyleNode, StyleProperties};

const INDENT: &str = "  ";

/// Serializes a property tree into CSS.
///
/// ```rust
/// use ansiview_render::{to_css, StyleProperties};
///
/// let tree = StyleProperties::new()
///     .with(".h", StyleProperties::new().with("color", "#cd3131"));
///
/// assert_eq!(to_css(&tree), ".h {\n  color: #cd3131;\n}\n");
/// ```
pub fn to_css(tree: &StyleProperties) -> String {
    let mut out = String::new();
    write_block(&mut out, tree, 0);
    out
}

fn write_block(out: &mut String, props: &StyleProperties, depth: usize) {
    let indent = INDENT.repeat(depth);
    for (name, node) in props.iter() {
        match node {
            StyleNode::Null => {}
            StyleNode::Value(value) => {
                let _ = writeln!(out, "{indent}{name}: {value};");
            }
            StyleNode::Nested(inner) => {
                let _ = writeln!(out, "{indent}{name} {{");
                write_block(out, inner, depth + 1);
                let _ = writeln!(out, "{indent}}}");
            }
        }
    }
}
