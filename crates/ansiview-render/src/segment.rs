//! Parsed segments: a document range plus the style context it was
//! written in.
//!
//! Segments are produced one at a time by a parser and consumed
//! immediately by the renderer. Parsers that speak the untyped form (a
//! mapping of attribute names to `yes`/`no` and color names) can go through
//! [`SegmentContext::from_attributes`].

use std::collections::HashMap;
use std::ops::Range;

use crate::error::{RenderError, Result};
use crate::style::{Attribute, NamedColor, SegmentType};

/// Set of active text attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Attributes {
    pub bold: bool,
    pub dim: bool,
    pub underlined: bool,
    pub blink: bool,
    pub inverted: bool,
    pub hidden: bool,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, attribute: Attribute) -> bool {
        match attribute {
            Attribute::Bold => self.bold,
            Attribute::Dim => self.dim,
            Attribute::Underlined => self.underlined,
            Attribute::Blink => self.blink,
            Attribute::Inverted => self.inverted,
            Attribute::Hidden => self.hidden,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: bool) {
        let flag = match attribute {
            Attribute::Bold => &mut self.bold,
            Attribute::Dim => &mut self.dim,
            Attribute::Underlined => &mut self.underlined,
            Attribute::Blink => &mut self.blink,
            Attribute::Inverted => &mut self.inverted,
            Attribute::Hidden => &mut self.hidden,
        };
        *flag = value;
    }

    /// Sets an attribute, returning `self` for chaining.
    pub fn with(mut self, attribute: Attribute) -> Self {
        self.set(attribute, true);
        self
    }

    /// Active attributes in emission order.
    pub fn active(&self) -> impl Iterator<Item = Attribute> + '_ {
        Attribute::ALL.into_iter().filter(|a| self.is_set(*a))
    }
}

/// Style context of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentContext {
    pub kind: SegmentType,
    pub foreground: NamedColor,
    pub background: NamedColor,
    pub attributes: Attributes,
    /// The segment is the last one on its line.
    pub line_end: bool,
}

impl SegmentContext {
    /// A plain text context: default colors, no attributes.
    pub fn text() -> Self {
        Self {
            kind: SegmentType::Text,
            foreground: NamedColor::Default,
            background: NamedColor::Default,
            attributes: Attributes::default(),
            line_end: false,
        }
    }

    /// A context for an escape-sequence segment.
    pub fn escape_sequence() -> Self {
        Self {
            kind: SegmentType::EscapeSequence,
            ..Self::text()
        }
    }

    pub fn foreground(mut self, color: NamedColor) -> Self {
        self.foreground = color;
        self
    }

    pub fn background(mut self, color: NamedColor) -> Self {
        self.background = color;
        self
    }

    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.set(attribute, true);
        self
    }

    pub fn line_end(mut self, line_end: bool) -> Self {
        self.line_end = line_end;
        self
    }

    /// Builds a context from an attribute-name → value mapping.
    ///
    /// `type`, `foreground-color`, `background-color`, `inverted` and
    /// `line-end` are required. The remaining attribute flags (`bold`,
    /// `dim`, `underlined`, `blink`, `hidden`) default to `no`. Boolean
    /// values are `yes` or `no`.
    ///
    /// ```rust
    /// use ansiview_render::{NamedColor, SegmentContext};
    ///
    /// let ctx = SegmentContext::from_attributes([
    ///     ("type", "text"),
    ///     ("foreground-color", "red"),
    ///     ("background-color", "default"),
    ///     ("inverted", "no"),
    ///     ("line-end", "yes"),
    ///     ("bold", "yes"),
    /// ]).unwrap();
    ///
    /// assert_eq!(ctx.foreground, NamedColor::Red);
    /// assert!(ctx.attributes.bold);
    /// assert!(ctx.line_end);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingSegmentAttribute`] for an absent
    /// required key and [`RenderError::InvalidSegmentAttribute`] for a value
    /// outside its domain.
    pub fn from_attributes<I, K, V>(attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let map: HashMap<String, String> = attributes
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();

        let required = |name: &'static str| {
            map.get(name)
                .map(String::as_str)
                .ok_or(RenderError::MissingSegmentAttribute(name))
        };
        let color = |name: &'static str| -> Result<NamedColor> {
            let value = required(name)?;
            value.parse().map_err(|_| RenderError::InvalidSegmentAttribute {
                name: name.to_string(),
                value: value.to_string(),
            })
        };

        let mut attrs = Attributes::default();
        for attribute in Attribute::ALL {
            let name = attribute.as_str();
            let value = match attribute {
                Attribute::Inverted => Some(required(name)?),
                _ => map.get(name).map(String::as_str),
            };
            if let Some(value) = value {
                attrs.set(attribute, parse_flag(name, value)?);
            }
        }

        Ok(Self {
            kind: required("type")?.parse()?,
            foreground: color("foreground-color")?,
            background: color("background-color")?,
            attributes: attrs,
            line_end: parse_flag("line-end", required("line-end")?)?,
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(RenderError::InvalidSegmentAttribute {
            name: name.to_string(),
            value: other.to_string(),
        }),
    }
}

/// A parsed segment: a byte range into the document and its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub range: Range<usize>,
    pub context: SegmentContext,
}

impl Segment {
    pub fn new(range: Range<usize>, context: SegmentContext) -> Self {
        Self { range, context }
    }
}
