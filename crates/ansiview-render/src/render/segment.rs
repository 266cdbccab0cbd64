//! Rendering of single segments into nested span markup.

use crate::escape::strip_escapes;
use crate::segment::SegmentContext;
use crate::style::{KeyCompactor, NamedColor, SegmentType, StyleKey};
use crate::util::escape_terminal_text;

/// Line-break marker appended after a segment flagged `line_end`.
pub const LINE_BREAK: &str = "<br>";

/// Effective `(foreground, background)` colors of a segment.
///
/// Inversion swaps the two. A `default` color that ends up in either slot
/// after the swap becomes the `inverted` sentinel, since there is no
/// concrete color to swap in.
///
/// ```rust
/// use ansiview_render::{effective_colors, Attribute, NamedColor, SegmentContext};
///
/// let ctx = SegmentContext::text()
///     .foreground(NamedColor::Red)
///     .attribute(Attribute::Inverted);
/// assert_eq!(effective_colors(&ctx), (NamedColor::Inverted, NamedColor::Red));
/// ```
pub fn effective_colors(context: &SegmentContext) -> (NamedColor, NamedColor) {
    if !context.attributes.inverted {
        return (context.foreground, context.background);
    }

    let sentinel = |color: NamedColor| match color {
        NamedColor::Default => NamedColor::Inverted,
        other => other,
    };
    (sentinel(context.background), sentinel(context.foreground))
}

/// Turns segments into markup using compact class tokens.
#[derive(Debug, Clone, Copy)]
pub struct SegmentRenderer<'a> {
    compactor: &'a KeyCompactor,
}

impl<'a> SegmentRenderer<'a> {
    pub fn new(compactor: &'a KeyCompactor) -> Self {
        Self { compactor }
    }

    /// Renders one segment.
    ///
    /// Returns `None` for escape-sequence segments, which are never shown.
    /// Text is stripped of residual control sequences and escaped before it
    /// is wrapped as `<span class="BG"><span class="FG">TEXT</span></span>`.
    pub fn render(&self, text: &str, context: &SegmentContext) -> Option<String> {
        if context.kind == SegmentType::EscapeSequence {
            return None;
        }

        let (foreground, background) = effective_colors(context);
        let fg_classes = self.foreground_classes(context, foreground);
        let bg_classes = self.background_classes(background);
        let stripped = strip_escapes(text);
        let escaped = escape_terminal_text(&stripped);

        let mut out = String::with_capacity(
            escaped.len() + fg_classes.len() + bg_classes.len() + 48,
        );
        out.push_str("<span class=\"");
        out.push_str(&bg_classes);
        out.push_str("\"><span class=\"");
        out.push_str(&fg_classes);
        out.push_str("\">");
        out.push_str(&escaped);
        out.push_str("</span></span>");
        if context.line_end {
            out.push_str(LINE_BREAK);
        }
        Some(out)
    }

    /// `foreground`, segment type, foreground color, then active attributes
    /// in their fixed order.
    fn foreground_classes(&self, context: &SegmentContext, color: NamedColor) -> String {
        let keys = [
            StyleKey::Foreground,
            StyleKey::Segment(context.kind),
            StyleKey::ForegroundColor(color),
        ]
        .into_iter()
        .chain(context.attributes.active().map(StyleKey::Attribute));
        self.join(keys)
    }

    fn background_classes(&self, color: NamedColor) -> String {
        self.join([StyleKey::Background, StyleKey::BackgroundColor(color)])
    }

    fn join(&self, keys: impl IntoIterator<Item = StyleKey>) -> String {
        let mut classes = String::new();
        for key in keys {
            if !classes.is_empty() {
                classes.push(' ');
            }
            classes.push_str(self.compactor.compact(key));
        }
        classes
    }
}
