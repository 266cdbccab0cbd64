//! Streaming parser for ANSI-styled terminal text.
//!
//! [`AnsiParser`] walks a document once and yields [`Segment`]s in document
//! order: one per run of text and one per escape sequence. Text segments
//! carry the colors and attributes set by the SGR sequences before them;
//! escape-sequence segments mark the bytes to skip when rendering.
//!
//! # Example
//!
//! ```rust
//! use ansiview_parser::AnsiParser;
//! use ansiview_render::{NamedColor, SegmentType};
//!
//! let text = "\x1b[1;31mHi\x1b[0m\n";
//! let segments: Vec<_> = AnsiParser::new(text).collect();
//!
//! assert_eq!(segments.len(), 4);
//! assert_eq!(segments[0].context.kind, SegmentType::EscapeSequence);
//! assert_eq!(&text[segments[1].range.clone()], "Hi");
//! assert_eq!(segments[1].context.foreground, NamedColor::Red);
//! assert!(segments[1].context.attributes.bold);
//! assert!(segments[3].context.line_end);
//! ```
//!
//! # Lines
//!
//! Text is split at `\n` and `\r\n`; the line break itself belongs to no
//! segment. The last text segment of every terminated line has `line_end`
//! set, and a line that ends right after an escape sequence (or is empty)
//! gets an empty text segment to carry it. A final line without a line
//! break has no `line_end`.
//!
//! # Recognized codes
//!
//! | Codes | Effect |
//! |-------|--------|
//! | `0` | reset |
//! | `1` `2` `4` `5`/`6` `7` `8` | bold, dim, underlined, blink, inverted, hidden |
//! | `21`/`22` `24` `25` `27` `28` | clear the matching attributes |
//! | `30`-`37`, `90`-`97` | foreground |
//! | `40`-`47`, `100`-`107` | background |
//! | `39`, `49` | default foreground, background |
//! | `38;5;n`, `48;5;n`, `38:5:n`, `48:5:n` | palette color, for `n < 16` |
//!
//! Extended colors without a named equivalent are consumed and ignored, as
//! are parameters that are not valid codes.
//! Non-SGR sequences have no effect on style.

mod sgr;

use ansiview_render::escape::sequence_len;
use ansiview_render::{Segment, SegmentContext, SegmentType};

const ESC: char = '\x1b';

/// Pull-based segment parser over a document.
#[derive(Debug, Clone)]
pub struct AnsiParser<'a> {
    input: &'a str,
    pos: usize,
    style: SegmentContext,
}

impl<'a> AnsiParser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            pos: 0,
            style: SegmentContext::text(),
        }
    }

    /// The style that will apply to the next text segment.
    pub fn style(&self) -> &SegmentContext {
        &self.style
    }

    fn escape_segment(&mut self, len: usize) -> Segment {
        let start = self.pos;
        self.pos += len;

        let sequence = &self.input[start..self.pos];
        if let Some(params) = sgr::sgr_params(sequence) {
            sgr::apply(&mut self.style, params);
        }

        Segment::new(
            start..self.pos,
            SegmentContext {
                kind: SegmentType::EscapeSequence,
                line_end: false,
                ..self.style
            },
        )
    }

    /// Whether the escape sequences starting at `pos` run up to a `\n`.
    fn line_break_follows(&self, mut pos: usize) -> bool {
        while let Some(len) = sequence_len(&self.input[pos..]) {
            pos += len;
        }
        self.input[pos..].starts_with('\n')
    }

    /// Text up to the next escape or line break. `skip` bytes at the start
    /// are taken as text unconditionally (a lone ESC that starts no known
    /// sequence).
    fn text_segment(&mut self, skip: usize) -> Segment {
        let start = self.pos;
        let rest = &self.input[start + skip..];
        let stop = rest.find(['\n', ESC]).map(|i| start + skip + i);

        match stop {
            Some(newline) if self.input.as_bytes()[newline] == b'\n' => {
                let end = if newline > start && self.input.as_bytes()[newline - 1] == b'\r' {
                    newline - 1
                } else {
                    newline
                };
                self.pos = newline + 1;
                Segment::new(start..end, self.style.line_end(true))
            }
            Some(escape) => {
                let end = if escape > start
                    && self.input.as_bytes()[escape - 1] == b'\r'
                    && self.line_break_follows(escape)
                {
                    escape - 1
                } else {
                    escape
                };
                self.pos = escape;
                Segment::new(start..end, self.style)
            }
            None => {
                self.pos = self.input.len();
                Segment::new(start..self.pos, self.style)
            }
        }
    }
}

impl<'a> Iterator for AnsiParser<'a> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.input.len() {
            return None;
        }

        let remaining = &self.input[self.pos..];
        if remaining.starts_with(ESC) {
            return Some(match sequence_len(remaining) {
                Some(len) => self.escape_segment(len),
                None => self.text_segment(ESC.len_utf8()),
            });
        }
        Some(self.text_segment(0))
    }
}

/// The document text with every escape sequence removed and `\r\n`
/// normalized to `\n`.
///
/// ```rust
/// assert_eq!(ansiview_parser::plain_text("\x1b[32mok\x1b[0m\r\ndone"), "ok\ndone");
/// ```
pub fn plain_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for segment in AnsiParser::new(input) {
        if segment.context.kind == SegmentType::EscapeSequence {
            continue;
        }
        out.push_str(&input[segment.range]);
        if segment.context.line_end {
            out.push('\n');
        }
    }
    out
}
