//! Removal of residual terminal control sequences.
//!
//! The segment parser already splits escape sequences into their own
//! segments, which are never rendered. This filter catches sequences that
//! still sit inside text segments. It matches well-formed shapes only:
//!
//! | Shape | Form |
//! |-------|------|
//! | CSI | `ESC [` parameters, intermediates, final byte `@`..`~` |
//! | OSC | `ESC ]` payload, terminated by BEL or `ESC \` |
//! | Charset designation | `ESC (`, `)`, `*` or `+` followed by a designator |
//! | DEC line attributes | `ESC #` followed by `3`..`8` |
//! | Single character | `ESC` followed by one of `7 8 = > c D E H M Z` |
//!
//! Anything else (a CSI without a final byte, an unterminated OSC, a bare
//! `ESC`) is left in place. Over-matching would eat visible text.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

const ESC: char = '\x1b';

const SEQUENCE_PATTERN: &str = concat!(
    r"\x1b\[[0-?]*[ -/]*[@-~]",
    "|",
    r"\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)",
    "|",
    r"\x1b[()*+][0-9A-Za-z]",
    "|",
    r"\x1b#[3-8]",
    "|",
    r"\x1b[78=>cDEHMZ]",
);

static SEQUENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(SEQUENCE_PATTERN).expect("escape sequence pattern is valid"));

static LEADING_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^(?:{SEQUENCE_PATTERN})")).expect("escape sequence pattern is valid")
});

/// Removes every well-formed escape sequence from `text`.
///
/// Returns the input unchanged (borrowed) when there is nothing to strip.
///
/// ```rust
/// use ansiview_render::strip_escapes;
///
/// assert_eq!(strip_escapes("\x1b[2Kdone"), "done");
/// assert_eq!(strip_escapes("[31m is not a sequence"), "[31m is not a sequence");
/// ```
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    if !text.contains(ESC) {
        return Cow::Borrowed(text);
    }
    SEQUENCE.replace_all(text, "")
}

/// Returns the byte length of the well-formed sequence at the start of
/// `text`, if there is one.
pub fn sequence_len(text: &str) -> Option<usize> {
    if !text.starts_with(ESC) {
        return None;
    }
    LEADING_SEQUENCE.find(text).map(|m| m.end())
}
