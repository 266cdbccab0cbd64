//! The sample matrix: every foreground color against every attribute.
//!
//! Each line holds one foreground color rendered in each attribute, with
//! the SGR parameters as the visible label, so a rendered page can be
//! checked against a terminal by eye.

/// Normal then bright foreground codes.
pub const FOREGROUND_CODES: [u8; 16] = [
    30, 31, 32, 33, 34, 35, 36, 37, 90, 91, 92, 93, 94, 95, 96, 97,
];

/// Bold, dim, underlined, blink, inverted, hidden.
pub const ATTRIBUTE_CODES: [u8; 6] = [1, 2, 4, 5, 7, 8];

pub fn sample_text() -> String {
    let mut out = String::new();
    for fg in FOREGROUND_CODES {
        for style in ATTRIBUTE_CODES {
            out.push_str(&format!("\x1b[{style};{fg}m {style};{fg} \x1b[0m"));
        }
        out.push('\n');
    }
    out
}
