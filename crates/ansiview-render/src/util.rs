//! HTML escaping helpers.

use std::borrow::Cow;
use std::path::Path;

/// Escapes text for embedding in HTML element content or attribute values.
///
/// Covers `&`, `<`, `>`, `"` and `'`.
///
/// # Example
///
/// ```rust
/// use ansiview_render::escape_html;
///
/// assert_eq!(escape_html("a < b && c"), "a &lt; b &amp;&amp; c");
/// ```
pub fn escape_html(text: &str) -> Cow<'_, str> {
    escape_with(text, false)
}

/// Escapes terminal text for display.
///
/// Like [`escape_html`], but spaces also become `&nbsp;` so runs of spaces
/// keep their fixed-width layout instead of collapsing.
///
/// ```rust
/// use ansiview_render::escape_terminal_text;
///
/// assert_eq!(escape_terminal_text("a  <b>"), "a&nbsp;&nbsp;&lt;b&gt;");
/// ```
pub fn escape_terminal_text(text: &str) -> Cow<'_, str> {
    escape_with(text, true)
}

fn escape_with(text: &str, spaces: bool) -> Cow<'_, str> {
    let needs_escape = |c: char| matches!(c, '&' | '<' | '>' | '"' | '\'') || (spaces && c == ' ');
    if !text.chars().any(needs_escape) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + text.len() / 2);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            ' ' if spaces => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Document title for a path: the file name without its directories.
pub fn title_for_path(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html_all_specials() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_html_keeps_spaces() {
        assert_eq!(escape_html("a b"), "a b");
    }

    #[test]
    fn test_escape_terminal_text_spaces() {
        assert_eq!(escape_terminal_text("   "), "&nbsp;&nbsp;&nbsp;");
        assert_eq!(escape_terminal_text("a\tb"), "a\tb");
    }

    #[test]
    fn test_plain_text_borrowed() {
        assert!(matches!(escape_terminal_text("plain"), Cow::Borrowed(_)));
        assert!(matches!(escape_html("with space"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_title_for_path() {
        assert_eq!(title_for_path(Path::new("/var/log/build.log")), "build.log");
        assert_eq!(title_for_path(Path::new("relative/out.ansi")), "out.ansi");
        assert_eq!(title_for_path(Path::new("plain.txt")), "plain.txt");
    }
}
