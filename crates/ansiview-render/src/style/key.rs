//! The closed style-key vocabulary and its compact class tokens.
//!
//! Every visual aspect the renderer can emit is named by a [`StyleKey`]:
//!
//! - 4 structural keys: `foreground`, `background`, `text`, `escape-sequence`
//! - 36 color keys: `foreground-color-<name>` and `background-color-<name>`
//!   for each of the 18 [`NamedColor`]s
//! - 6 attribute keys: `attribute-<name>` for each [`Attribute`]
//!
//! Rendered markup carries one class per key on every text run, so the
//! canonical names are swapped for short tokens by a [`KeyCompactor`].
//!
//! ```rust
//! use ansiview_render::{KeyCompactor, NamedColor, StyleKey};
//!
//! let compactor = KeyCompactor::new();
//! let red = compactor.compact(StyleKey::ForegroundColor(NamedColor::Red));
//! assert_eq!(compactor.compact_name("foreground-color-red").unwrap(), red);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::RenderError;

/// Named terminal colors, in vocabulary order.
///
/// `Default` means "no explicit color". `Inverted` is the sentinel used when
/// inversion swapped a default color into place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedColor {
    Default,
    Inverted,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    LightGray,
    DarkGray,
    LightRed,
    LightGreen,
    LightYellow,
    LightBlue,
    LightMagenta,
    LightCyan,
    White,
}

impl NamedColor {
    /// All colors in vocabulary order.
    pub const ALL: [NamedColor; 18] = [
        NamedColor::Default,
        NamedColor::Inverted,
        NamedColor::Black,
        NamedColor::Red,
        NamedColor::Green,
        NamedColor::Yellow,
        NamedColor::Blue,
        NamedColor::Magenta,
        NamedColor::Cyan,
        NamedColor::LightGray,
        NamedColor::DarkGray,
        NamedColor::LightRed,
        NamedColor::LightGreen,
        NamedColor::LightYellow,
        NamedColor::LightBlue,
        NamedColor::LightMagenta,
        NamedColor::LightCyan,
        NamedColor::White,
    ];

    /// Canonical vocabulary name.
    pub fn as_str(self) -> &'static str {
        match self {
            NamedColor::Default => "default",
            NamedColor::Inverted => "inverted",
            NamedColor::Black => "black",
            NamedColor::Red => "red",
            NamedColor::Green => "green",
            NamedColor::Yellow => "yellow",
            NamedColor::Blue => "blue",
            NamedColor::Magenta => "magenta",
            NamedColor::Cyan => "cyan",
            NamedColor::LightGray => "light-gray",
            NamedColor::DarkGray => "dark-gray",
            NamedColor::LightRed => "light-red",
            NamedColor::LightGreen => "light-green",
            NamedColor::LightYellow => "light-yellow",
            NamedColor::LightBlue => "light-blue",
            NamedColor::LightMagenta => "light-magenta",
            NamedColor::LightCyan => "light-cyan",
            NamedColor::White => "white",
        }
    }

    /// Maps a 16-color palette index (as used by SGR `38;5;n`) to a color.
    ///
    /// Indices 0-7 are the normal colors, 8-15 the bright ones. Anything
    /// beyond the 16-color palette has no named equivalent.
    pub fn from_palette_index(index: u16) -> Option<Self> {
        let color = match index {
            0 => NamedColor::Black,
            1 => NamedColor::Red,
            2 => NamedColor::Green,
            3 => NamedColor::Yellow,
            4 => NamedColor::Blue,
            5 => NamedColor::Magenta,
            6 => NamedColor::Cyan,
            7 => NamedColor::LightGray,
            8 => NamedColor::DarkGray,
            9 => NamedColor::LightRed,
            10 => NamedColor::LightGreen,
            11 => NamedColor::LightYellow,
            12 => NamedColor::LightBlue,
            13 => NamedColor::LightMagenta,
            14 => NamedColor::LightCyan,
            15 => NamedColor::White,
            _ => return None,
        };
        Some(color)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NamedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamedColor {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedColor::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| RenderError::UnknownColor(s.to_string()))
    }
}

/// Text attributes, in the fixed order their classes are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Bold,
    Dim,
    Underlined,
    Blink,
    Inverted,
    Hidden,
}

impl Attribute {
    /// All attributes in emission order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Bold,
        Attribute::Dim,
        Attribute::Underlined,
        Attribute::Blink,
        Attribute::Inverted,
        Attribute::Hidden,
    ];

    /// Canonical vocabulary name, also the segment-context key.
    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Bold => "bold",
            Attribute::Dim => "dim",
            Attribute::Underlined => "underlined",
            Attribute::Blink => "blink",
            Attribute::Inverted => "inverted",
            Attribute::Hidden => "hidden",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of segment produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentType {
    /// Visible text.
    Text,
    /// A control sequence. Never rendered.
    EscapeSequence,
}

impl SegmentType {
    pub fn as_str(self) -> &'static str {
        match self {
            SegmentType::Text => "text",
            SegmentType::EscapeSequence => "escape-sequence",
        }
    }
}

impl fmt::Display for SegmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SegmentType {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(SegmentType::Text),
            "escape-sequence" => Ok(SegmentType::EscapeSequence),
            other => Err(RenderError::InvalidSegmentAttribute {
                name: "type".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// A canonical style identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKey {
    Foreground,
    Background,
    Segment(SegmentType),
    ForegroundColor(NamedColor),
    BackgroundColor(NamedColor),
    Attribute(Attribute),
}

const FOREGROUND_COLOR_PREFIX: &str = "foreground-color-";
const BACKGROUND_COLOR_PREFIX: &str = "background-color-";
const ATTRIBUTE_PREFIX: &str = "attribute-";

impl StyleKey {
    /// Number of keys in the vocabulary.
    pub const COUNT: usize = 4 + 2 * NamedColor::ALL.len() + Attribute::ALL.len();

    /// Every key, in vocabulary order.
    pub fn all() -> impl Iterator<Item = StyleKey> {
        let structural = [
            StyleKey::Foreground,
            StyleKey::Background,
            StyleKey::Segment(SegmentType::Text),
            StyleKey::Segment(SegmentType::EscapeSequence),
        ];
        structural
            .into_iter()
            .chain(NamedColor::ALL.into_iter().map(StyleKey::ForegroundColor))
            .chain(NamedColor::ALL.into_iter().map(StyleKey::BackgroundColor))
            .chain(Attribute::ALL.into_iter().map(StyleKey::Attribute))
    }

    /// Position of this key in vocabulary order.
    pub fn index(self) -> usize {
        let colors = NamedColor::ALL.len();
        match self {
            StyleKey::Foreground => 0,
            StyleKey::Background => 1,
            StyleKey::Segment(SegmentType::Text) => 2,
            StyleKey::Segment(SegmentType::EscapeSequence) => 3,
            StyleKey::ForegroundColor(color) => 4 + color.index(),
            StyleKey::BackgroundColor(color) => 4 + colors + color.index(),
            StyleKey::Attribute(attribute) => 4 + 2 * colors + attribute.index(),
        }
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleKey::Foreground => f.write_str("foreground"),
            StyleKey::Background => f.write_str("background"),
            StyleKey::Segment(kind) => f.write_str(kind.as_str()),
            StyleKey::ForegroundColor(color) => write!(f, "{FOREGROUND_COLOR_PREFIX}{color}"),
            StyleKey::BackgroundColor(color) => write!(f, "{BACKGROUND_COLOR_PREFIX}{color}"),
            StyleKey::Attribute(attribute) => write!(f, "{ATTRIBUTE_PREFIX}{attribute}"),
        }
    }
}

impl FromStr for StyleKey {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || RenderError::UnknownStyleKey(s.to_string());

        match s {
            "foreground" => return Ok(StyleKey::Foreground),
            "background" => return Ok(StyleKey::Background),
            "text" => return Ok(StyleKey::Segment(SegmentType::Text)),
            "escape-sequence" => return Ok(StyleKey::Segment(SegmentType::EscapeSequence)),
            _ => {}
        }

        if let Some(name) = s.strip_prefix(FOREGROUND_COLOR_PREFIX) {
            return name
                .parse()
                .map(StyleKey::ForegroundColor)
                .map_err(|_| unknown());
        }
        if let Some(name) = s.strip_prefix(BACKGROUND_COLOR_PREFIX) {
            return name
                .parse()
                .map(StyleKey::BackgroundColor)
                .map_err(|_| unknown());
        }
        if let Some(name) = s.strip_prefix(ATTRIBUTE_PREFIX) {
            return Attribute::ALL
                .into_iter()
                .find(|attribute| attribute.as_str() == name)
                .map(StyleKey::Attribute)
                .ok_or_else(unknown);
        }

        Err(unknown())
    }
}

/// Maps every [`StyleKey`] to a short, unique class token.
///
/// Built once from the fixed vocabulary and read-only afterwards. Tokens
/// follow vocabulary order (`a`, `b`, ... `z`, `aa`, `ab`, ...), so they are
/// stable across runs and valid CSS class names.
#[derive(Debug, Clone)]
pub struct KeyCompactor {
    tokens: Vec<String>,
}

impl KeyCompactor {
    pub fn new() -> Self {
        let tokens = StyleKey::all().map(|key| token_for(key.index())).collect();
        Self { tokens }
    }

    /// Returns the token for a key.
    pub fn compact(&self, key: StyleKey) -> &str {
        &self.tokens[key.index()]
    }

    /// Resolves a canonical key name (as found in configuration) to its token.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownStyleKey`] when `name` is not part of
    /// the vocabulary.
    pub fn compact_name(&self, name: &str) -> Result<&str, RenderError> {
        let key: StyleKey = name.parse()?;
        Ok(self.compact(key))
    }

    /// Iterates over `(key, token)` pairs in vocabulary order.
    pub fn entries(&self) -> impl Iterator<Item = (StyleKey, &str)> {
        StyleKey::all().zip(self.tokens.iter().map(String::as_str))
    }
}

impl Default for KeyCompactor {
    fn default() -> Self {
        Self::new()
    }
}

/// Bijective base-26 over `a-z`: 0 -> `a`, 25 -> `z`, 26 -> `aa`.
fn token_for(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        n -= 1;
        letters.push(char::from(b'a' + (n % 26) as u8));
        n /= 26;
    }
    letters.into_iter().rev().collect()
}
