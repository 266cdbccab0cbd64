//! The three presentation themes.

use std::fmt;
use std::str::FromStr;

/// A presentation theme.
///
/// The rendering surface always carries exactly one theme marker class on an
/// ancestor element (`theme-dark`, `theme-light` or `theme-high-contrast`),
/// and theme-scoped rules are selected through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeKind {
    Dark,
    Light,
    HighContrast,
}

impl ThemeKind {
    /// All themes, in the order their rules are emitted.
    pub const ALL: [ThemeKind; 3] = [ThemeKind::Dark, ThemeKind::Light, ThemeKind::HighContrast];

    /// The configuration key for this theme's overrides.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
            ThemeKind::HighContrast => "high-contrast",
        }
    }

    /// The marker class carried by the rendering surface.
    pub fn class_name(self) -> &'static str {
        match self {
            ThemeKind::Dark => "theme-dark",
            ThemeKind::Light => "theme-light",
            ThemeKind::HighContrast => "theme-high-contrast",
        }
    }
}

impl fmt::Display for ThemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeKind::ALL
            .into_iter()
            .find(|theme| theme.as_str() == s)
            .ok_or_else(|| format!("unknown theme '{s}' (expected dark, light or high-contrast)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_names() {
        assert_eq!(ThemeKind::HighContrast.as_str(), "high-contrast");
        assert_eq!(ThemeKind::HighContrast.class_name(), "theme-high-contrast");
        assert_eq!(ThemeKind::Dark.to_string(), "dark");
    }

    #[test]
    fn test_theme_from_str() {
        for theme in ThemeKind::ALL {
            assert_eq!(theme.as_str().parse::<ThemeKind>(), Ok(theme));
        }
        assert!("solarized".parse::<ThemeKind>().is_err());
    }
}
