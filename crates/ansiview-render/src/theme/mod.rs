//! Presentation themes.
//!
//! Every style key can carry separate overrides for the dark, light and
//! high-contrast themes. Rules for a themed key are scoped under the theme
//! marker class, so exactly one set applies at a time:
//!
//! ```css
//! .theme-dark .h { color: #cd3131; }
//! .theme-light .h { color: #cd3131; }
//! .theme-high-contrast .h { color: #cd0000; }
//! ```
//!
//! A live surface provides the marker class itself. Static exports put it on
//! `<body>`, using either an explicit theme or [`detect_theme`].

mod adaptive;
#[allow(clippy::module_inception)]
mod theme;

pub use adaptive::{detect_theme, set_theme_detector};
pub use theme::ThemeKind;
