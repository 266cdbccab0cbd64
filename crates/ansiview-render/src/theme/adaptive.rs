//! Theme detection for static exports.
//!
//! A live surface supplies its own theme marker class. A static export has
//! to pick one up front; [`detect_theme`] asks the OS whether it prefers a
//! light or dark scheme. Override detection in tests with
//! [`set_theme_detector`]:
//!
//! ```rust
//! use ansiview_render::{detect_theme, set_theme_detector, ThemeKind};
//!
//! set_theme_detector(|| ThemeKind::HighContrast);
//! assert_eq!(detect_theme(), ThemeKind::HighContrast);
//! ```

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use once_cell::sync::Lazy;
use std::sync::Mutex;

use super::theme::ThemeKind;

type ThemeDetector = fn() -> ThemeKind;

static THEME_DETECTOR: Lazy<Mutex<ThemeDetector>> = Lazy::new(|| Mutex::new(os_theme_detector));

/// Overrides the detector used by [`detect_theme`].
pub fn set_theme_detector(detector: ThemeDetector) {
    let mut guard = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Detects the theme a static export should use.
///
/// Falls back to [`ThemeKind::Dark`] when the OS does not report a
/// preference.
pub fn detect_theme() -> ThemeKind {
    let detector = THEME_DETECTOR
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_theme_detector() -> ThemeKind {
    match detect_os_theme() {
        Ok(OsThemeMode::Light) => ThemeKind::Light,
        Ok(OsThemeMode::Dark) => ThemeKind::Dark,
        Ok(OsThemeMode::Unspecified) => ThemeKind::Dark,
        Err(err) => {
            tracing::debug!(error = %err, "OS theme detection failed, using dark");
            ThemeKind::Dark
        }
    }
}
