//! Compilation of per-key, per-theme style settings into a selector tree.
//!
//! Each configured key maps to a [`ThemeOverrideSet`]. A set with no theme
//! keys applies everywhere and compiles to a single `.<token>` rule. A set
//! that names any theme compiles to exactly three rules, one per theme,
//! each scoped under the theme marker class. Themes that were not given (or
//! were given something other than a mapping) still get a rule, just an
//! empty one, so the active theme never falls through to an unrelated style.
//!
//! ```rust
//! use ansiview_render::{to_css, KeyCompactor, StyleProperties, StylesheetCompiler, ThemeOverrideSet};
//!
//! let compactor = KeyCompactor::new();
//! let settings = vec![(
//!     "attribute-bold".to_string(),
//!     ThemeOverrideSet::from_properties(StyleProperties::new().with("font-weight", "bold")),
//! )];
//!
//! let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();
//! assert_eq!(to_css(&tree), ".ao {\n  font-weight: bold;\n}\n");
//! ```

use crate::error::Result;
use crate::theme::ThemeKind;

use super::css::to_css;
use super::key::KeyCompactor;
use super::properties::{StyleNode, StyleProperties};

/// Per-theme properties of a themed style key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemedProperties {
    pub dark: Option<StyleProperties>,
    pub light: Option<StyleProperties>,
    pub high_contrast: Option<StyleProperties>,
}

impl ThemedProperties {
    pub fn get(&self, theme: ThemeKind) -> Option<&StyleProperties> {
        match theme {
            ThemeKind::Dark => self.dark.as_ref(),
            ThemeKind::Light => self.light.as_ref(),
            ThemeKind::HighContrast => self.high_contrast.as_ref(),
        }
    }

    /// Sets one theme's properties, returning `self` for chaining.
    pub fn with(mut self, theme: ThemeKind, props: StyleProperties) -> Self {
        let slot = match theme {
            ThemeKind::Dark => &mut self.dark,
            ThemeKind::Light => &mut self.light,
            ThemeKind::HighContrast => &mut self.high_contrast,
        };
        *slot = Some(props);
        self
    }
}

/// The appearance of one style key, either universal or per theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeOverrideSet {
    /// Applies regardless of theme.
    Universal(StyleProperties),
    /// Separate properties per theme.
    Themed(ThemedProperties),
}

impl ThemeOverrideSet {
    /// Classifies a configured property tree.
    ///
    /// If any of `dark`, `light` or `high-contrast` is a key the set is
    /// themed and only those entries are kept; a theme entry that is not a
    /// mapping counts as "no override". Otherwise the whole tree is
    /// universal.
    pub fn from_properties(props: StyleProperties) -> Self {
        let themed = ThemeKind::ALL
            .into_iter()
            .any(|theme| props.contains_key(theme.as_str()));
        if !themed {
            return ThemeOverrideSet::Universal(props);
        }

        let pick = |theme: ThemeKind| props.get(theme.as_str()).and_then(StyleNode::as_nested).cloned();
        ThemeOverrideSet::Themed(ThemedProperties {
            dark: pick(ThemeKind::Dark),
            light: pick(ThemeKind::Light),
            high_contrast: pick(ThemeKind::HighContrast),
        })
    }
}

/// Builds the selector tree for a set of style settings.
#[derive(Debug, Clone, Copy)]
pub struct StylesheetCompiler<'a> {
    compactor: &'a KeyCompactor,
}

impl<'a> StylesheetCompiler<'a> {
    pub fn new(compactor: &'a KeyCompactor) -> Self {
        Self { compactor }
    }

    /// Compiles settings into a selector → properties tree.
    ///
    /// Rules appear in the order of `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownStyleKey`](crate::RenderError::UnknownStyleKey)
    /// when a setting names a key outside the vocabulary.
    pub fn compile(&self, settings: &[(String, ThemeOverrideSet)]) -> Result<StyleProperties> {
        let mut tree = StyleProperties::new();

        for (key, overrides) in settings {
            let token = self.compactor.compact_name(key)?;
            match overrides {
                ThemeOverrideSet::Universal(props) => {
                    tree.insert(format!(".{token}"), props.clone());
                }
                ThemeOverrideSet::Themed(themed) => {
                    for theme in ThemeKind::ALL {
                        let props = themed.get(theme).cloned().unwrap_or_default();
                        tree.insert(format!(".{} .{token}", theme.class_name()), props);
                    }
                }
            }
        }

        Ok(tree)
    }

    /// Compiles settings straight to CSS text.
    pub fn compile_css(&self, settings: &[(String, ThemeOverrideSet)]) -> Result<String> {
        self.compile(settings).map(|tree| to_css(&tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn color(value: &str) -> StyleProperties {
        StyleProperties::new().with("color", value)
    }

    fn selectors(tree: &StyleProperties) -> Vec<&str> {
        tree.iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn test_universal_set_single_rule() {
        let compactor = KeyCompactor::new();
        let settings = vec![(
            "foreground-color-red".to_string(),
            ThemeOverrideSet::from_properties(color("#cd3131")),
        )];

        let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();
        assert_eq!(selectors(&tree), vec![".h"]);
        assert_eq!(tree.get(".h"), Some(&StyleNode::Nested(color("#cd3131"))));
    }

    #[test]
    fn test_themed_set_emits_all_three() {
        let compactor = KeyCompactor::new();
        let props = StyleProperties::new().with("dark", color("white"));
        let settings = vec![(
            "foreground-color-red".to_string(),
            ThemeOverrideSet::from_properties(props),
        )];

        let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();
        assert_eq!(
            selectors(&tree),
            vec![
                ".theme-dark .h",
                ".theme-light .h",
                ".theme-high-contrast .h"
            ]
        );
        assert_eq!(tree.get(".theme-dark .h"), Some(&StyleNode::Nested(color("white"))));
        assert_eq!(
            tree.get(".theme-light .h"),
            Some(&StyleNode::Nested(StyleProperties::new()))
        );
    }

    #[test]
    fn test_malformed_theme_entry_is_empty_rule() {
        let props = StyleProperties::new()
            .with("light", "not-a-mapping")
            .with("high-contrast", color("yellow"));

        let ThemeOverrideSet::Themed(themed) = ThemeOverrideSet::from_properties(props) else {
            panic!("expected a themed set");
        };
        assert_eq!(themed.light, None);
        assert_eq!(themed.dark, None);
        assert_eq!(themed.high_contrast, Some(color("yellow")));
    }

    #[test]
    fn test_themed_set_drops_unscoped_entries() {
        let props = StyleProperties::new()
            .with("color", "red")
            .with("dark", color("white"));

        let set = ThemeOverrideSet::from_properties(props);
        assert_eq!(
            set,
            ThemeOverrideSet::Themed(ThemedProperties::default().with(ThemeKind::Dark, color("white")))
        );
    }

    #[test]
    fn test_rules_follow_input_order() {
        let compactor = KeyCompactor::new();
        let settings = vec![
            ("attribute-dim".to_string(), ThemeOverrideSet::Universal(color("gray"))),
            ("background".to_string(), ThemeOverrideSet::Universal(color("black"))),
            ("attribute-bold".to_string(), ThemeOverrideSet::Universal(color("white"))),
        ];

        let tree = StylesheetCompiler::new(&compactor).compile(&settings).unwrap();
        assert_eq!(selectors(&tree), vec![".ap", ".b", ".ao"]);
    }

    #[test]
    fn test_unknown_key_aborts() {
        let compactor = KeyCompactor::new();
        let settings = vec![
            ("attribute-bold".to_string(), ThemeOverrideSet::Universal(color("white"))),
            ("attribute-italic".to_string(), ThemeOverrideSet::Universal(color("white"))),
        ];

        let err = StylesheetCompiler::new(&compactor).compile(&settings).unwrap_err();
        assert!(matches!(err, RenderError::UnknownStyleKey(name) if name == "attribute-italic"));
    }

    #[test]
    fn test_compile_css() {
        let compactor = KeyCompactor::new();
        let settings = vec![(
            "background-color-red".to_string(),
            ThemeOverrideSet::Themed(
                ThemedProperties::default().with(
                    ThemeKind::Light,
                    StyleProperties::new().with("background-color", "#cd3131"),
                ),
            ),
        )];

        let css = StylesheetCompiler::new(&compactor).compile_css(&settings).unwrap();
        assert_eq!(
            css,
            ".theme-dark .z {\n}\n\
             .theme-light .z {\n  background-color: #cd3131;\n}\n\
             .theme-high-contrast .z {\n}\n"
        );
    }
}
