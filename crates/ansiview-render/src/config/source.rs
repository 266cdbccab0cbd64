//! Configuration sources.
//!
//! A [`ConfigSource`] supplies the three inputs of a render snapshot: custom
//! CSS, font settings, and the ordered per-key style settings. [`RenderConfig`]
//! holds them in memory and parses them from YAML; [`YamlConfig`] adds a
//! backing file that can be re-read with [`YamlConfig::refresh`].
//!
//! ```yaml
//! custom-css:
//!   body: { margin: 0 }
//! font:
//!   font-family: [Menlo, monospace]
//!   font-size: 13px
//! styles:
//!   foreground-color-red:
//!     preview-style:
//!       dark: { color: "#cd3131" }
//!       light: { color: "#cd3131" }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_yaml::Value;

use crate::style::{StyleProperties, ThemeOverrideSet};

use super::error::ConfigError;

/// Supplies configuration for render snapshots.
pub trait ConfigSource {
    /// Raw custom stylesheet, emitted last.
    fn custom_css(&self) -> StyleProperties;

    /// Font declarations for the document container.
    fn font_settings(&self) -> StyleProperties;

    /// Ordered `(style key, overrides)` pairs.
    fn settings(&self) -> Vec<(String, ThemeOverrideSet)>;
}

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default, rename = "custom-css")]
    custom_css: Value,
    #[serde(default)]
    font: Value,
    #[serde(default)]
    styles: Value,
}

/// In-memory configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    custom_css: StyleProperties,
    font: StyleProperties,
    styles: Vec<(String, ThemeOverrideSet)>,
}

impl RenderConfig {
    /// An empty configuration: no styles, no font, no custom CSS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the custom stylesheet, returning `self` for chaining.
    pub fn with_custom_css(mut self, css: StyleProperties) -> Self {
        self.custom_css = css;
        self
    }

    /// Sets the font declarations, returning `self` for chaining.
    pub fn with_font(mut self, font: StyleProperties) -> Self {
        self.font = font;
        self
    }

    /// Appends a style setting, returning `self` for chaining.
    pub fn with_style(mut self, key: impl Into<String>, overrides: ThemeOverrideSet) -> Self {
        self.styles.push((key.into(), overrides));
        self
    }

    /// Parses configuration from YAML.
    ///
    /// Every section is optional. Each entry under `styles` must be a
    /// mapping; its `preview-style` mapping becomes the key's
    /// [`ThemeOverrideSet`] (an entry without one contributes an empty
    /// universal rule).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for invalid YAML and
    /// [`ConfigError::Invalid`] when a section is not a mapping.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = if yaml.trim().is_empty() {
            RawConfig::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse {
                path: None,
                message: e.to_string(),
            })?
        };

        Ok(Self {
            custom_css: section(&raw.custom_css, "custom-css")?,
            font: section(&raw.font, "font")?,
            styles: style_settings(&raw.styles)?,
        })
    }
}

impl ConfigSource for RenderConfig {
    fn custom_css(&self) -> StyleProperties {
        self.custom_css.clone()
    }

    fn font_settings(&self) -> StyleProperties {
        self.font.clone()
    }

    fn settings(&self) -> Vec<(String, ThemeOverrideSet)> {
        self.styles.clone()
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid {
        path: None,
        message,
    }
}

fn section(value: &Value, name: &str) -> Result<StyleProperties, ConfigError> {
    if value.is_null() {
        return Ok(StyleProperties::new());
    }
    StyleProperties::from_yaml(value)
        .ok_or_else(|| invalid(format!("'{name}' must be a mapping")))
}

fn style_settings(value: &Value) -> Result<Vec<(String, ThemeOverrideSet)>, ConfigError> {
    let mapping = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Mapping(mapping) => mapping,
        _ => return Err(invalid("'styles' must be a mapping".to_string())),
    };

    let mut settings = Vec::with_capacity(mapping.len());
    for (key, entry) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| invalid(format!("style key {key:?} is not a string")))?;
        let Value::Mapping(entry_map) = entry else {
            return Err(invalid(format!("style '{key}' must be a mapping")));
        };
        let preview = entry_map
            .get("preview-style")
            .and_then(StyleProperties::from_yaml)
            .unwrap_or_default();
        settings.push((key.to_string(), ThemeOverrideSet::from_properties(preview)));
    }
    Ok(settings)
}

/// File-backed YAML configuration.
#[derive(Debug, Clone)]
pub struct YamlConfig {
    source_path: Option<PathBuf>,
    config: RenderConfig,
}

impl YamlConfig {
    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = read_config(path)?;
        Ok(Self {
            source_path: Some(path.to_path_buf()),
            config,
        })
    }

    /// Wraps in-memory configuration with no backing file.
    pub fn from_config(config: RenderConfig) -> Self {
        Self {
            source_path: None,
            config,
        }
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Re-reads the backing file.
    ///
    /// On failure the previously loaded configuration stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSource`] when there is no backing file, or
    /// the read/parse error.
    pub fn refresh(&mut self) -> Result<(), ConfigError> {
        let path = self.source_path.as_ref().ok_or(ConfigError::NoSource)?;
        self.config = read_config(path)?;
        Ok(())
    }
}

impl ConfigSource for YamlConfig {
    fn custom_css(&self) -> StyleProperties {
        self.config.custom_css()
    }

    fn font_settings(&self) -> StyleProperties {
        self.config.font_settings()
    }

    fn settings(&self) -> Vec<(String, ThemeOverrideSet)> {
        self.config.settings()
    }
}

fn read_config(path: &Path) -> Result<RenderConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    RenderConfig::from_yaml(&content).map_err(|e| e.at(path))
}
