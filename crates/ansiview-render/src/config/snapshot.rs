//! Immutable render snapshots and their reload store.
//!
//! A [`RenderSnapshot`] holds everything a render needs from configuration:
//! the compiled stylesheet, the font CSS and the custom CSS, plus the
//! compactor the stylesheet was compiled against. It is rebuilt in full on
//! every reload; there is no partial update.
//!
//! [`SnapshotStore`] owns the current snapshot. A render grabs an
//! `Arc<RenderSnapshot>` when it starts and keeps it to the end, so a reload
//! that lands mid-render only affects renders started afterwards.

use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::error::Result;
use crate::style::{to_css, KeyCompactor, StyleProperties, StylesheetCompiler};

use super::source::ConfigSource;

/// Selector that font settings are scoped to.
pub const FONT_SELECTOR: &str = ".ansiview";

/// Compiled style state for one configuration generation.
#[derive(Debug, Clone)]
pub struct RenderSnapshot {
    compactor: Arc<KeyCompactor>,
    stylesheet: String,
    font_css: String,
    custom_css: String,
}

impl RenderSnapshot {
    /// Compiles a snapshot from a configuration source.
    ///
    /// # Errors
    ///
    /// Fails with [`RenderError::UnknownStyleKey`](crate::RenderError::UnknownStyleKey)
    /// when the settings name a key outside the vocabulary.
    pub fn build(compactor: Arc<KeyCompactor>, source: &dyn ConfigSource) -> Result<Self> {
        let settings = source.settings();
        let tree = StylesheetCompiler::new(&compactor).compile(&settings)?;
        let stylesheet = to_css(&tree);

        let font = source.font_settings();
        let font_css = if font.is_empty() {
            String::new()
        } else {
            to_css(&StyleProperties::new().with(FONT_SELECTOR, font))
        };
        let custom_css = to_css(&source.custom_css());

        tracing::debug!(
            settings = settings.len(),
            rules = tree.len(),
            "compiled render snapshot"
        );

        Ok(Self {
            compactor,
            stylesheet,
            font_css,
            custom_css,
        })
    }

    pub fn compactor(&self) -> &KeyCompactor {
        &self.compactor
    }

    /// CSS compiled from the style settings.
    pub fn stylesheet(&self) -> &str {
        &self.stylesheet
    }

    /// CSS for the font settings.
    pub fn font_css(&self) -> &str {
        &self.font_css
    }

    /// The custom stylesheet.
    pub fn custom_css(&self) -> &str {
        &self.custom_css
    }
}

/// Holds the current snapshot and replaces it on reload.
#[derive(Debug)]
pub struct SnapshotStore {
    compactor: Arc<KeyCompactor>,
    current: ArcSwap<RenderSnapshot>,
}

impl SnapshotStore {
    /// Builds the initial snapshot.
    ///
    /// # Errors
    ///
    /// Propagates the snapshot build error.
    pub fn new(source: &dyn ConfigSource) -> Result<Self> {
        let compactor = Arc::new(KeyCompactor::new());
        let snapshot = RenderSnapshot::build(Arc::clone(&compactor), source)?;
        Ok(Self {
            compactor,
            current: ArcSwap::from_pointee(snapshot),
        })
    }

    /// The snapshot new renders should use.
    pub fn current(&self) -> Arc<RenderSnapshot> {
        self.current.load_full()
    }

    /// Rebuilds the snapshot from `source` and swaps it in.
    ///
    /// Renders holding the previous snapshot are unaffected. If the build
    /// fails the previous snapshot stays current.
    ///
    /// # Errors
    ///
    /// Propagates the snapshot build error.
    pub fn reload(&self, source: &dyn ConfigSource) -> Result<Arc<RenderSnapshot>> {
        match RenderSnapshot::build(Arc::clone(&self.compactor), source) {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                self.current.store(Arc::clone(&snapshot));
                Ok(snapshot)
            }
            Err(err) => {
                tracing::warn!(error = %err, "configuration reload failed, keeping previous styles");
                Err(err)
            }
        }
    }
}
