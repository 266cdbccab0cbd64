//! Configuration loading and render snapshots.
//!
//! Configuration flows one way: a [`ConfigSource`] is compiled into an
//! immutable [`RenderSnapshot`], and a [`SnapshotStore`] swaps in a fresh
//! snapshot on reload.
//!
//! ```rust
//! use ansiview_render::config::{RenderConfig, SnapshotStore};
//!
//! let store = SnapshotStore::new(&RenderConfig::default_palette()).unwrap();
//! let snapshot = store.current();
//! assert!(snapshot.stylesheet().contains(".theme-dark"));
//! ```

mod error;
mod palette;
mod snapshot;
mod source;

pub use error::ConfigError;
pub use snapshot::{RenderSnapshot, SnapshotStore, FONT_SELECTOR};
pub use source::{ConfigSource, RenderConfig, YamlConfig};
