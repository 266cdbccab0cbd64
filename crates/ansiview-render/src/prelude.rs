//! Convenient imports for rendering.
//!
//! ```rust
//! use ansiview_render::prelude::*;
//!
//! let ctx = SegmentContext::text().foreground(NamedColor::Green);
//! assert_eq!(ctx.foreground, NamedColor::Green);
//! ```

pub use crate::config::{ConfigSource, RenderConfig, SnapshotStore, YamlConfig};
pub use crate::render::{DocumentRenderer, RenderOutcome, RenderTarget, Sink, TextDocument};
pub use crate::segment::{Segment, SegmentContext};
pub use crate::style::{Attribute, NamedColor};
pub use crate::theme::{detect_theme, ThemeKind};
