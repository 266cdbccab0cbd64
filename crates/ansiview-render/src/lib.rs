//! # ansiview-render - Sanitized HTML Rendering of Terminal Output
//!
//! `ansiview-render` turns text that was styled with ANSI escape sequences
//! into a self-contained, themeable HTML document. Input arrives as a stream
//! of [`Segment`]s (a byte range plus the colors and attributes in effect);
//! output is a stream of HTML chunks handed to a [`Sink`].
//!
//! The document is sealed: a content security policy admits only the inline
//! styles (and, for live surfaces, the state script) tagged with per-render
//! random nonces, and all document text is escaped.
//!
//! ## Core Concepts
//!
//! - [`StyleKey`]: the closed vocabulary of style names, each mapped to a
//!   short class token by the [`KeyCompactor`]
//! - [`ThemeOverrideSet`]: per-key CSS, either universal or split by
//!   [`ThemeKind`]
//! - [`config::RenderSnapshot`]: compiled stylesheet, font and custom CSS
//!   for one configuration generation
//! - [`DocumentRenderer`]: header, one chunk per segment, footer
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ansiview_render::config::{RenderConfig, SnapshotStore};
//! use ansiview_render::{
//!     Attribute, DocumentRenderer, NamedColor, RenderTarget, Segment, SegmentContext,
//!     TextDocument, ThemeKind,
//! };
//!
//! let store = SnapshotStore::new(&RenderConfig::default_palette()).unwrap();
//! let document = TextDocument::new("build.log", "Hi");
//! let segments = vec![Segment::new(
//!     0..2,
//!     SegmentContext::text()
//!         .foreground(NamedColor::Red)
//!         .attribute(Attribute::Bold)
//!         .line_end(true),
//! )];
//!
//! let mut chunks: Vec<String> = Vec::new();
//! DocumentRenderer::new(store.current())
//!     .target(RenderTarget::Static(ThemeKind::Dark))
//!     .render(&document, segments, &mut chunks)
//!     .unwrap();
//!
//! assert_eq!(chunks[1], r#"<span class="b w"><span class="a c h ao">Hi</span></span><br>"#);
//! ```
//!
//! ## Themes
//!
//! Styles can carry separate rules for the dark, light and high-contrast
//! themes. A static export picks one through [`RenderTarget::Static`],
//! typically from [`detect_theme`]; a live surface applies the theme class
//! itself.

pub mod config;
mod error;
pub mod escape;
pub mod prelude;
pub mod render;
pub mod segment;
pub mod style;
pub mod theme;
mod util;

pub use error::{RenderError, Result};

pub use escape::{sequence_len, strip_escapes};

pub use render::{
    effective_colors, CancellationToken, DocumentRenderer, DocumentSource, Nonces,
    RenderOutcome, RenderTarget, SegmentRenderer, Sink, TextDocument, WriteSink,
};

pub use segment::{Attributes, Segment, SegmentContext};

pub use style::{
    to_css, Attribute, KeyCompactor, NamedColor, SegmentType, StyleKey, StyleNode,
    StyleProperties, StylesheetCompiler, ThemeOverrideSet, ThemedProperties,
};

pub use theme::{detect_theme, set_theme_detector, ThemeKind};

pub use util::{escape_html, escape_terminal_text, title_for_path};
