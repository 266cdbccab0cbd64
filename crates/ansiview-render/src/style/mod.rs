//! Style vocabulary, property trees and stylesheet compilation.
//!
//! - [`key`]: the closed [`StyleKey`] vocabulary and the [`KeyCompactor`]
//!   that maps keys to short class tokens
//! - [`properties`]: the recursive [`StyleProperties`] tree read from
//!   configuration
//! - [`stylesheet`]: per-theme compilation into a selector tree
//! - [`css`]: serialization of any tree into CSS text

pub mod css;
pub mod key;
pub mod properties;
pub mod stylesheet;

pub use css::to_css;
pub use key::{Attribute, KeyCompactor, NamedColor, SegmentType, StyleKey};
pub use properties::{StyleNode, StyleProperties};
pub use stylesheet::{StylesheetCompiler, ThemeOverrideSet, ThemedProperties};
