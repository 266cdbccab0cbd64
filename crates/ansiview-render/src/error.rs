//! Error types for rendering.
//!
//! [`RenderError`] covers everything that can abort a stylesheet build or a
//! document render. Configuration loading has its own
//! [`ConfigError`](crate::config::ConfigError).

use thiserror::Error;

/// Errors that abort a stylesheet build or a document render.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A style key outside the fixed vocabulary.
    #[error("unknown style key: {0}")]
    UnknownStyleKey(String),

    /// A color name outside the fixed vocabulary.
    #[error("unknown color: {0}")]
    UnknownColor(String),

    /// A required segment attribute was not supplied.
    #[error("segment attribute '{0}' is missing")]
    MissingSegmentAttribute(&'static str),

    /// A segment attribute carried a value outside its domain.
    #[error("segment attribute '{name}' has invalid value '{value}'")]
    InvalidSegmentAttribute { name: String, value: String },

    /// The embedded state could not be serialized.
    #[error("failed to serialize embedded state: {0}")]
    State(#[from] serde_json::Error),

    /// The output sink rejected a chunk.
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
