//! Configuration loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or parsing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML.
    #[error("failed to parse configuration{}: {message}", location(path))]
    Parse {
        path: Option<PathBuf>,
        message: String,
    },

    /// A section has the wrong shape.
    #[error("invalid configuration{}: {message}", location(path))]
    Invalid {
        path: Option<PathBuf>,
        message: String,
    },

    /// `refresh` was called on a configuration with no backing file.
    #[error("cannot refresh: configuration has no source file")]
    NoSource,
}

fn location(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" {}", p.display()))
        .unwrap_or_default()
}

impl ConfigError {
    /// Attaches a source path to parse and shape errors.
    pub(crate) fn at(self, source_path: &std::path::Path) -> Self {
        match self {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: Some(source_path.to_path_buf()),
                message,
            },
            ConfigError::Invalid { message, .. } => ConfigError::Invalid {
                path: Some(source_path.to_path_buf()),
                message,
            },
            other => other,
        }
    }
}
