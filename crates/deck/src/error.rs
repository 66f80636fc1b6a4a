use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading themes.
#[derive(Debug, Error)]
pub enum DeckError {
    /// The registry file could not be read.
    #[error("failed to read theme registry {}: {source}", .path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The registry is not valid YAML or does not match the theme schema.
    #[error("invalid theme registry: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// No theme with the requested name.
    #[error("theme '{name}' not found (available: {available})")]
    UnknownTheme {
        /// Requested theme name.
        name: String,
        /// Comma-separated names that do exist.
        available: String,
    },
}
