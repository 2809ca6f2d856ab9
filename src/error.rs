//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for robeson-directory operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods throughout the codebase.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading the organization feed fails.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Feed file not found at the expected path.
    #[error("Directory feed not found at {}", path.display())]
    NotFound { path: PathBuf },
    /// The file could not be read.
    #[error("Failed to read directory feed {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not a recognized feed shape.
    #[error("Failed to parse directory feed {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Error returned when a configuration file cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
