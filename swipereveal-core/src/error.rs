/// Structured error types for swipereveal-core.
///
/// The gesture core itself is total; errors only come from the row list
/// mutation API and from configuration handling. The binary wraps these in
/// `anyhow` for convenience.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::rows::RowId;

/// Main error type for swipereveal-core operations
#[derive(Error, Debug)]
pub enum SwipeError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    /// Config file is not valid TOML for `SwipeConfig`
    #[error("Failed to parse config file {path:?}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Config values are out of range
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// No row with this id exists in the list
    #[error("Row {id} not found")]
    RowNotFound { id: RowId },

    /// Insert position past the end of the list
    #[error("Insert index {index} out of bounds for list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A row with this id is already present
    #[error("Row {id} already exists")]
    DuplicateRow { id: RowId },
}

/// Result type alias for swipereveal-core operations
pub type Result<T> = std::result::Result<T, SwipeError>;

impl SwipeError {
    /// Create a config validation error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Create a config read error
    pub fn config_read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Create a row-not-found error
    pub fn row_not_found(id: RowId) -> Self {
        Self::RowNotFound { id }
    }
}
