//! Error types for the loader.

use gridline_connectors::DecodeError;
use gridline_storage::StoreError;

/// Errors from loader operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Columnar decode error
    Decode(#[from] DecodeError),

    /// Document store error
    Store(#[from] StoreError),

    /// Filesystem error
    Io(#[from] std::io::Error),

    /// Invalid configuration value
    Config(String),

    /// Manifest could not be parsed or is inconsistent
    Manifest(String),
}

impl DbError {
    /// Whether this is a filesystem "not found" error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == std::io::ErrorKind::NotFound)
    }
}

impl std::fmt::Display for DbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(e) => write!(f, "Decode error: {e}"),
            Self::Store(e) => write!(f, "Store error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Config(msg) => write!(f, "Config error: {msg}"),
            Self::Manifest(msg) => write!(f, "Manifest error: {msg}"),
        }
    }
}
