//! Decode error types.
//!
//! Provides [`DecodeError`] for columnar decoding plus a convenience
//! [`DecodeResult`] alias. Every variant is fatal for the file being
//! decoded and for that file only.

use gridline_core::EntityKind;
use thiserror::Error;

/// Result alias for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors that can occur while decoding a columnar file.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Header, footer or metadata is malformed or truncated.
    #[error("structural error: {0}")]
    Structural(String),

    /// A column required by the target schema is absent.
    #[error("schema mismatch: {kind} file is missing required column '{column}'")]
    SchemaMismatch {
        /// Entity kind being decoded.
        kind: EntityKind,
        /// Canonical name of the missing column.
        column: String,
    },

    /// A column is present but its type cannot be coerced.
    #[error("column '{column}' has type {data_type}, expected {expected}")]
    ColumnType {
        /// Column name in the file.
        column: String,
        /// Arrow type found in the file.
        data_type: String,
        /// Target field type.
        expected: &'static str,
    },

    /// Column chunk or page data could not be decoded.
    #[error("corrupt column data: {0}")]
    Corrupt(String),

    /// The caller did not supply a context parameter the kind requires.
    #[error("{kind} records require a caller-supplied {parameter}")]
    MissingContext {
        /// Entity kind being decoded.
        kind: EntityKind,
        /// The missing parameter.
        parameter: &'static str,
    },
}

impl DecodeError {
    /// Returns the missing column name for a schema mismatch.
    #[must_use]
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            Self::SchemaMismatch { column, .. } => Some(column),
            _ => None,
        }
    }

    /// Whether the file envelope itself was unreadable.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_mismatch_display_names_column() {
        let err = DecodeError::SchemaMismatch {
            kind: EntityKind::WeeklyStat,
            column: "week".into(),
        };
        assert_eq!(
            err.to_string(),
            "schema mismatch: weekly_stat file is missing required column 'week'"
        );
        assert_eq!(err.missing_column(), Some("week"));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_missing_context_display() {
        let err = DecodeError::MissingContext {
            kind: EntityKind::SeasonalStat,
            parameter: "season type",
        };
        assert!(err.to_string().contains("season type"));
    }

    #[test]
    fn test_structural() {
        let err = DecodeError::Structural("truncated footer".into());
        assert!(err.is_structural());
        assert!(err.missing_column().is_none());
    }
}
