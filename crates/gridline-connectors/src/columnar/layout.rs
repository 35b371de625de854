//! Column specifications for record schemas.

use std::iter;

use arrow_schema::DataType;

/// Target field type a file column is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// UTF-8 text.
    Text,
    /// 64-bit signed integer.
    Int,
    /// 64-bit float.
    Float,
    /// Boolean; integer columns map nonzero to `true`.
    Flag,
}

impl ColumnType {
    pub(crate) fn arrow_type(self) -> DataType {
        match self {
            Self::Text => DataType::Utf8,
            Self::Int => DataType::Int64,
            Self::Float => DataType::Float64,
            Self::Flag => DataType::Boolean,
        }
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Flag => "boolean",
        }
    }
}

/// One column a record schema reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Canonical column name; rows are read by this name.
    pub name: &'static str,
    /// Alternative names accepted in the file, tried after `name`.
    pub aliases: &'static [&'static str],
    /// Target type.
    pub ty: ColumnType,
    /// Whether a file without this column is a schema mismatch.
    pub required: bool,
}

impl ColumnSpec {
    /// A column the file must contain.
    #[must_use]
    pub const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            aliases: &[],
            ty,
            required: true,
        }
    }

    /// A column that reads as its zero value when absent.
    #[must_use]
    pub const fn optional(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            aliases: &[],
            ty,
            required: false,
        }
    }

    /// Accepts alternative column names.
    #[must_use]
    pub const fn or(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    /// Canonical name followed by aliases, in match priority.
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidates_order() {
        let spec = ColumnSpec::optional("team", ColumnType::Text).or(&["recent_team"]);
        assert_eq!(spec.candidates().collect::<Vec<_>>(), vec!["team", "recent_team"]);
        assert!(!spec.required);
    }
}
