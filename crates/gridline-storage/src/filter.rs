//! Equality filters over top-level document fields.

use gridline_core::Document;
use serde_json::Value;

/// Conjunction of `field == value` conditions.
///
/// An empty filter matches every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    conditions: Vec<(String, Value)>,
}

impl DocumentFilter {
    /// A filter matching every document.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Adds a `field == value` condition.
    #[must_use]
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    /// Returns true if the filter has no conditions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns true if every condition holds for `document`.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(DocumentFilter::all().matches(&doc(json!({}))));
        assert!(DocumentFilter::all().is_empty());
    }

    #[test]
    fn test_conjunction() {
        let d = doc(json!({"player_id": "P1", "season": 2023, "week": 3}));
        let f = DocumentFilter::all().where_eq("player_id", "P1").where_eq("season", 2023);
        assert!(f.matches(&d));
        assert!(!f.clone().where_eq("week", 4).matches(&d));
        assert!(!DocumentFilter::all().where_eq("team", "KC").matches(&d));
    }
}
