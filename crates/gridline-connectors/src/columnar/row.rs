//! Type coercion and positional row access.
//!
//! Each projected column of a decoded batch is cast once to its target
//! Arrow type (Utf8, Int64, Float64 or Boolean). A [`Row`] then reads
//! value `j` of every column, so columns decoded independently are
//! reassembled purely by position.

use std::collections::HashMap;

use arrow_array::cast::AsArray;
use arrow_array::types::{Float64Type, Int64Type};
use arrow_array::{Array, ArrayRef, BooleanArray, Float64Array, Int64Array, RecordBatch, StringArray};

use super::layout::{ColumnSpec, ColumnType};
use crate::error::{DecodeError, DecodeResult};

/// A schema column matched against the file's column directory.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedColumn {
    pub(crate) spec: ColumnSpec,
    /// Name the column carries in the file (canonical name or an alias).
    pub(crate) file_name: String,
    /// Root column index in the file schema.
    pub(crate) index: usize,
}

enum TypedColumn {
    Text(StringArray),
    Int(Int64Array),
    Float(Float64Array),
    Flag(BooleanArray),
}

impl TypedColumn {
    fn coerce(array: &ArrayRef, column: &ResolvedColumn) -> DecodeResult<Self> {
        let ty = column.spec.ty;
        let cast = arrow_cast::cast(array.as_ref(), &ty.arrow_type()).map_err(|e| {
            DecodeError::ColumnType {
                column: column.file_name.clone(),
                data_type: format!("{} ({e})", array.data_type()),
                expected: ty.name(),
            }
        })?;
        Ok(match ty {
            ColumnType::Text => Self::Text(cast.as_string::<i32>().clone()),
            ColumnType::Int => Self::Int(cast.as_primitive::<Int64Type>().clone()),
            ColumnType::Float => Self::Float(cast.as_primitive::<Float64Type>().clone()),
            ColumnType::Flag => Self::Flag(cast.as_boolean().clone()),
        })
    }
}

/// One decoded batch with every resolved column coerced.
pub(crate) struct TypedBatch {
    columns: HashMap<&'static str, TypedColumn>,
    num_rows: usize,
}

impl TypedBatch {
    /// Coerces the resolved columns of `batch`.
    pub(crate) fn from_batch(batch: &RecordBatch, resolved: &[ResolvedColumn]) -> DecodeResult<Self> {
        let mut columns = HashMap::with_capacity(resolved.len());
        for column in resolved {
            let array = batch.column_by_name(&column.file_name).ok_or_else(|| {
                DecodeError::Corrupt(format!(
                    "projected column '{}' missing from decoded batch",
                    column.file_name
                ))
            })?;
            columns.insert(column.spec.name, TypedColumn::coerce(array, column)?);
        }
        Ok(Self {
            columns,
            num_rows: batch.num_rows(),
        })
    }

    pub(crate) fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.num_rows).map(move |index| Row { batch: self, index })
    }
}

/// Positional view of one logical row.
///
/// Accessors take the canonical column name. A column that is absent from
/// the file, or null at this row, reads as the zero value of its type
/// (`""`, `0`, `0.0`, `false`), except through the `opt_*` accessors.
pub struct Row<'a> {
    batch: &'a TypedBatch,
    index: usize,
}

impl Row<'_> {
    fn column(&self, name: &str) -> Option<&TypedColumn> {
        self.batch.columns.get(name)
    }

    /// Text value, or `""`.
    #[must_use]
    pub fn text(&self, name: &str) -> String {
        match self.column(name) {
            Some(TypedColumn::Text(a)) if a.is_valid(self.index) => a.value(self.index).to_string(),
            _ => String::new(),
        }
    }

    /// Integer value, or `None` when absent or null.
    #[must_use]
    pub fn opt_int(&self, name: &str) -> Option<i64> {
        match self.column(name) {
            Some(TypedColumn::Int(a)) if a.is_valid(self.index) => Some(a.value(self.index)),
            _ => None,
        }
    }

    /// Integer value, or `0`.
    #[must_use]
    pub fn int(&self, name: &str) -> i64 {
        self.opt_int(name).unwrap_or_default()
    }

    /// Integer value narrowed to `i32`; out-of-range values read as `None`.
    #[must_use]
    pub fn opt_int32(&self, name: &str) -> Option<i32> {
        self.opt_int(name).and_then(|v| i32::try_from(v).ok())
    }

    /// Integer value narrowed to `i32`, or `0`.
    #[must_use]
    pub fn int32(&self, name: &str) -> i32 {
        self.opt_int32(name).unwrap_or_default()
    }

    /// Float value, or `0.0`.
    #[must_use]
    pub fn float(&self, name: &str) -> f64 {
        match self.column(name) {
            Some(TypedColumn::Float(a)) if a.is_valid(self.index) => a.value(self.index),
            _ => 0.0,
        }
    }

    /// Boolean value, or `false`.
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        match self.column(name) {
            Some(TypedColumn::Flag(a)) if a.is_valid(self.index) => a.value(self.index),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow_array::{DictionaryArray, Int32Array, LargeStringArray, ListArray};
    use arrow_array::types::Int32Type;
    use arrow_schema::{DataType, Field, Schema};

    use super::*;

    fn resolved(spec: ColumnSpec, index: usize) -> ResolvedColumn {
        ResolvedColumn {
            spec,
            file_name: spec.name.to_string(),
            index,
        }
    }

    fn mixed_batch() -> RecordBatch {
        let names: DictionaryArray<Int32Type> = vec![Some("KC"), None, Some("KC")].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("week", DataType::Int32, true),
            Field::new("jersey", DataType::Utf8, true),
            Field::new("yards", DataType::Float64, true),
            Field::new(
                "team",
                DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8)),
                true,
            ),
            Field::new("div_game", DataType::Int32, true),
            Field::new("espn_id", DataType::Int32, true),
            Field::new("college", DataType::LargeUtf8, true),
        ]));
        RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int32Array::from(vec![Some(1), None, Some(3)])),
                Arc::new(StringArray::from(vec![Some("12"), Some("n/a"), None])),
                Arc::new(Float64Array::from(vec![Some(7.9), None, Some(-2.5)])),
                Arc::new(names),
                Arc::new(Int32Array::from(vec![Some(1), Some(0), None])),
                Arc::new(Int32Array::from(vec![Some(3_139_477), None, None])),
                Arc::new(LargeStringArray::from(vec![Some("Texas Tech"), None, None])),
            ],
        )
        .unwrap()
    }

    fn typed(batch: &RecordBatch) -> TypedBatch {
        let specs = [
            ColumnSpec::required("week", ColumnType::Int),
            ColumnSpec::optional("jersey", ColumnType::Int),
            ColumnSpec::optional("yards", ColumnType::Float),
            ColumnSpec::optional("team", ColumnType::Text),
            ColumnSpec::optional("div_game", ColumnType::Flag),
            ColumnSpec::optional("espn_id", ColumnType::Text),
            ColumnSpec::optional("college", ColumnType::Text),
        ];
        let resolved: Vec<_> = specs.iter().enumerate().map(|(i, s)| resolved(*s, i)).collect();
        TypedBatch::from_batch(batch, &resolved).unwrap()
    }

    #[test]
    fn test_positional_rows() {
        let batch = mixed_batch();
        let typed = typed(&batch);
        let rows: Vec<_> = typed.rows().collect();
        assert_eq!(rows.len(), 3);

        assert_eq!(rows[0].int32("week"), 1);
        assert_eq!(rows[0].int32("jersey"), 12);
        assert!((rows[0].float("yards") - 7.9).abs() < f64::EPSILON);
        assert_eq!(rows[0].text("team"), "KC");
        assert!(rows[0].flag("div_game"));
        assert_eq!(rows[0].text("espn_id"), "3139477");
        assert_eq!(rows[0].text("college"), "Texas Tech");
        assert_eq!(rows[2].int32("week"), 3);
    }

    #[test]
    fn test_nulls_read_as_zero_values() {
        let batch = mixed_batch();
        let typed = typed(&batch);
        let row = typed.rows().nth(1).unwrap();
        assert_eq!(row.int32("week"), 0);
        assert_eq!(row.opt_int32("week"), None);
        // unparsable numeric text is null after a safe cast
        assert_eq!(row.int32("jersey"), 0);
        assert!(row.float("yards").abs() < f64::EPSILON);
        assert_eq!(row.text("team"), "");
        assert!(!row.flag("div_game"));
    }

    #[test]
    fn test_absent_column_reads_default() {
        let batch = mixed_batch();
        let typed = typed(&batch);
        let row = typed.rows().next().unwrap();
        assert_eq!(row.text("not_in_file"), "");
        assert_eq!(row.opt_int("not_in_file"), None);
        assert!(!row.flag("not_in_file"));
    }

    #[test]
    fn test_uncastable_column_is_type_error() {
        let schema = Arc::new(Schema::new(vec![Field::new(
            "week",
            DataType::List(Arc::new(Field::new("item", DataType::Int32, true))),
            true,
        )]));
        let list = ListArray::from_iter_primitive::<Int32Type, _, _>(vec![Some(vec![
            Some(1),
        ])]);
        let batch = RecordBatch::try_new(schema, vec![Arc::new(list)]).unwrap();
        let spec = ColumnSpec::required("week", ColumnType::Int);
        let err = TypedBatch::from_batch(&batch, &[resolved(spec, 0)]).err().unwrap();
        assert!(matches!(err, DecodeError::ColumnType { ref column, .. } if column == "week"));
    }
}
