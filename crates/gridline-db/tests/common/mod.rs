//! In-memory Parquet fixtures and store wrappers shared by the
//! integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use arrow_array::{ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray};
use arrow_schema::{Field, Schema};
use gridline_core::{Document, EntityDescriptor, NaturalKey};
use gridline_storage::{DocumentFilter, DocumentStore, MemoryStore, StoreError, UpsertOutcome};
use parquet::arrow::ArrowWriter;

/// Writes named columns as a single-row-group Parquet file.
pub fn parquet_file(columns: Vec<(&str, ArrayRef)>) -> Vec<u8> {
    let fields: Vec<Field> = columns
        .iter()
        .map(|(name, array)| Field::new(*name, array.data_type().clone(), true))
        .collect();
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(
        schema.clone(),
        columns.into_iter().map(|(_, array)| array).collect(),
    )
    .unwrap();

    let mut buf = Vec::new();
    let mut writer = ArrowWriter::try_new(&mut buf, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    buf
}

/// Roster rows: `(gsis_id, full_name, team, position)`.
pub fn roster_file(rows: &[(Option<&str>, &str, &str, &str)]) -> Vec<u8> {
    parquet_file(vec![
        (
            "gsis_id",
            Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        ),
        (
            "full_name",
            Arc::new(StringArray::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        ),
        (
            "team",
            Arc::new(StringArray::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        ),
        (
            "position",
            Arc::new(StringArray::from(rows.iter().map(|r| r.3).collect::<Vec<_>>())),
        ),
    ])
}

/// Weekly rows: `(player_id, week, receiving_yards)`.
pub fn weekly_file(rows: &[(&str, i32, f64)]) -> Vec<u8> {
    parquet_file(vec![
        (
            "player_id",
            Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        ),
        (
            "player_name",
            Arc::new(StringArray::from(vec!["J.Doe"; rows.len()])),
        ),
        (
            "week",
            Arc::new(Int32Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        ),
        (
            "receiving_yards",
            Arc::new(Float64Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        ),
    ])
}

/// Schedule rows: `(game_id, season, week, home_score)`.
pub fn games_file(rows: &[(&str, i32, i32, Option<i32>)]) -> Vec<u8> {
    parquet_file(vec![
        (
            "game_id",
            Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
        ),
        (
            "season",
            Arc::new(Int32Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
        ),
        (
            "week",
            Arc::new(Int32Array::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
        ),
        (
            "away_team",
            Arc::new(StringArray::from(vec!["BAL"; rows.len()])),
        ),
        (
            "home_team",
            Arc::new(StringArray::from(vec!["KC"; rows.len()])),
        ),
        (
            "home_score",
            Arc::new(Int32Array::from(rows.iter().map(|r| r.3).collect::<Vec<_>>())),
        ),
    ])
}

/// A [`MemoryStore`] whose `fail_on`-th upsert call (1-based) fails.
pub struct FailingStore {
    inner: MemoryStore,
    fail_on: usize,
    calls: AtomicUsize,
}

impl FailingStore {
    pub fn new(fail_on: usize) -> Self {
        Self {
            inner: MemoryStore::new(),
            fail_on,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }
}

impl DocumentStore for FailingStore {
    fn ensure_collection(&self, descriptor: &EntityDescriptor) -> Result<(), StoreError> {
        self.inner.ensure_collection(descriptor)
    }

    fn upsert(
        &self,
        collection: &str,
        key: &NaturalKey,
        document: Document,
    ) -> Result<UpsertOutcome, StoreError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on {
            return Err(StoreError::Unavailable("connection reset".into()));
        }
        self.inner.upsert(collection, key, document)
    }

    fn get(&self, collection: &str, key: &NaturalKey) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, key)
    }

    fn count(&self, collection: &str, filter: &DocumentFilter) -> Result<u64, StoreError> {
        self.inner.count(collection, filter)
    }

    fn store_name(&self) -> &str {
        "failing"
    }
}
